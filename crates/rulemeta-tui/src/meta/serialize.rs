//! Template data for the rule metadata panel.
//!
//! Pure derivation from the rule and the host context, recomputed on every
//! render.

use chrono::DateTime;
use rulemeta_core::models::{union_tags, Rule};
use rulemeta_core::permalink::permalink;

use super::filter::{FilterProperty, RuleQuery};
use super::AppContext;
use crate::ui::tooltips::TooltipTarget;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaField {
    Type,
    Severity,
    Status,
    Language,
    Repository,
    Template,
    CreatedAt,
    Tag { name: String, system: bool },
    Permalink,
}

impl MetaField {
    /// Stable id used for focus and tooltips
    pub fn id(&self) -> String {
        match self {
            MetaField::Type => "type".to_string(),
            MetaField::Severity => "severity".to_string(),
            MetaField::Status => "status".to_string(),
            MetaField::Language => "lang".to_string(),
            MetaField::Repository => "repo".to_string(),
            MetaField::Template => "template".to_string(),
            MetaField::CreatedAt => "created".to_string(),
            MetaField::Tag { name, .. } => format!("tag:{}", name),
            MetaField::Permalink => "permalink".to_string(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MetaField::Type => "Type",
            MetaField::Severity => "Severity",
            MetaField::Status => "Status",
            MetaField::Language => "Language",
            MetaField::Repository => "Repository",
            MetaField::Template => "Template",
            MetaField::CreatedAt => "Available since",
            MetaField::Tag { .. } => "Tag",
            MetaField::Permalink => "Permalink",
        }
    }

    pub fn tooltip(&self) -> String {
        match self {
            MetaField::Tag { system: true, .. } => {
                "System tag, managed by the server. Enter: filter similar rules".to_string()
            }
            MetaField::Tag { system: false, .. } => {
                "Custom tag. Enter: filter similar rules".to_string()
            }
            MetaField::Template => "This rule is a template for custom rules".to_string(),
            MetaField::CreatedAt => "Date the rule was first available".to_string(),
            MetaField::Permalink => "Link to this rule in the web rule browser".to_string(),
            other => format!("{}. Enter: filter similar rules", other.label()),
        }
    }
}

/// One label/value row of the panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldData {
    pub field: MetaField,
    pub value: String,
    /// Present when Enter on this field filters similar rules
    pub filter: Option<RuleQuery>,
}

impl FieldData {
    fn new(field: MetaField, value: impl Into<String>, filter: Option<RuleQuery>) -> Self {
        Self {
            field,
            value: value.into(),
            filter,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaViewData {
    pub can_write: bool,
    pub key: String,
    pub name: String,
    pub fields: Vec<FieldData>,
    pub sys_tags: Vec<String>,
    pub tags: Vec<String>,
    /// System tags first, then custom tags, no duplicates
    pub all_tags: Vec<String>,
    pub permalink: String,
}

impl MetaViewData {
    /// Everything the user can focus, in display order: fields, tags, permalink
    pub fn focus_targets(&self) -> Vec<FieldData> {
        let mut targets = self.fields.clone();
        for tag in &self.all_tags {
            let system = self.sys_tags.contains(tag);
            targets.push(FieldData::new(
                MetaField::Tag {
                    name: tag.clone(),
                    system,
                },
                tag.clone(),
                Some(RuleQuery::new(FilterProperty::Tags, tag.clone())),
            ));
        }
        targets.push(FieldData::new(
            MetaField::Permalink,
            self.permalink.clone(),
            None,
        ));
        targets
    }

    pub fn tooltip_targets(&self) -> Vec<TooltipTarget> {
        self.focus_targets()
            .iter()
            .map(|t| TooltipTarget::new(t.field.id(), t.field.tooltip()))
            .collect()
    }
}

pub fn serialize(rule: &Rule, app: &AppContext) -> MetaViewData {
    let mut fields = Vec::new();

    if let Some(rule_type) = &rule.rule_type {
        fields.push(FieldData::new(
            MetaField::Type,
            humanize(rule_type),
            Some(RuleQuery::new(FilterProperty::Types, rule_type.clone())),
        ));
    }
    if let Some(severity) = &rule.severity {
        fields.push(FieldData::new(
            MetaField::Severity,
            severity.clone(),
            Some(RuleQuery::new(FilterProperty::Severities, severity.clone())),
        ));
    }
    // READY is the normal case and not worth a row
    if let Some(status) = rule.status.as_ref().filter(|s| s.as_str() != "READY") {
        fields.push(FieldData::new(
            MetaField::Status,
            humanize(status),
            Some(RuleQuery::new(FilterProperty::Statuses, status.clone())),
        ));
    }
    if let Some(lang) = &rule.lang {
        let display = rule.lang_name.clone().unwrap_or_else(|| lang.clone());
        fields.push(FieldData::new(
            MetaField::Language,
            display,
            Some(RuleQuery::new(FilterProperty::Languages, lang.clone())),
        ));
    }
    if let Some(repo) = &rule.repo {
        fields.push(FieldData::new(
            MetaField::Repository,
            repo.clone(),
            Some(RuleQuery::new(FilterProperty::Repositories, repo.clone())),
        ));
    }
    if rule.is_template {
        fields.push(FieldData::new(MetaField::Template, "Yes", None));
    } else if let Some(template_key) = &rule.template_key {
        fields.push(FieldData::new(
            MetaField::Template,
            format!("Custom rule from {}", template_key),
            None,
        ));
    }
    if let Some(created_at) = &rule.created_at {
        fields.push(FieldData::new(
            MetaField::CreatedAt,
            format_created_at(created_at),
            None,
        ));
    }

    MetaViewData {
        can_write: app.can_write,
        key: rule.key.clone(),
        name: rule.name.clone(),
        fields,
        sys_tags: rule.sys_tags.clone(),
        tags: rule.tags.clone(),
        all_tags: union_tags(&rule.sys_tags, &rule.tags),
        permalink: permalink(&app.base_url, &rule.key),
    }
}

/// `CODE_SMELL` -> `Code Smell`
fn humanize(raw: &str) -> String {
    raw.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let lower = w.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Server timestamps look like `2013-03-27T09:52:40+0100`
fn format_created_at(raw: &str) -> String {
    DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z")
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .map(|dt| dt.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|_| raw.to_string())
}
