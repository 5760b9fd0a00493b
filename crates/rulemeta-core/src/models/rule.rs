use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// A static-analysis rule as returned by `/api/rules/show`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub repo: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub lang_name: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "type", default)]
    pub rule_type: Option<String>,
    /// Server timestamp, e.g. `2016-01-04T10:21:35+0100`
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub is_template: bool,
    #[serde(default)]
    pub template_key: Option<String>,
    /// User-editable tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Server-assigned tags, read-only from the client
    #[serde(default)]
    pub sys_tags: Vec<String>,
}

impl Rule {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn with_tags(mut self, tags: Vec<String>, sys_tags: Vec<String>) -> Self {
        self.tags = tags;
        self.sys_tags = sys_tags;
        self
    }
}

/// Observable holder for the rule being displayed.
///
/// Subscribers receive a revision counter that moves on every change, which
/// is what the view listens to in order to re-render.
#[derive(Debug)]
pub struct RuleModel {
    rule: Rule,
    revision: watch::Sender<u64>,
}

impl RuleModel {
    pub fn new(rule: Rule) -> Self {
        let (revision, _) = watch::channel(0);
        Self { rule, revision }
    }

    pub fn get(&self) -> &Rule {
        &self.rule
    }

    pub fn key(&self) -> &str {
        &self.rule.key
    }

    pub fn tags(&self) -> &[String] {
        &self.rule.tags
    }

    pub fn sys_tags(&self) -> &[String] {
        &self.rule.sys_tags
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Receive change notifications
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Replace the custom tags. Returns true (and notifies) only when the
    /// value actually changed.
    pub fn set_tags(&mut self, tags: Vec<String>) -> bool {
        if self.rule.tags == tags {
            return false;
        }
        self.rule.tags = tags;
        self.notify();
        true
    }

    /// Replace the whole rule, e.g. after a reload
    pub fn replace(&mut self, rule: Rule) -> bool {
        if self.rule == rule {
            return false;
        }
        self.rule = rule;
        self.notify();
        true
    }

    fn notify(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_show_payload() {
        let json = r#"{
            "key": "squid:S1067",
            "repo": "squid",
            "name": "Expressions should not be too complex",
            "createdAt": "2013-03-27T09:52:40+0100",
            "severity": "CRITICAL",
            "status": "READY",
            "isTemplate": false,
            "tags": ["brain-overload"],
            "sysTags": ["cwe"],
            "lang": "java",
            "langName": "Java",
            "type": "CODE_SMELL"
        }"#;
        let rule: Rule = serde_json::from_str(json).unwrap();
        assert_eq!(rule.key, "squid:S1067");
        assert_eq!(rule.repo.as_deref(), Some("squid"));
        assert_eq!(rule.lang_name.as_deref(), Some("Java"));
        assert_eq!(rule.rule_type.as_deref(), Some("CODE_SMELL"));
        assert_eq!(rule.tags, vec!["brain-overload".to_string()]);
        assert_eq!(rule.sys_tags, vec!["cwe".to_string()]);
        assert!(!rule.is_template);
    }

    #[test]
    fn test_parse_minimal_rule_defaults_tags() {
        let rule: Rule = serde_json::from_str(r#"{"key": "S1"}"#).unwrap();
        assert!(rule.tags.is_empty());
        assert!(rule.sys_tags.is_empty());
        assert!(rule.severity.is_none());
    }

    #[test]
    fn test_set_tags_notifies_only_on_change() {
        let mut model = RuleModel::new(Rule::new("S1").with_tags(vec!["bug".into()], vec![]));
        let mut rx = model.subscribe();

        assert!(!model.set_tags(vec!["bug".into()]));
        assert!(!rx.has_changed().unwrap());
        assert_eq!(model.revision(), 0);

        assert!(model.set_tags(vec!["bug".into(), "perf".into()]));
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), 1);
        assert_eq!(model.tags(), ["bug".to_string(), "perf".to_string()]);
    }

    #[test]
    fn test_replace_rule() {
        let mut model = RuleModel::new(Rule::new("S1"));
        assert!(!model.replace(Rule::new("S1")));
        assert!(model.replace(Rule::new("S1").with_tags(vec![], vec!["cwe".into()])));
        assert_eq!(model.sys_tags(), ["cwe".to_string()]);
        assert_eq!(model.revision(), 1);
    }
}
