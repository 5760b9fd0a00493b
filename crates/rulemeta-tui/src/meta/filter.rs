//! Filter-click delegation
//!
//! Clicking a filterable value (language, repository, tag, ...) asks the
//! host to search for similar rules. Views opt in by implementing
//! [`RuleFilter`]; the default handler queues a [`RuleQuery`] the host
//! drains after each event.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterProperty {
    Languages,
    Repositories,
    Severities,
    Statuses,
    Tags,
    Types,
}

impl FilterProperty {
    /// Search parameter name in the rule browser
    pub fn param(&self) -> &'static str {
        match self {
            FilterProperty::Languages => "languages",
            FilterProperty::Repositories => "repositories",
            FilterProperty::Severities => "severities",
            FilterProperty::Statuses => "statuses",
            FilterProperty::Tags => "tags",
            FilterProperty::Types => "types",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleQuery {
    pub property: FilterProperty,
    pub value: String,
}

impl RuleQuery {
    pub fn new(property: FilterProperty, value: impl Into<String>) -> Self {
        Self {
            property,
            value: value.into(),
        }
    }
}

impl fmt::Display for RuleQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.property.param(), self.value)
    }
}

pub trait RuleFilter {
    /// Where clicked filters wait for the host
    fn filter_queue(&mut self) -> &mut Vec<RuleQuery>;

    fn on_filter_click(&mut self, query: RuleQuery) {
        tracing::debug!(filter = %query, "Rule filter clicked");
        let queue = self.filter_queue();
        if !queue.contains(&query) {
            queue.push(query);
        }
    }

    fn take_filters(&mut self) -> Vec<RuleQuery> {
        std::mem::take(self.filter_queue())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Host {
        queue: Vec<RuleQuery>,
    }

    impl RuleFilter for Host {
        fn filter_queue(&mut self) -> &mut Vec<RuleQuery> {
            &mut self.queue
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(
            RuleQuery::new(FilterProperty::Tags, "bug").to_string(),
            "tags=bug"
        );
        assert_eq!(
            RuleQuery::new(FilterProperty::Repositories, "squid").to_string(),
            "repositories=squid"
        );
    }

    #[test]
    fn test_click_queues_once_and_drains() {
        let mut host = Host::default();
        host.on_filter_click(RuleQuery::new(FilterProperty::Languages, "java"));
        host.on_filter_click(RuleQuery::new(FilterProperty::Languages, "java"));
        host.on_filter_click(RuleQuery::new(FilterProperty::Tags, "cwe"));

        let drained = host.take_filters();
        assert_eq!(drained.len(), 2);
        assert!(host.take_filters().is_empty());
    }
}
