//! Tooltip layer for panel fields
//!
//! A terminal has no hover, so tooltips attach to focusable fields and the
//! footer shows the one belonging to the focused field. Views activate the
//! layer when they render and deactivate it when they are torn down.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipTarget {
    pub id: String,
    pub text: String,
}

impl TooltipTarget {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct TooltipLayer {
    targets: Vec<TooltipTarget>,
    active: bool,
}

impl TooltipLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the registered targets and start showing tooltips
    pub fn activate(&mut self, targets: Vec<TooltipTarget>) {
        self.targets = targets;
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.targets.clear();
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn hint_for(&self, id: &str) -> Option<&str> {
        if !self.active {
            return None;
        }
        self.targets
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_only_while_active() {
        let mut layer = TooltipLayer::new();
        assert!(layer.hint_for("severity").is_none());

        layer.activate(vec![TooltipTarget::new("severity", "Severity")]);
        assert_eq!(layer.hint_for("severity"), Some("Severity"));
        assert!(layer.hint_for("status").is_none());

        layer.deactivate();
        assert!(!layer.is_active());
        assert!(layer.is_empty());
        assert!(layer.hint_for("severity").is_none());
    }

    #[test]
    fn test_activate_replaces_targets() {
        let mut layer = TooltipLayer::new();
        layer.activate(vec![TooltipTarget::new("a", "A"), TooltipTarget::new("b", "B")]);
        layer.activate(vec![TooltipTarget::new("c", "C")]);
        assert_eq!(layer.len(), 1);
        assert!(layer.hint_for("a").is_none());
    }
}
