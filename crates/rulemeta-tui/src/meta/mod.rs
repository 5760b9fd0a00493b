//! Rule metadata panel with inline tag editing

pub mod filter;
pub mod serialize;
pub mod session;
mod view;

pub use filter::{FilterProperty, RuleFilter, RuleQuery};
pub use serialize::{FieldData, MetaField, MetaViewData};
pub use session::{EditSession, EditState, TagRegion};
pub use view::{RuleMetaView, TagUpdate, UpdateOutcome, VocabularyOutcome};

/// What the hosting application tells the view about its environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppContext {
    pub base_url: String,
    /// Whether the current user may edit rules
    pub can_write: bool,
}

impl AppContext {
    pub fn new(base_url: impl Into<String>, can_write: bool) -> Self {
        Self {
            base_url: base_url.into(),
            can_write,
        }
    }
}
