pub mod rule;
pub mod tag_set;

pub use rule::{Rule, RuleModel};
pub use tag_set::{assignable_tags, dedup_tags, union_tags};
