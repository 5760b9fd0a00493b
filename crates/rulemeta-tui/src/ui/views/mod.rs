pub mod rule_meta;

pub use rule_meta::render_rule_meta;
