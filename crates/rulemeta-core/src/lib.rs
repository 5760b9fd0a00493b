pub mod api;
pub mod config;
pub mod constants;
pub mod models;
pub mod permalink;
pub mod tracing_setup;

// Re-export the types most callers need at crate root
pub use api::{HttpRulesClient, RulesApi, RulesApiError};
pub use config::CoreConfig;
pub use models::{Rule, RuleModel};
