//! Rules web API
//!
//! [`RulesApi`] is the seam between the view and the network; the view
//! layer only ever sees this trait, so tests can drive it with an
//! in-memory implementation.

mod client;
mod error;

pub use client::HttpRulesClient;
pub use error::RulesApiError;

use async_trait::async_trait;

use crate::models::Rule;

#[async_trait]
pub trait RulesApi: Send + Sync {
    /// `GET /api/rules/show?key=`
    async fn show_rule(&self, key: &str) -> Result<Rule, RulesApiError>;

    /// `GET /api/rules/tags`: every tag the server accepts
    async fn fetch_tags(&self) -> Result<Vec<String>, RulesApiError>;

    /// `POST /api/rules/update` with `key` and `tags`.
    ///
    /// Returns the tags the server stored, which may differ from `tags`.
    async fn update_tags(&self, key: &str, tags: &[String]) -> Result<Vec<String>, RulesApiError>;
}
