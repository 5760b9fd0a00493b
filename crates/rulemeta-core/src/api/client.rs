use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{RulesApi, RulesApiError};
use crate::config::CoreConfig;
use crate::constants::paths;
use crate::models::Rule;

/// Response from `/api/rules/show`
#[derive(Debug, Deserialize)]
struct ShowResponse {
    rule: Rule,
}

/// Response from `/api/rules/tags`
#[derive(Debug, Deserialize)]
struct TagsResponse {
    tags: Vec<String>,
}

/// Response from `/api/rules/update`; only the stored tags matter here
#[derive(Debug, Deserialize)]
struct UpdateResponse {
    rule: UpdatedRule,
}

#[derive(Debug, Deserialize)]
struct UpdatedRule {
    tags: Vec<String>,
}

/// HTTP client for the rules web API
#[derive(Debug, Clone)]
pub struct HttpRulesClient {
    base_url: String,
    token: Option<String>,
    client: Client,
}

impl HttpRulesClient {
    pub fn new(config: &CoreConfig) -> Result<Self, RulesApiError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            base_url: config.normalized_base_url().to_string(),
            token: config.token.clone(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            // Tokens go in the user name with an empty password
            Some(token) => request.basic_auth(token, None::<&str>),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, RulesApiError> {
        let response = self.authorize(request).send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, RulesApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(RulesApiError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| RulesApiError::Decode(e.to_string()))
}

#[async_trait]
impl RulesApi for HttpRulesClient {
    async fn show_rule(&self, key: &str) -> Result<Rule, RulesApiError> {
        tracing::debug!(rule_key = key, "Fetching rule");
        let request = self
            .client
            .get(self.url(paths::RULES_SHOW))
            .query(&[("key", key)]);
        let response: ShowResponse = self.send(request).await?;
        Ok(response.rule)
    }

    async fn fetch_tags(&self) -> Result<Vec<String>, RulesApiError> {
        tracing::debug!("Fetching tag vocabulary");
        let request = self.client.get(self.url(paths::RULES_TAGS));
        let response: TagsResponse = self.send(request).await?;
        Ok(response.tags)
    }

    async fn update_tags(&self, key: &str, tags: &[String]) -> Result<Vec<String>, RulesApiError> {
        tracing::debug!(rule_key = key, ?tags, "Submitting rule tags");
        let joined = tags.join(",");
        let request = self
            .client
            .post(self.url(paths::RULES_UPDATE))
            .form(&[("key", key), ("tags", joined.as_str())]);
        let response: UpdateResponse = self.send(request).await?;
        Ok(response.rule.tags)
    }
}
