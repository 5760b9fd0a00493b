#[derive(Debug, thiserror::Error)]
pub enum RulesApiError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response: {0}")]
    Decode(String),
}

impl RulesApiError {
    /// Short text for the status bar
    pub fn summary(&self) -> String {
        match self {
            RulesApiError::Transport(e) if e.is_timeout() => "request timed out".to_string(),
            RulesApiError::Transport(e) if e.is_connect() => "server unreachable".to_string(),
            RulesApiError::Transport(_) => "network error".to_string(),
            RulesApiError::Status { status, .. } => format!("HTTP {}", status),
            RulesApiError::Decode(_) => "unexpected response".to_string(),
        }
    }
}
