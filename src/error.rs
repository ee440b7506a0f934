#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Threads API returned status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Callback rejected: {0}")]
    Callback(String),
}

impl AuthError {
    /// Error code string for structured JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::Configuration(_) => "configuration_error",
            AuthError::Upstream { .. } => "upstream_error",
            AuthError::Network(_) => "network_error",
            AuthError::Callback(_) => "callback_rejected",
        }
    }

    /// HTTP status reported by the provider, if the failure came from one.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            AuthError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut obj = serde_json::Map::new();
        if let Some(status) = self.upstream_status() {
            obj.insert("status".into(), serde_json::Value::from(status));
        }
        obj.insert("message".into(), serde_json::Value::String(self.to_string()));
        obj.insert("code".into(), serde_json::Value::String(self.code().to_string()));
        serde_json::json!({ "error": obj })
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AuthError::Network(format!("request timed out: {err}"))
        } else {
            AuthError::Network(err.to_string())
        }
    }
}
