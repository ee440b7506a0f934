use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_AUTHORIZE_URL: &str = "https://threads.net/oauth/authorize";
pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.threads.net";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Provider endpoints. Defaults point at the production Threads API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    pub authorize_url: String,
    pub graph_base_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            authorize_url: DEFAULT_AUTHORIZE_URL.to_string(),
            graph_base_url: DEFAULT_GRAPH_BASE_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Point every Graph API call at `base_url`, keeping the authorize URL.
    pub fn with_graph_base(base_url: &str) -> Self {
        Self {
            graph_base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    pub fn token_url(&self) -> String {
        format!("{}/oauth/access_token", self.graph_base())
    }

    pub fn exchange_url(&self) -> String {
        format!("{}/access_token", self.graph_base())
    }

    pub fn refresh_url(&self) -> String {
        format!("{}/refresh_access_token", self.graph_base())
    }

    pub fn profile_url(&self) -> String {
        format!("{}/v1.0/me", self.graph_base())
    }

    fn graph_base(&self) -> &str {
        self.graph_base_url.trim_end_matches('/')
    }
}

/// Client credentials and transport settings for the token broker.
#[derive(Clone, Serialize, Deserialize)]
pub struct BrokerConfig {
    pub app_id: String,
    pub app_secret: String,
    pub redirect_uri: String,
    #[serde(default)]
    pub endpoints: Endpoints,
    #[serde(default = "default_timeout", with = "duration_ms")]
    pub timeout: Duration,
}

impl BrokerConfig {
    pub fn new(app_id: &str, app_secret: &str, redirect_uri: &str) -> Self {
        Self {
            app_id: app_id.to_string(),
            app_secret: app_secret.to_string(),
            redirect_uri: redirect_uri.to_string(),
            endpoints: Endpoints::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// Keep the secret out of logs and panic messages.
impl std::fmt::Debug for BrokerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrokerConfig")
            .field("app_id", &self.app_id)
            .field("app_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .field("endpoints", &self.endpoints)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(d)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoints_match_threads_api() {
        let ep = Endpoints::default();
        assert_eq!(ep.authorize_url, "https://threads.net/oauth/authorize");
        assert_eq!(
            ep.token_url(),
            "https://graph.threads.net/oauth/access_token"
        );
        assert_eq!(ep.exchange_url(), "https://graph.threads.net/access_token");
        assert_eq!(
            ep.refresh_url(),
            "https://graph.threads.net/refresh_access_token"
        );
        assert_eq!(ep.profile_url(), "https://graph.threads.net/v1.0/me");
    }

    #[test]
    fn graph_base_strips_trailing_slash() {
        let ep = Endpoints::with_graph_base("http://127.0.0.1:9999/");
        assert_eq!(ep.profile_url(), "http://127.0.0.1:9999/v1.0/me");
        assert_eq!(ep.authorize_url, DEFAULT_AUTHORIZE_URL);
    }

    #[test]
    fn debug_redacts_secret() {
        let cfg = BrokerConfig::new("app", "super-secret", "https://example.com/cb");
        let printed = format!("{cfg:?}");
        assert!(printed.contains("app"));
        assert!(!printed.contains("super-secret"));
    }

    #[test]
    fn deserialize_minimal_config_uses_defaults() {
        let json = r#"{
            "app_id": "123",
            "app_secret": "abc",
            "redirect_uri": "https://example.com/cb"
        }"#;
        let cfg: BrokerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.endpoints, Endpoints::default());
        assert_eq!(cfg.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn deserialize_timeout_in_millis() {
        let json = r#"{
            "app_id": "123",
            "app_secret": "abc",
            "redirect_uri": "https://example.com/cb",
            "timeout": 2500
        }"#;
        let cfg: BrokerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.timeout, Duration::from_millis(2500));
    }
}
