use serde::de::DeserializeOwned;

use crate::config::{config_from_env, BrokerConfig};
use crate::error::AuthError;
use crate::oauth::csrf::generate_state;
use crate::oauth::token::{Profile, Token};

/// Scopes requested on every authorization.
pub const SCOPES: &str = "threads_basic,threads_manage_insights";

/// Profile fields requested when validating a token.
pub const PROFILE_FIELDS: &str = "id,username,name,threads_profile_picture_url,threads_biography";

/// Drives the Threads authorization-code grant.
///
/// Holds only the immutable client credentials and a pooled HTTP client, so a
/// single broker can be shared across tasks. Every call is one outbound
/// request bounded by the configured timeout; nothing is retried.
#[derive(Debug, Clone)]
pub struct ThreadsAuthBroker {
    config: BrokerConfig,
    authorize_url: reqwest::Url,
    client: reqwest::Client,
}

impl ThreadsAuthBroker {
    pub fn new(config: BrokerConfig) -> Result<Self, AuthError> {
        if config.app_id.trim().is_empty() || config.app_secret.trim().is_empty() {
            return Err(AuthError::Configuration(
                "Missing app_id or app_secret".to_string(),
            ));
        }
        if config.redirect_uri.trim().is_empty() {
            return Err(AuthError::Configuration(
                "Missing redirect_uri".to_string(),
            ));
        }

        let authorize_url = reqwest::Url::parse(&config.endpoints.authorize_url).map_err(|e| {
            AuthError::Configuration(format!(
                "Invalid authorize URL '{}': {e}",
                config.endpoints.authorize_url
            ))
        })?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AuthError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            config,
            authorize_url,
            client,
        })
    }

    /// Construct from `THREADS_APP_ID`, `THREADS_APP_SECRET` and `VERCEL_URL`.
    pub fn from_env() -> Result<Self, AuthError> {
        Self::new(config_from_env()?)
    }

    pub fn config(&self) -> &BrokerConfig {
        &self.config
    }

    pub fn redirect_uri(&self) -> &str {
        &self.config.redirect_uri
    }

    /// Build the authorization URL the user is sent to.
    ///
    /// Returns the URL together with the state embedded in it; a fresh random
    /// state is generated when none is supplied. Does not touch the network.
    pub fn generate_auth_url(&self, state: Option<&str>) -> (String, String) {
        let state = state.map_or_else(generate_state, str::to_string);

        let mut url = self.authorize_url.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.config.app_id)
            .append_pair("redirect_uri", &self.config.redirect_uri)
            .append_pair("scope", SCOPES)
            .append_pair("response_type", "code")
            .append_pair("state", &state);

        (url.into(), state)
    }

    /// Trade an authorization code for a short-lived access token.
    pub async fn exchange_code_for_token(&self, code: &str) -> Result<Token, AuthError> {
        let url = self.config.endpoints.token_url();
        tracing::debug!(endpoint = %url, "exchanging authorization code");

        let request = self.client.post(&url).form(&[
            ("client_id", self.config.app_id.as_str()),
            ("client_secret", self.config.app_secret.as_str()),
            ("grant_type", "authorization_code"),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("code", code),
        ]);
        self.send("code exchange", request).await
    }

    /// Upgrade a short-lived token to a 60-day token.
    pub async fn get_long_lived_token(&self, short_token: &str) -> Result<Token, AuthError> {
        let url = self.config.endpoints.exchange_url();
        tracing::debug!(endpoint = %url, "requesting long-lived token");

        let request = self.client.get(&url).query(&[
            ("grant_type", "th_exchange_token"),
            ("client_secret", self.config.app_secret.as_str()),
            ("access_token", short_token),
        ]);
        self.send("long-lived upgrade", request).await
    }

    /// Extend a long-lived token. The token must not have expired yet.
    pub async fn refresh_long_lived_token(&self, long_token: &str) -> Result<Token, AuthError> {
        let url = self.config.endpoints.refresh_url();
        tracing::debug!(endpoint = %url, "refreshing long-lived token");

        let request = self.client.get(&url).query(&[
            ("grant_type", "th_refresh_token"),
            ("access_token", long_token),
        ]);
        self.send("token refresh", request).await
    }

    /// Fetch the token owner's profile, proving the token works.
    pub async fn test_token(&self, access_token: &str) -> Result<Profile, AuthError> {
        let url = self.config.endpoints.profile_url();
        tracing::debug!(endpoint = %url, "fetching profile");

        let request = self.client.get(&url).query(&[
            ("fields", PROFILE_FIELDS),
            ("access_token", access_token),
        ]);
        self.send("profile fetch", request).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        step: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, AuthError> {
        let resp = request.send().await.map_err(|e| {
            tracing::warn!(step, error = %e, "Threads API request failed");
            AuthError::from(e)
        })?;

        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();

        if !(200..300).contains(&status) {
            tracing::warn!(step, status, "Threads API returned an error");
            return Err(AuthError::Upstream { status, body });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(step, status, error = %e, "unexpected Threads API response body");
            AuthError::Upstream { status, body }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Endpoints;

    fn broker() -> ThreadsAuthBroker {
        ThreadsAuthBroker::new(BrokerConfig::new("X", "secret", "https://example.com/cb")).unwrap()
    }

    fn query_value(url: &str, key: &str) -> Option<String> {
        reqwest::Url::parse(url)
            .unwrap()
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    #[test]
    fn auth_url_with_explicit_state() {
        let (url, state) = broker().generate_auth_url(Some("s1"));
        assert_eq!(state, "s1");
        assert!(url.starts_with("https://threads.net/oauth/authorize?"));
        assert!(url.contains("client_id=X"));
        assert!(url.contains("redirect_uri=https%3A%2F%2Fexample.com%2Fcb"));
        assert!(url.contains("state=s1"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("scope=threads_basic%2Cthreads_manage_insights"));
        assert_eq!(query_value(&url, "scope").as_deref(), Some(SCOPES));
    }

    #[test]
    fn auth_url_generates_state_when_absent() {
        let b = broker();
        let (url_a, state_a) = b.generate_auth_url(None);
        let (url_b, state_b) = b.generate_auth_url(None);
        assert_ne!(state_a, state_b);
        assert_eq!(query_value(&url_a, "state").as_deref(), Some(state_a.as_str()));
        assert_eq!(query_value(&url_b, "state").as_deref(), Some(state_b.as_str()));
        assert_eq!(state_a.len(), 43);
    }

    #[test]
    fn auth_url_never_contains_secret() {
        let (url, _) = broker().generate_auth_url(None);
        assert!(!url.contains("secret"));
    }

    #[test]
    fn missing_app_id_fails_construction() {
        let err = ThreadsAuthBroker::new(BrokerConfig::new("", "secret", "https://example.com/cb"))
            .unwrap_err();
        assert!(matches!(err, AuthError::Configuration(_)));
    }

    #[test]
    fn missing_app_secret_fails_construction() {
        let err = ThreadsAuthBroker::new(BrokerConfig::new("X", "  ", "https://example.com/cb"))
            .unwrap_err();
        assert!(matches!(err, AuthError::Configuration(_)));
    }

    #[test]
    fn missing_redirect_uri_fails_construction() {
        let err = ThreadsAuthBroker::new(BrokerConfig::new("X", "secret", "")).unwrap_err();
        assert!(matches!(err, AuthError::Configuration(_)));
    }

    #[test]
    fn invalid_authorize_url_fails_construction() {
        let endpoints = Endpoints {
            authorize_url: "not a url".into(),
            ..Endpoints::default()
        };
        let config =
            BrokerConfig::new("X", "secret", "https://example.com/cb").with_endpoints(endpoints);
        let err = ThreadsAuthBroker::new(config).unwrap_err();
        assert!(err.to_string().contains("not a url"));
    }

    #[test]
    fn broker_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ThreadsAuthBroker>();
    }
}
