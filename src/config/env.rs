use std::time::Duration;

use crate::error::AuthError;

use super::types::BrokerConfig;

pub const APP_ID_VAR: &str = "THREADS_APP_ID";
pub const APP_SECRET_VAR: &str = "THREADS_APP_SECRET";
pub const DEPLOYMENT_HOST_VAR: &str = "VERCEL_URL";
pub const TIMEOUT_VAR: &str = "THREADS_HTTP_TIMEOUT_MS";

/// Callback registered with the provider when no deployment host is known.
pub const FALLBACK_REDIRECT_URI: &str =
    "https://threads-insights-tool.vercel.app/auth/threads/callback";

const CALLBACK_PATH: &str = "/auth/threads/callback";

/// Derive the OAuth callback URL from the deployment hostname.
///
/// The host is used verbatim: the result must equal the URI registered with
/// the provider, otherwise the code exchange fails with a redirect mismatch.
pub fn resolve_redirect_uri(deployment_host: Option<&str>) -> String {
    match deployment_host.filter(|h| !h.is_empty()) {
        Some(host) => format!("https://{host}{CALLBACK_PATH}"),
        None => FALLBACK_REDIRECT_URI.to_string(),
    }
}

/// Build a [`BrokerConfig`] from the process environment.
pub fn config_from_env() -> Result<BrokerConfig, AuthError> {
    config_from_lookup(|key| std::env::var(key).ok())
}

/// Build a [`BrokerConfig`] from an arbitrary key lookup.
pub fn config_from_lookup<F>(lookup: F) -> Result<BrokerConfig, AuthError>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    let (Some(app_id), Some(app_secret)) = (non_empty(APP_ID_VAR), non_empty(APP_SECRET_VAR))
    else {
        return Err(AuthError::Configuration(format!(
            "Missing {APP_ID_VAR} or {APP_SECRET_VAR}"
        )));
    };

    let redirect_uri = resolve_redirect_uri(lookup(DEPLOYMENT_HOST_VAR).as_deref());
    let mut config = BrokerConfig::new(&app_id, &app_secret, &redirect_uri);

    if let Some(raw) = non_empty(TIMEOUT_VAR) {
        let ms: u64 = raw.trim().parse().map_err(|_| {
            AuthError::Configuration(format!(
                "{TIMEOUT_VAR} must be a number of milliseconds, got '{raw}'"
            ))
        })?;
        config = config.with_timeout(Duration::from_millis(ms));
    }

    Ok(config)
}
