use crate::error::AuthError;
use crate::oauth::state::PendingLogins;

/// Query parameters the provider appends to the redirect URI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl CallbackParams {
    /// Parse a full callback URL, a path with query, or a bare query string.
    pub fn parse(input: &str) -> Result<Self, AuthError> {
        let input = input.trim();
        let url = match reqwest::Url::parse(input) {
            Ok(url) => url,
            Err(_) => {
                let query = input.split_once('?').map_or(input, |(_, q)| q);
                reqwest::Url::parse(&format!("http://localhost/?{query}")).map_err(|e| {
                    AuthError::Callback(format!("Cannot parse callback '{input}': {e}"))
                })?
            }
        };

        let mut params = CallbackParams::default();
        for (key, value) in url.query_pairs() {
            let value = value.into_owned();
            match key.as_ref() {
                "code" => params.code = Some(value),
                "state" => params.state = Some(value),
                "error" => params.error = Some(value),
                "error_description" => params.error_description = Some(value),
                _ => {}
            }
        }
        Ok(params)
    }

    /// Check the callback against the issued states and return the code.
    ///
    /// The state is consumed even when the code turns out to be missing, so a
    /// rejected callback cannot be replayed.
    pub async fn verify(self, pending: &PendingLogins) -> Result<String, AuthError> {
        if let Some(error) = self.error {
            let detail = self
                .error_description
                .map(|d| format!(" ({d})"))
                .unwrap_or_default();
            return Err(AuthError::Callback(format!(
                "Authorization failed: {error}{detail}"
            )));
        }

        let state = self
            .state
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AuthError::Callback("Missing state parameter".to_string()))?;
        pending.take(&state).await?;

        self.code
            .filter(|c| !c.is_empty())
            .ok_or_else(|| AuthError::Callback("Missing authorization code".to_string()))
    }
}
