use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::error::AuthError;
use crate::oauth::broker::ThreadsAuthBroker;

pub const DEFAULT_PENDING_TTL: Duration = Duration::from_secs(600);

/// A login attempt waiting for its callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLogin {
    pub state: String,
    pub created_at: DateTime<Utc>,
}

/// Short-lived record of issued CSRF states.
///
/// Each state is accepted exactly once and only before its TTL elapses.
pub struct PendingLogins {
    ttl: chrono::Duration,
    entries: Mutex<HashMap<String, PendingLogin>>,
}

impl Default for PendingLogins {
    fn default() -> Self {
        Self::new(DEFAULT_PENDING_TTL)
    }
}

impl PendingLogins {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX),
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Generate an authorization URL and remember its state.
    pub async fn begin(&self, broker: &ThreadsAuthBroker) -> (String, String) {
        let (url, state) = broker.generate_auth_url(None);
        self.insert(&state).await;
        (url, state)
    }

    pub async fn insert(&self, state: &str) {
        self.insert_at(state, Utc::now()).await;
    }

    async fn insert_at(&self, state: &str, created_at: DateTime<Utc>) {
        let now = Utc::now();
        let mut entries = self.entries.lock().await;
        entries.retain(|_, pending| !self.is_expired(pending, now));
        entries.insert(
            state.to_string(),
            PendingLogin {
                state: state.to_string(),
                created_at,
            },
        );
    }

    /// Consume the pending login for `state`.
    pub async fn take(&self, state: &str) -> Result<PendingLogin, AuthError> {
        let mut entries = self.entries.lock().await;
        let pending = entries.remove(state).ok_or_else(|| {
            AuthError::Callback("Unknown or already used state parameter".to_string())
        })?;

        if self.is_expired(&pending, Utc::now()) {
            tracing::debug!(created_at = %pending.created_at, "rejecting expired login state");
            return Err(AuthError::Callback(
                "Login attempt expired, start again".to_string(),
            ));
        }
        Ok(pending)
    }

    /// Drop every entry older than the TTL. Returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, pending| !self.is_expired(pending, now));
        before - entries.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    fn is_expired(&self, pending: &PendingLogin, now: DateTime<Utc>) -> bool {
        now - pending.created_at >= self.ttl
    }
}
