use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::oauth::broker::ThreadsAuthBroker;
use crate::oauth::callback::CallbackParams;
use crate::oauth::state::PendingLogins;
use crate::oauth::token::{Profile, Token};

/// Outcome of a completed login: a validated long-lived token and its owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorizedSession {
    pub token: Token,
    pub profile: Profile,
}

/// Run the exchange chain for an authorization code.
///
/// Each step depends on the previous one, so the first failure ends the chain.
pub async fn complete_login(
    broker: &ThreadsAuthBroker,
    code: &str,
) -> Result<AuthorizedSession, AuthError> {
    // 1. Code for short-lived token
    let short = broker.exchange_code_for_token(code).await?;

    // 2. Upgrade to the 60-day token
    let token = broker.get_long_lived_token(short.access_token()).await?;

    // 3. Prove the long-lived token works
    let profile = broker.test_token(token.access_token()).await?;

    let user_id = profile.id().unwrap_or_default();
    tracing::info!(
        user_id = %user_id,
        username = profile.username().unwrap_or("<unknown>"),
        "Threads login complete"
    );
    Ok(AuthorizedSession { token, profile })
}

/// Verify an inbound redirect against the pending logins, then complete it.
pub async fn handle_callback(
    broker: &ThreadsAuthBroker,
    pending: &PendingLogins,
    callback: &str,
) -> Result<AuthorizedSession, AuthError> {
    let code = CallbackParams::parse(callback)?.verify(pending).await?;
    complete_login(broker, &code).await
}
