use std::io::IsTerminal;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::error::AuthError;
use crate::oauth::{handle_callback, PendingLogins, ThreadsAuthBroker};

use super::output::{render_auth_url, render_profile, render_session, render_token, OutputMode};

fn is_tty() -> bool {
    std::io::stdout().is_terminal()
}

/// Print an authorization URL without contacting the provider.
pub fn run_login_url(broker: &ThreadsAuthBroker, state: Option<&str>, mode: OutputMode) {
    let (url, state) = broker.generate_auth_url(state);
    println!("{}", render_auth_url(&url, &state, mode, is_tty()));
}

/// Interactive login: open the browser, wait for the pasted callback URL.
pub async fn run_login(
    broker: &ThreadsAuthBroker,
    open_browser: bool,
    mode: OutputMode,
) -> Result<(), AuthError> {
    let pending = PendingLogins::default();
    let (url, _state) = pending.begin(broker).await;

    if !open_browser || webbrowser::open(&url).is_err() {
        if open_browser {
            tracing::warn!("Could not open browser automatically");
        }
        eprintln!("Visit this URL to authorize the application:\n{url}");
    }
    eprintln!(
        "After approving, paste the full URL you were redirected to ({}):",
        broker.redirect_uri()
    );

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .map_err(|e| AuthError::Callback(format!("Failed to read callback URL: {e}")))?;

    let session = handle_callback(broker, &pending, &line).await?;
    println!("{}", render_session(&session, mode, is_tty()));
    Ok(())
}

/// Complete a login from a callback URL whose state was issued earlier.
pub async fn run_callback(
    broker: &ThreadsAuthBroker,
    callback: &str,
    expected_state: &str,
    mode: OutputMode,
) -> Result<(), AuthError> {
    let pending = PendingLogins::default();
    pending.insert(expected_state).await;
    let session = handle_callback(broker, &pending, callback).await?;
    println!("{}", render_session(&session, mode, is_tty()));
    Ok(())
}

pub async fn run_exchange(
    broker: &ThreadsAuthBroker,
    code: &str,
    mode: OutputMode,
) -> Result<(), AuthError> {
    let token = broker.exchange_code_for_token(code).await?;
    println!("{}", render_token(&token, mode, is_tty()));
    Ok(())
}

pub async fn run_upgrade(
    broker: &ThreadsAuthBroker,
    short_token: &str,
    mode: OutputMode,
) -> Result<(), AuthError> {
    let token = broker.get_long_lived_token(short_token).await?;
    println!("{}", render_token(&token, mode, is_tty()));
    Ok(())
}

pub async fn run_refresh(
    broker: &ThreadsAuthBroker,
    long_token: &str,
    mode: OutputMode,
) -> Result<(), AuthError> {
    let token = broker.refresh_long_lived_token(long_token).await?;
    println!("{}", render_token(&token, mode, is_tty()));
    Ok(())
}

/// "Who am I" diagnostic for a stored token.
pub async fn run_me(
    broker: &ThreadsAuthBroker,
    token: Option<&str>,
    mode: OutputMode,
) -> Result<(), AuthError> {
    let token = token.filter(|t| !t.trim().is_empty()).ok_or_else(|| {
        AuthError::Configuration(
            "Missing access token: pass --token or set THREADS_ACCESS_TOKEN".to_string(),
        )
    })?;
    let profile = broker.test_token(token).await?;
    println!("{}", render_profile(&profile, mode, is_tty()));
    Ok(())
}
