use colored::Colorize;

use crate::error::AuthError;
use crate::oauth::{AuthorizedSession, Profile, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Pretty,
    Json,
}

impl OutputMode {
    pub fn from_flag(json: bool) -> Self {
        if json {
            OutputMode::Json
        } else {
            OutputMode::Pretty
        }
    }
}

pub fn render_auth_url(url: &str, state: &str, mode: OutputMode, is_tty: bool) -> String {
    match mode {
        OutputMode::Json => to_pretty_json(&serde_json::json!({
            "auth_url": url,
            "state": state,
        })),
        OutputMode::Pretty => {
            let url = if is_tty {
                url.underline().to_string()
            } else {
                url.to_string()
            };
            format!("Visit this URL to authorize the application:\n{url}\nstate: {state}")
        }
    }
}

pub fn render_token(token: &Token, mode: OutputMode, is_tty: bool) -> String {
    match mode {
        OutputMode::Json => to_pretty_json(token),
        OutputMode::Pretty => {
            let mut lines = vec![label("access_token", is_tty) + token.access_token()];
            if let Some(kind) = token.token_type() {
                lines.push(label("token_type", is_tty) + kind);
            }
            if let Some(expires_at) = token.expires_at(chrono::Utc::now()) {
                lines.push(label("expires_at", is_tty) + &expires_at.to_rfc3339());
            }
            lines.join("\n")
        }
    }
}

pub fn render_profile(profile: &Profile, mode: OutputMode, is_tty: bool) -> String {
    match mode {
        OutputMode::Json => to_pretty_json(profile),
        OutputMode::Pretty => {
            let unknown = "Unknown";
            [
                label("username", is_tty) + profile.username().unwrap_or(unknown),
                label("name", is_tty) + profile.name().unwrap_or(unknown),
                label("user id", is_tty) + &profile.id().unwrap_or_else(|| unknown.to_string()),
            ]
            .join("\n")
        }
    }
}

pub fn render_session(session: &AuthorizedSession, mode: OutputMode, is_tty: bool) -> String {
    match mode {
        OutputMode::Json => to_pretty_json(session),
        OutputMode::Pretty => {
            let heading = if is_tty {
                "Threads authorization successful".green().bold().to_string()
            } else {
                "Threads authorization successful".to_string()
            };
            format!(
                "{heading}\n{}\n\n{}\n\nStore this token as THREADS_ACCESS_TOKEN.",
                render_profile(&session.profile, mode, is_tty),
                render_token(&session.token, mode, is_tty),
            )
        }
    }
}

pub fn print_error(err: &AuthError, json_mode: bool) {
    if json_mode {
        println!("{}", to_pretty_json(&err.to_json()));
    } else {
        let prefix = if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
            "Error".red().bold().to_string()
        } else {
            "Error".to_string()
        };
        eprintln!("{prefix}: {err}");
    }
}

fn label(name: &str, is_tty: bool) -> String {
    let text = format!("{name}: ");
    if is_tty {
        text.bold().to_string()
    } else {
        text
    }
}

fn to_pretty_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}
