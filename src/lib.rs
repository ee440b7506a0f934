pub mod cli;
pub mod config;
pub mod error;
pub mod oauth;

pub use config::{config_from_env, resolve_redirect_uri, BrokerConfig, Endpoints};
pub use error::AuthError;
pub use oauth::{
    complete_login, handle_callback, AuthorizedSession, CallbackParams, PendingLogins, Profile,
    ThreadsAuthBroker, Token,
};
