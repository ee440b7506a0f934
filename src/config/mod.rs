pub mod env;
pub mod types;

pub use env::{config_from_env, config_from_lookup, resolve_redirect_uri};
pub use types::{BrokerConfig, Endpoints};
