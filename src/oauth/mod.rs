pub mod broker;
pub mod callback;
pub mod csrf;
pub mod flow;
pub mod state;
pub mod token;

pub use broker::{ThreadsAuthBroker, PROFILE_FIELDS, SCOPES};
pub use callback::CallbackParams;
pub use csrf::generate_state;
pub use flow::{complete_login, handle_callback, AuthorizedSession};
pub use state::{PendingLogin, PendingLogins};
pub use token::{Profile, Token};
