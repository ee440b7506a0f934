pub mod auth_cmd;
pub mod output;
