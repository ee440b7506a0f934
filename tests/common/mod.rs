pub mod http_mock;

use std::time::Duration;

use threads_auth::{BrokerConfig, Endpoints, ThreadsAuthBroker};
use wiremock::MockServer;

pub const APP_ID: &str = "X";
pub const APP_SECRET: &str = "app-secret";
pub const REDIRECT_URI: &str = "https://example.com/cb";

/// Broker whose Graph API calls go to the mock server.
pub fn broker_for(server: &MockServer) -> ThreadsAuthBroker {
    broker_with_timeout(server, Duration::from_secs(5))
}

pub fn broker_with_timeout(server: &MockServer, timeout: Duration) -> ThreadsAuthBroker {
    let config = BrokerConfig::new(APP_ID, APP_SECRET, REDIRECT_URI)
        .with_endpoints(Endpoints::with_graph_base(&server.uri()))
        .with_timeout(timeout);
    ThreadsAuthBroker::new(config).unwrap()
}

/// Decode an `application/x-www-form-urlencoded` request body into pairs.
#[allow(dead_code)]
pub fn form_pairs(body: &[u8]) -> Vec<(String, String)> {
    let query = String::from_utf8_lossy(body);
    reqwest::Url::parse(&format!("http://localhost/?{query}"))
        .unwrap()
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}
