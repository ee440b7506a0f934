use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mount `POST /oauth/access_token` answering with `response`.
#[allow(dead_code)]
pub async fn mount_code_exchange(server: &MockServer, response: ResponseTemplate, times: u64) {
    Mock::given(method("POST"))
        .and(path("/oauth/access_token"))
        .and(body_string_contains("grant_type=authorization_code"))
        .respond_with(response)
        .expect(times)
        .mount(server)
        .await;
}

/// Mount `GET /access_token` for the long-lived upgrade of `short_token`.
#[allow(dead_code)]
pub async fn mount_long_lived_upgrade(
    server: &MockServer,
    short_token: &str,
    response: ResponseTemplate,
    times: u64,
) {
    Mock::given(method("GET"))
        .and(path("/access_token"))
        .and(query_param("grant_type", "th_exchange_token"))
        .and(query_param("access_token", short_token))
        .respond_with(response)
        .expect(times)
        .mount(server)
        .await;
}

/// Mount `GET /v1.0/me` for `access_token`.
#[allow(dead_code)]
pub async fn mount_profile(
    server: &MockServer,
    access_token: &str,
    response: ResponseTemplate,
    times: u64,
) {
    Mock::given(method("GET"))
        .and(path("/v1.0/me"))
        .and(query_param("access_token", access_token))
        .respond_with(response)
        .expect(times)
        .mount(server)
        .await;
}

#[allow(dead_code)]
pub fn json_response(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}
