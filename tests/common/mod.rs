//! Common test utilities: mock upstream fixtures

use ember::client::HnClient;
use ember::config::{Config, UpstreamConfig};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Client pointed at a mock upstream with default limits
#[allow(dead_code)]
pub fn test_client(server: &MockServer) -> HnClient {
    let config = Config::default();
    HnClient::with_base_url(&server.uri(), &config.upstream).unwrap()
}

/// Client pointed at a mock upstream with adjusted limits
#[allow(dead_code)]
pub fn test_client_with(server: &MockServer, adjust: impl FnOnce(&mut UpstreamConfig)) -> HnClient {
    let mut config = Config::default();
    adjust(&mut config.upstream);
    HnClient::with_base_url(&server.uri(), &config.upstream).unwrap()
}

/// Mount the top-story id list
#[allow(dead_code)]
pub async fn mount_top_ids(server: &MockServer, ids: &[u64]) {
    Mock::given(method("GET"))
        .and(path("/v0/topstories.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ids))
        .mount(server)
        .await;
}

/// Mount a valid story record with the given score
#[allow(dead_code)]
pub async fn mount_story(server: &MockServer, id: u64, score: i64) {
    let body = json!({
        "id": id,
        "type": "story",
        "by": format!("user{id}"),
        "title": format!("Story {id}"),
        "score": score,
        "url": format!("https://example.com/{id}"),
        "time": 1_700_000_000 + id,
    });

    Mock::given(method("GET"))
        .and(path(format!("/v0/item/{id}.json")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mount a valid comment record with the given child ids
#[allow(dead_code)]
pub async fn mount_comment(server: &MockServer, id: u64, kids: &[u64]) {
    let mut body = json!({
        "id": id,
        "type": "comment",
        "by": format!("user{id}"),
        "text": format!("comment {id}"),
        "time": 1_700_000_000 + id,
    });
    if !kids.is_empty() {
        body["kids"] = json!(kids);
    }

    Mock::given(method("GET"))
        .and(path(format!("/v0/item/{id}.json")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mount an arbitrary item body
#[allow(dead_code)]
pub async fn mount_raw_item(server: &MockServer, id: u64, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/v0/item/{id}.json")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mount an item path that must never be fetched
#[allow(dead_code)]
pub async fn mount_forbidden_item(server: &MockServer, id: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/v0/item/{id}.json")))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .expect(0)
        .mount(server)
        .await;
}
