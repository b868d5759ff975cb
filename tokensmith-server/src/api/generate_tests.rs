use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use crate::router::build_router;
use crate::test_helpers::test_app_state;

fn test_server() -> (TestServer, tempfile::TempDir) {
    let (state, scratch) = test_app_state();
    let server = TestServer::new(build_router(state)).expect("failed to start test server");
    (server, scratch)
}

fn tokens(bg: &str) -> Value {
    json!({
        "colors.json": {"color": {"$type": "color", "bg": {"$value": bg}, "fg": {"$value": "{color.bg}"}}},
        "dark/colors.json": {"color": {"bg": {"$value": "#111"}}}
    })
}

#[tokio::test]
async fn test_health() {
    let (server, _scratch) = test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "ok");
}

#[tokio::test]
async fn test_generate_returns_base_and_dark_css() {
    let (server, _scratch) = test_server();

    let response = server.post("/generate").json(&tokens("#fafafa")).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    let base = body["baseCSS"].as_str().expect("baseCSS");
    assert!(base.contains("@theme {"), "{base}");
    assert!(base.contains("--color-bg: #fafafa;"), "{base}");
    assert!(base.contains("--color-fg: var(--color-bg);"), "{base}");
    let dark = body["darkCSS"].as_str().expect("darkCSS");
    assert!(dark.contains(".dark {"), "{dark}");
    assert!(dark.contains("--color-bg: #111;"), "{dark}");
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn test_failed_generation_serves_last_good_css() {
    let (server, _scratch) = test_server();

    let good: Value = server.post("/generate").json(&tokens("#fafafa")).await.json();

    let response = server
        .post("/generate")
        .json(&json!({"../outside.json": {"color": {"bg": {"$value": "#000"}}}}))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body["error"]["message"].as_str().expect("message").contains("outside.json"));
    assert_eq!(body["baseCSS"], good["baseCSS"]);
    assert_eq!(body["darkCSS"], good["darkCSS"]);
}

#[tokio::test]
async fn test_failure_without_history_has_no_css() {
    let (server, _scratch) = test_server();

    let response = server.post("/generate").json(&json!({"readme.md": {}})).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body.get("baseCSS").is_none());
    assert!(body.get("darkCSS").is_none());
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let (server, _scratch) = test_server();

    let response = server.post("/generate").json(&json!(["not", "a", "map"])).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body["error"]["message"].is_string());
}
