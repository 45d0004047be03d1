mod harness;

use harness::routes::app;
use harness::server::TestServer;
use panic_response::RecoveryConfig;

#[tokio::test]
async fn configured_json_layer() {
    let config = RecoveryConfig::from_toml(
        r#"
        format = "json_with_status"
        content_type = "application/problem+json"
        "#,
    )
    .unwrap();
    let server = TestServer::start(app().layer(config.layer().unwrap())).await.unwrap();

    let resp = server.client().get(server.url("/bad")).send().await.unwrap();

    assert_eq!(resp.status(), 400);
    assert_eq!(
        resp.headers().get("content-type").and_then(|v| v.to_str().ok()),
        Some("application/problem+json")
    );
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({"error": "user made a bad request", "status": 400, "explanation": "expected a number"})
    );
}

#[tokio::test]
async fn default_config_is_status_only() {
    let config = RecoveryConfig::from_toml("").unwrap();
    let server = TestServer::start(app().layer(config.layer().unwrap())).await.unwrap();

    let resp = server.client().get(server.url("/oops")).send().await.unwrap();

    assert_eq!(resp.status(), 500);
    assert_eq!(resp.text().await.unwrap(), "");
}
