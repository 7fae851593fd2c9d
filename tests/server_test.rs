//! End-to-end tests for the HTTP surface.
//!
//! Each test binds the router to an ephemeral port and drives it with a
//! real HTTP client. Upstream Render behavior is played by a second local
//! server so no test touches the network.

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use logdoctor::auth::AllowList;
use logdoctor::config::Config;
use logdoctor::config::secrets::SecretString;
use logdoctor::render::RenderClient;
use logdoctor::server::{self, AppState};
use serde_json::Value;

fn test_config(token: &str, service_id: &str, allowed_keys: &str) -> Config {
    Config {
        api_token: SecretString::from(token),
        service_id: service_id.to_string(),
        allow_list: AllowList::parse(allowed_keys),
        port: 0,
        otel_endpoint: None,
    }
}

/// Serve the app on an ephemeral port, upstream pointed at `base_url`.
async fn spawn_app(config: Config, base_url: &str) -> String {
    let render = RenderClient::with_base_url(&config, base_url).expect("client");
    let state = AppState::with_client(config, render);
    let app = server::router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind app");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve app");
    });
    format!("http://{addr}")
}

/// Stand-in for the Render API: one logs route with a fixed response.
async fn spawn_upstream(status: StatusCode, body: &'static str) -> String {
    let app = Router::new().route(
        "/services/{id}/logs",
        get(move || async move { (status, body) }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind upstream");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve upstream");
    });
    format!("http://{addr}")
}

/// An upstream base URL that must never be contacted. Port 1 refuses
/// connections, so an accidental fetch shows up as a 500 transport error.
const UNREACHABLE_UPSTREAM: &str = "http://127.0.0.1:1";

// ---------------------------------------------------------------------------
// Probes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_service_name_without_auth() {
    let app = spawn_app(test_config("", "", "k1"), UNREACHABLE_UPSTREAM).await;

    let resp = reqwest::get(format!("{app}/health")).await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "logdoctor");
}

#[tokio::test]
async fn ready_is_false_without_credentials() {
    let app = spawn_app(test_config("", "srv-1", ""), UNREACHABLE_UPSTREAM).await;

    let resp = reqwest::get(format!("{app}/ready")).await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ready"], false);
}

#[tokio::test]
async fn ready_is_true_with_both_credentials() {
    let app = spawn_app(test_config("tok", "srv-1", ""), UNREACHABLE_UPSTREAM).await;

    let body: Value = reqwest::get(format!("{app}/ready"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["ready"], true);
}

// ---------------------------------------------------------------------------
// /debug
// ---------------------------------------------------------------------------

#[tokio::test]
async fn debug_with_supplied_logs_skips_upstream() {
    let app = spawn_app(test_config("", "", ""), UNREACHABLE_UPSTREAM).await;

    let resp = reqwest::Client::new()
        .post(format!("{app}/debug"))
        .json(&serde_json::json!({
            "logs": "Error: permission denied while writing file"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");

    let diagnostics = body["diagnostics"].as_array().unwrap();
    let fixes = body["suggested_fixes"].as_array().unwrap();
    assert_eq!(diagnostics.len(), fixes.len());
    assert!(
        diagnostics[0]
            .as_str()
            .unwrap()
            .starts_with("Permission denied")
    );
    assert!(body["note"].as_str().unwrap().contains("heuristic"));
}

#[tokio::test]
async fn debug_without_body_fetches_logs_upstream() {
    let upstream = spawn_upstream(StatusCode::OK, "SyntaxError: invalid syntax").await;
    let app = spawn_app(test_config("tok", "srv-1", ""), &upstream).await;

    let resp = reqwest::Client::new()
        .post(format!("{app}/debug"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    let diagnostics = body["diagnostics"].as_array().unwrap();
    assert!(
        diagnostics[0]
            .as_str()
            .unwrap()
            .starts_with("SyntaxError detected")
    );
}

#[tokio::test]
async fn debug_rejects_key_not_in_allow_list() {
    let app = spawn_app(test_config("", "", "a,b"), UNREACHABLE_UPSTREAM).await;

    let resp = reqwest::Client::new()
        .post(format!("{app}/debug"))
        .header("X-API-KEY", "c")
        .json(&serde_json::json!({"logs": "whatever"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn debug_accepts_listed_key() {
    let app = spawn_app(test_config("", "", "a,b"), UNREACHABLE_UPSTREAM).await;

    let resp = reqwest::Client::new()
        .post(format!("{app}/debug"))
        .header("X-API-KEY", "a")
        .json(&serde_json::json!({"logs": "all fine"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

// ---------------------------------------------------------------------------
// /logs
// ---------------------------------------------------------------------------

#[tokio::test]
async fn logs_passes_through_upstream_body() {
    let upstream = spawn_upstream(StatusCode::OK, "==> build started\n==> build ok").await;
    let app = spawn_app(test_config("tok", "srv-1", ""), &upstream).await;

    let resp = reqwest::get(format!("{app}/logs")).await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["logs"], "==> build started\n==> build ok");
}

#[tokio::test]
async fn logs_maps_upstream_failure_to_error_envelope() {
    let upstream = spawn_upstream(StatusCode::INTERNAL_SERVER_ERROR, "boom").await;
    let app = spawn_app(test_config("tok", "srv-1", ""), &upstream).await;

    let resp = reqwest::get(format!("{app}/logs")).await.unwrap();
    assert_eq!(resp.status(), 500);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "error");
    assert!(body["error"].as_str().unwrap().contains("500"));
    assert!(body["trace"].is_string());
}

#[tokio::test]
async fn logs_without_credentials_is_configuration_error() {
    let app = spawn_app(test_config("", "", ""), UNREACHABLE_UPSTREAM).await;

    let resp = reqwest::get(format!("{app}/logs")).await.unwrap();
    assert_eq!(resp.status(), 500);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "error");
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("RENDER_API_TOKEN")
    );
}

#[tokio::test]
async fn logs_honors_allow_list() {
    let upstream = spawn_upstream(StatusCode::OK, "logs").await;
    let app = spawn_app(test_config("tok", "srv-1", "key1"), &upstream).await;

    let client = reqwest::Client::new();

    let denied = client.get(format!("{app}/logs")).send().await.unwrap();
    assert_eq!(denied.status(), 401);

    let allowed = client
        .get(format!("{app}/logs"))
        .header("X-API-KEY", "key1")
        .send()
        .await
        .unwrap();
    assert_eq!(allowed.status(), 200);
}
