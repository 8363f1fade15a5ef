//! `RequestClient` over the reqwest transport against a local axum server.
#![cfg(all(feature = "native", not(target_arch = "wasm32")))]

use axum::Json;
use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use platform_ui::net::reqwest_transport::ReqwestTransport;
use platform_ui::net::{RequestClient, RequestError, RequestOptions};
use serde_json::{Value, json};

async fn spawn_server() -> String {
    let app = Router::new()
        .route("/api/status", get(|| async { Json(json!({ "status": "ok", "providers": 3 })) }))
        .route(
            "/api/missing",
            get(|| async { (StatusCode::NOT_FOUND, Json(json!({ "error": "nope" }))) }),
        )
        .route("/api/html", get(|| async { "<html></html>" }))
        .route(
            "/api/echo",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                let content_type = headers
                    .get("content-type")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_owned();
                Json(json!({ "content_type": content_type, "body": body }))
            }),
        );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server failed");
    });
    format!("http://{addr}")
}

fn client() -> RequestClient<ReqwestTransport> {
    RequestClient::new(ReqwestTransport::default())
}

#[tokio::test]
async fn get_parses_json() {
    let base = spawn_server().await;
    let value = client()
        .request(&format!("{base}/api/status"), RequestOptions::get())
        .await
        .expect("status");
    assert_eq!(value, json!({ "status": "ok", "providers": 3 }));
}

#[tokio::test]
async fn not_found_is_a_status_error() {
    let base = spawn_server().await;
    let err = client()
        .request(&format!("{base}/api/missing"), RequestOptions::get())
        .await
        .expect_err("404");
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn non_json_body_is_a_parse_error() {
    let base = spawn_server().await;
    let err = client()
        .request(&format!("{base}/api/html"), RequestOptions::get())
        .await
        .expect_err("html");
    assert!(matches!(err, RequestError::Parse { .. }));
}

#[tokio::test]
async fn post_json_sends_default_content_type() {
    let base = spawn_server().await;
    let reply: Value = client()
        .post_json(&format!("{base}/api/echo"), &json!({ "prompt": "hi" }))
        .await
        .expect("echo");
    assert_eq!(reply["content_type"], "application/json");
    assert_eq!(reply["body"], json!({ "prompt": "hi" }));
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    let err = client()
        .request("http://127.0.0.1:1/api/status", RequestOptions::get())
        .await
        .expect_err("refused");
    assert!(matches!(err, RequestError::Transport(_)));
}
