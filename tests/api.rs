use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use note_refiner_lib::config::AppConfig;
use note_refiner_lib::web::{create_router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{header as header_is, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-pro:generateContent";

fn app(api_base: &str, api_key: &str) -> Router {
    let config = AppConfig {
        gemini_api_key: api_key.to_string(),
        gemini_api_base: api_base.to_string(),
        ..AppConfig::default()
    };
    create_router(Arc::new(AppState::new(config)))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>, axum::http::HeaderMap) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec(), headers)
}

async fn new_session(app: &Router) -> String {
    let (status, body, _) = send(
        app,
        Request::post("/api/sessions").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let snapshot: Value = serde_json::from_slice(&body).unwrap();
    snapshot["id"].as_str().unwrap().to_string()
}

fn refine_request(id: &str, body: Value) -> Request<Body> {
    Request::post(format!("/api/sessions/{id}/refine"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn gemini(template: ResponseTemplate, expected_calls: u64) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(template)
        .expect(expected_calls)
        .mount(&server)
        .await;
    server
}

fn refined(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{ "content": { "parts": [{ "text": text }] }, "finishReason": "STOP" }]
    }))
}

#[tokio::test]
async fn index_serves_the_two_pane_page() {
    let app = app("http://127.0.0.1:9", "key");
    let (status, body, headers) = send(&app, Request::get("/").body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/html"));
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("AI Note Refiner"));
}

#[tokio::test]
async fn config_never_exposes_the_key() {
    let app = app("http://127.0.0.1:9", "super-secret");
    let (status, body, _) = send(&app, Request::get("/api/config").body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(body).unwrap();
    assert!(!text.contains("super-secret"));
    let config: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(config["has_api_key"], true);
    assert_eq!(config["model"], "gemini-2.5-pro");
}

#[tokio::test]
async fn refine_then_download_returns_the_exact_markdown() {
    let markdown = "# Graf\n\n### Ringkasan Eksekutif\n- **BFS** memakai antrian ✓";
    let server = gemini(refined(markdown), 1).await;
    let app = app(&server.uri(), "server-key");
    let id = new_session(&app).await;

    let (status, body, _) = send(&app, refine_request(&id, json!({ "notes": "bfs dfs graf" }))).await;
    assert_eq!(status, StatusCode::OK);
    let snapshot: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(snapshot["status"], "Ready");
    assert_eq!(snapshot["refined"]["content"], markdown);
    let file_name = snapshot["download_file_name"].as_str().unwrap().to_string();
    let pattern = regex::Regex::new(r"^catatan_rapi_\d{4}-\d{2}-\d{2}_\d{2}-\d{2}\.md$").unwrap();
    assert!(pattern.is_match(&file_name), "{file_name}");

    let (status, body, headers) = send(
        &app,
        Request::get(format!("/api/sessions/{id}/download")).body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/markdown");
    assert_eq!(
        headers[header::CONTENT_DISPOSITION].to_str().unwrap(),
        format!("attachment; filename=\"{file_name}\"")
    );
    assert_eq!(body, markdown.as_bytes());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].headers["x-goog-api-key"], "server-key");
    let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(sent["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap()
        .contains("\"bfs dfs graf\""));
}

#[tokio::test]
async fn empty_notes_are_a_warning_and_skip_the_service() {
    let server = gemini(refined("unused"), 0).await;
    let app = app(&server.uri(), "key");
    let id = new_session(&app).await;

    let (status, body, _) = send(&app, refine_request(&id, json!({ "notes": "" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let err: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(err["code"], "EMPTY_NOTES");
    assert_eq!(err["severity"], "warning");
    assert_eq!(err["error"], "Mohon masukkan catatan yang ingin dirapikan.");
}

#[tokio::test]
async fn missing_key_is_an_error_and_skips_the_service() {
    let server = gemini(refined("unused"), 0).await;
    let app = app(&server.uri(), "");
    let id = new_session(&app).await;

    let (status, body, _) = send(&app, refine_request(&id, json!({ "notes": "catatan" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let err: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(err["code"], "MISSING_API_KEY");
    assert_eq!(err["severity"], "error");
}

#[tokio::test]
async fn typed_key_is_used_when_none_is_configured() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header_is("x-goog-api-key", "typed-key"))
        .respond_with(refined("# Ok"))
        .expect(1)
        .mount(&server)
        .await;
    let app = app(&server.uri(), "");
    let id = new_session(&app).await;

    let (status, _, _) = send(
        &app,
        refine_request(&id, json!({ "notes": "catatan", "api_key": "typed-key" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn invalid_key_leaves_nothing_to_download() {
    let server = gemini(
        ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT",
                "details": [{ "reason": "API_KEY_INVALID" }]
            }
        })),
        1,
    )
    .await;
    let app = app(&server.uri(), "bad-key");
    let id = new_session(&app).await;

    let (status, body, _) = send(&app, refine_request(&id, json!({ "notes": "catatan" }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let err: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        err["error"],
        "API Key yang Anda masukkan tidak valid. Mohon periksa kembali."
    );

    let (status, body, _) = send(
        &app,
        Request::get(format!("/api/sessions/{id}")).body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let snapshot: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(snapshot["status"], "Failed");
    assert!(snapshot["refined"].is_null());

    let (status, _, _) = send(
        &app,
        Request::get(format!("/api/sessions/{id}/download")).body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn other_failures_show_the_raw_error() {
    let server = gemini(ResponseTemplate::new(500).set_body_string("model overloaded"), 1).await;
    let app = app(&server.uri(), "key");
    let id = new_session(&app).await;

    let (status, body, _) = send(&app, refine_request(&id, json!({ "notes": "catatan" }))).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let err: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(err["code"], "REMOTE_ERROR");
    let message = err["error"].as_str().unwrap();
    assert!(message.starts_with("Terjadi kesalahan saat menghubungi AI: "));
    assert!(message.contains("model overloaded"));
}

#[tokio::test]
async fn ended_session_is_not_found() {
    let app = app("http://127.0.0.1:9", "key");
    let id = new_session(&app).await;

    let (status, _, _) = send(
        &app,
        Request::delete(format!("/api/sessions/{id}")).body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body, _) = send(
        &app,
        Request::get(format!("/api/sessions/{id}")).body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let err: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(err["code"], "SESSION_NOT_FOUND");
}

#[tokio::test]
async fn health_counts_sessions() {
    let app = app("http://127.0.0.1:9", "key");
    new_session(&app).await;

    let (status, body, _) = send(&app, Request::get("/health").body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    let health: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(health["status"], "ok");
    assert_eq!(health["sessions"], 1);
}
