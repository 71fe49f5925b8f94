mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;

#[tokio::test]
async fn health_endpoints_report_up() {
    let app = TestApp::new().await;

    let health = app.get("/health").await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["status"], "up");
    assert_eq!(health.body["database"], "up");

    let ready = app.get("/health/ready").await;
    assert_eq!(ready.status, StatusCode::OK);
    assert_eq!(ready.body["ready"], true);

    let live = app.get("/health/live").await;
    assert_eq!(live.status, StatusCode::OK);
    assert_eq!(live.body["alive"], true);
}

#[tokio::test]
async fn status_endpoint_identifies_the_service() {
    let app = TestApp::new().await;

    let response = app.get("/status").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["service"], "crm-api");
    assert_eq!(response.body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = TestApp::new().await;

    let response = app.get("/api-docs/openapi.json").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["paths"]["/Customer/create-customer"].is_object());
    assert_eq!(response.body["paths"]["/Order"]["put"]["deprecated"], true);
}

#[tokio::test]
async fn request_id_is_echoed_or_generated() {
    let app = TestApp::new().await;

    let echoed = app
        .request_with_headers(Method::GET, "/Customer/1", &[("x-request-id", "req-test-1")])
        .await;
    assert_eq!(
        echoed.headers.get("x-request-id").unwrap(),
        "req-test-1"
    );

    let missing = app.get("/Customer/999").await;
    let generated = missing
        .headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .expect("generated request id");
    assert!(!generated.is_empty());
    assert_eq!(missing.body["request_id"], generated);
}

#[tokio::test]
async fn cors_allows_the_configured_front_end() {
    let app = TestApp::new().await;

    let response = app
        .request_with_headers(
            Method::OPTIONS,
            "/Customer/get-all-customers",
            &[
                ("origin", "http://localhost:30754"),
                ("access-control-request-method", "GET"),
            ],
        )
        .await;
    assert_eq!(
        response
            .headers
            .get("access-control-allow-origin")
            .unwrap(),
        "http://localhost:30754"
    );
}

#[tokio::test]
async fn unknown_routes_are_not_found() {
    let app = TestApp::new().await;

    let response = app.get("/Invoice/get-all-invoices").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
