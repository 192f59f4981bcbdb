use actix_web::http::StatusCode;
use actix_web::test::{call_service, read_body, read_body_json, TestRequest};

#[actix_web::test]
async fn liveness_always_answers_healthy() {
    let (service, _db) = account_api::service!();

    let request = TestRequest::get().uri("/health").to_request();
    let response = call_service(&service, request).await;

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = read_body_json(response).await;
    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn database_health_reports_connected() {
    let (service, _db) = account_api::service!();

    let request = TestRequest::get().uri("/health/db").to_request();
    let response = call_service(&service, request).await;

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = read_body_json(response).await;
    assert_eq!(body["database"], "connected");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[actix_web::test]
async fn metrics_render_prometheus_text() {
    let (service, _db) = account_api::service!();

    let request = TestRequest::get().uri("/metrics").to_request();
    let response = call_service(&service, request).await;

    assert_eq!(response.status(), StatusCode::OK);

    // The exposition format is plain text; an empty registry is still valid.
    let body = read_body(response).await;
    assert!(std::str::from_utf8(&body).is_ok());
}

#[actix_web::test]
async fn index_answers() {
    let (service, _db) = account_api::service!();

    let request = TestRequest::get().uri("/").to_request();
    let response = call_service(&service, request).await;

    assert_eq!(response.status(), StatusCode::OK);
}
