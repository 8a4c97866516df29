mod common;

use axum::http::StatusCode;
use std::sync::Arc;

use shortlink::infrastructure::persistence::InMemoryUrlRepository;

#[tokio::test]
async fn test_health_check_ok() {
    let ctx = common::create_test_context();
    let server = common::create_test_server(ctx.service.clone());

    let response = server.get("/api/v1/healthcheck").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["cache"]["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_health_check_degraded_cache() {
    let service = common::create_service(
        Arc::new(InMemoryUrlRepository::new()),
        Arc::new(common::FailingCache),
    );
    let server = common::create_test_server(Arc::new(service));

    let response = server.get("/api/v1/healthcheck").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["cache"]["status"], "error");
}

#[tokio::test]
async fn test_health_check_stalled_database() {
    let service = common::create_service(
        Arc::new(common::StalledRepository),
        Arc::new(shortlink::infrastructure::cache::NullCache::new()),
    );
    let server = common::create_test_server(Arc::new(service));

    let response = server.get("/api/v1/healthcheck").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        response.json::<serde_json::Value>()["checks"]["database"]["status"],
        "error"
    );
}
