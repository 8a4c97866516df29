mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn test_redirect_success() {
    let ctx = common::create_test_context();
    let code = ctx.service.create("https://example.com/target").await.unwrap();
    let server = common::create_test_server(ctx.service.clone());

    let response = server.get(&format!("/{code}")).await;

    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_percent_encodes_non_ascii_origin() {
    let ctx = common::create_test_context();
    let code = ctx.service.create("https://example.com/ünïcode").await.unwrap();
    let server = common::create_test_server(ctx.service.clone());

    let response = server.get(&format!("/{code}")).await;

    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.header("location"),
        "https://example.com/%C3%BCn%C3%AFcode"
    );
}

#[tokio::test]
async fn test_redirect_not_found() {
    let ctx = common::create_test_context();
    let server = common::create_test_server(ctx.service.clone());

    let response = server.get("/doesnotexist").await;

    response.assert_status_not_found();
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "not_found"
    );
}

#[tokio::test]
async fn test_redirect_malformed_code() {
    let ctx = common::create_test_context();
    let server = common::create_test_server(ctx.service.clone());

    let response = server.get("/bad-code!").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_redirect_with_failing_cache() {
    let repository = std::sync::Arc::new(
        shortlink::infrastructure::persistence::InMemoryUrlRepository::new(),
    );
    let service = std::sync::Arc::new(common::create_service(
        repository,
        std::sync::Arc::new(common::FailingCache),
    ));
    let code = service.create("https://example.com/fallback").await.unwrap();
    let server = common::create_test_server(service);

    let response = server.get(&format!("/{code}")).await;

    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), "https://example.com/fallback");
}
