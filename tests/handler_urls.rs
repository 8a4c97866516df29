mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_get_url_details() {
    let ctx = common::create_test_context();
    let code = ctx.service.create("https://example.com").await.unwrap();
    let server = common::create_test_server(ctx.service.clone());

    let response = server.get(&format!("/api/v1/urls/{code}")).await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["code"], code.as_str());
    assert_eq!(json["origin_url"], "https://example.com");
    assert_eq!(json["short_url"], format!("{}{}", common::PUBLIC_BASE, code));
    assert!(json["created_at"].is_string());
}

#[tokio::test]
async fn test_get_url_details_not_found() {
    let ctx = common::create_test_context();
    let server = common::create_test_server(ctx.service.clone());

    let response = server.get("/api/v1/urls/missing").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_lookup_by_origin() {
    let ctx = common::create_test_context();
    let code = ctx.service.create("https://example.com/a").await.unwrap();
    let server = common::create_test_server(ctx.service.clone());

    let response = server
        .get("/api/v1/urls")
        .add_query_param("origin", "https://example.com/a")
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["code"], code.as_str());
    assert_eq!(json["origin_url"], "https://example.com/a");
}

#[tokio::test]
async fn test_lookup_unknown_origin() {
    let ctx = common::create_test_context();
    let server = common::create_test_server(ctx.service.clone());

    let response = server
        .get("/api/v1/urls")
        .add_query_param("origin", "https://nowhere.example")
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_lookup_invalid_origin() {
    let ctx = common::create_test_context();
    let server = common::create_test_server(ctx.service.clone());

    let response = server
        .get("/api/v1/urls")
        .add_query_param("origin", "mailto:someone@example.com")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "invalid_url"
    );
}

#[tokio::test]
async fn test_update_url() {
    let ctx = common::create_test_context();
    let code = ctx.service.create("https://example.com/old").await.unwrap();
    ctx.service.resolve(&code).await.unwrap();
    let server = common::create_test_server(ctx.service.clone());

    let response = server
        .put(&format!("/api/v1/urls/{code}"))
        .json(&json!({ "url": "https://example.com/new" }))
        .await;

    response.assert_status(StatusCode::NO_CONTENT);

    let redirect = server.get(&format!("/{code}")).await;
    redirect.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(redirect.header("location"), "https://example.com/new");
}

#[tokio::test]
async fn test_update_url_invalid() {
    let ctx = common::create_test_context();
    let code = ctx.service.create("https://example.com/old").await.unwrap();
    let server = common::create_test_server(ctx.service.clone());

    let response = server
        .put(&format!("/api/v1/urls/{code}"))
        .json(&json!({ "url": "ftp://example.com" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        ctx.service.resolve(&code).await.unwrap(),
        "https://example.com/old"
    );
}

#[tokio::test]
async fn test_update_url_not_found() {
    let ctx = common::create_test_context();
    let server = common::create_test_server(ctx.service.clone());

    let response = server
        .put("/api/v1/urls/missing")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_delete_url() {
    let ctx = common::create_test_context();
    let code = ctx.service.create("https://example.com").await.unwrap();
    ctx.service.resolve(&code).await.unwrap();
    let server = common::create_test_server(ctx.service.clone());

    let response = server.delete(&format!("/api/v1/urls/{code}")).await;
    response.assert_status(StatusCode::NO_CONTENT);

    server
        .get(&format!("/{code}"))
        .await
        .assert_status_not_found();
    server
        .delete(&format!("/api/v1/urls/{code}"))
        .await
        .assert_status_not_found();
}
