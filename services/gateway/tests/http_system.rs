mod common;

use axum::http::StatusCode;
use common::{RecordingTransport, TOKEN_SECRET, app, app_with_transport, read_json};
use http_helpers::empty_request;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use std::sync::Arc;
use tower::ServiceExt;

#[tokio::test]
async fn status_health_and_info() {
    let app = app();

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/status", None))
        .await
        .expect("status");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/v2/system/health", None))
        .await
        .expect("health");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["status"], "ok");

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/v2/system/info", None))
        .await
        .expect("info");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["backend"], "memory");
    assert_eq!(body["durable"], false);
    assert_eq!(body["api_version"], "v2");
}

#[tokio::test]
async fn openapi_document_lists_routes() {
    let response = app()
        .oneshot(empty_request("GET", "/v2/openapi.json", None))
        .await
        .expect("openapi");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    let paths = body["paths"].as_object().expect("paths");
    for path in [
        "/status",
        "/v2/firehose",
        "/v2/topic",
        "/v2/topic/{topic_key}",
        "/v2/topics",
        "/v2/sub-token/{sub}",
    ] {
        assert!(paths.contains_key(path), "missing {path}");
    }
}

#[tokio::test]
async fn sub_token_requires_superuser() {
    let app = app();

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/v2/sub-token/acme-prod", Some("acme-prod")))
        .await
        .expect("token");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/v2/sub-token/acme-prod", None))
        .await
        .expect("token");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(empty_request(
            "GET",
            "/v2/sub-token/acme-prod",
            Some("ops-team,superuser"),
        ))
        .await
        .expect("token");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["subject"], "acme-prod");

    let mut validation = Validation::new(Algorithm::HS256);
    validation.required_spec_claims.clear();
    let token = body["token"].as_str().expect("token string");
    let claims = jsonwebtoken::decode::<serde_json::Value>(
        token,
        &DecodingKey::from_secret(TOKEN_SECRET),
        &validation,
    )
    .expect("decode")
    .claims;
    assert_eq!(claims["sub"], "acme-prod");
}

#[tokio::test]
async fn sub_token_without_issuer_is_internal_error() {
    let app = app_with_transport(Arc::new(RecordingTransport::default()), false);
    let response = app
        .oneshot(empty_request("GET", "/v2/sub-token/acme-prod", Some("superuser")))
        .await
        .expect("token");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(read_json(response).await["code"], "internal");
}
