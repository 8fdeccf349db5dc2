mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use bytes::Bytes;
use common::{CLUSTER, RecordingTransport, app_with_transport, read_json};
use gateway::relay::SendMode;
use std::sync::Arc;
use tower::ServiceExt;

const TOPIC: &str = "persistent://acme/ns/orders";

fn firehose(uri: &str, authorization: Option<&str>, endpoint: &str, body: &'static [u8]) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("TopicFn", TOPIC)
        .header("PulsarUrl", endpoint);
    if let Some(value) = authorization {
        builder = builder.header("Authorization", value);
    }
    builder.body(Body::from(body)).expect("request")
}

#[tokio::test]
async fn firehose_relays_payload() {
    let transport = Arc::new(RecordingTransport::default());
    let app = app_with_transport(transport.clone(), false);

    let response = app
        .clone()
        .oneshot(firehose("/v2/firehose", Some("Bearer broker-jwt"), CLUSTER, b"{\"id\":7}"))
        .await
        .expect("relay");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(firehose("/v2/firehose?mode=async", Some("raw-jwt"), CLUSTER, b"x"))
        .await
        .expect("relay async");
    assert_eq!(response.status(), StatusCode::OK);

    let sent = transport.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].credential, "broker-jwt");
    assert_eq!(sent[0].destination, TOPIC);
    assert_eq!(sent[0].endpoint, CLUSTER);
    assert_eq!(sent[0].payload, Bytes::from_static(b"{\"id\":7}"));
    assert_eq!(sent[0].mode, SendMode::Sync);
    assert_eq!(sent[1].credential, "raw-jwt");
    assert_eq!(sent[1].mode, SendMode::Async);
}

#[tokio::test]
async fn firehose_rejects_missing_credentials_and_unknown_endpoints() {
    let transport = Arc::new(RecordingTransport::default());
    let app = app_with_transport(transport.clone(), false);

    let response = app
        .clone()
        .oneshot(firehose("/v2/firehose", None, CLUSTER, b"x"))
        .await
        .expect("relay");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(read_json(response).await["code"], "unauthorized");

    let response = app
        .clone()
        .oneshot(firehose("/v2/firehose", Some("Bearer t"), "pulsar://rogue:6650", b"x"))
        .await
        .expect("relay");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn firehose_reports_broker_failure_as_unavailable() {
    let app = app_with_transport(Arc::new(RecordingTransport::failing()), false);
    let response = app
        .oneshot(firehose("/v2/firehose", Some("Bearer t"), CLUSTER, b"x"))
        .await
        .expect("relay");
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(read_json(response).await["code"], "unavailable");
}
