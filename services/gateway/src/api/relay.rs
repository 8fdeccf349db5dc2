//! Firehose relay endpoint.
//!
//! Relay metadata travels in headers: `Authorization` carries the broker
//! credential, `TopicFn` the destination topic and `PulsarUrl` the endpoint.
//! The body is forwarded untouched.
use crate::api::error::ApiError;
use crate::api::header_value;
use crate::app::AppState;
use crate::relay::{RelayMetadata, SendMode};
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use bytes::Bytes;
use serde::Deserialize;

pub const TOPIC_HEADER: &str = "TopicFn";
pub const ENDPOINT_HEADER: &str = "PulsarUrl";

#[derive(Debug, Default, Deserialize)]
pub(crate) struct FirehoseQuery {
    pub mode: Option<String>,
}

#[utoipa::path(
    post,
    path = "/v2/firehose",
    tag = "relay",
    params(
        ("mode" = Option<String>, Query, description = "`async` to skip waiting for the broker ack"),
        ("Authorization" = String, Header, description = "Broker credential, optionally `Bearer`-prefixed"),
        ("TopicFn" = String, Header, description = "Destination topic full name"),
        ("PulsarUrl" = String, Header, description = "Broker endpoint")
    ),
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "Payload relayed"),
        (status = 401, description = "Missing credential or endpoint not allowed", body = crate::api::types::ErrorResponse),
        (status = 503, description = "Broker unavailable", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn firehose(
    State(state): State<AppState>,
    Query(query): Query<FirehoseQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let metadata = RelayMetadata {
        authorization: header_value(&headers, header::AUTHORIZATION.as_str()),
        topic_full_name: header_value(&headers, TOPIC_HEADER),
        endpoint: header_value(&headers, ENDPOINT_HEADER),
    };
    let mode = SendMode::from_query(query.mode.as_deref());
    state.handler.relay(&metadata, body, mode).await?;
    Ok(StatusCode::OK)
}
