//! Topic registry API handlers.
//!
//! # Purpose
//! Lookup, upsert, delete and listing of topic records. Every handler reads
//! the caller subjects from the `injectedSubs` header and lets the relay
//! handler authorize.
use crate::api::caller_subjects;
use crate::api::error::ApiError;
use crate::api::types::{DeletedTopicResponse, TopicListResponse};
use crate::app::AppState;
use crate::model::{TopicConfig, TopicNames, TopicRef};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;

#[utoipa::path(
    get,
    path = "/v2/topic/{topic_key}",
    tag = "topics",
    params(("topic_key" = String, Path, description = "Registry key")),
    responses(
        (status = 200, description = "Topic record", body = TopicConfig),
        (status = 403, description = "Caller may not read this topic", body = crate::api::types::ErrorResponse),
        (status = 404, description = "Topic not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn get_topic_by_key(
    Path(topic_key): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<TopicConfig>, ApiError> {
    let record = state
        .handler
        .get_topic(&caller_subjects(&headers), &TopicRef::Key(topic_key))
        .await?;
    Ok(Json(record))
}

#[utoipa::path(
    get,
    path = "/v2/topic",
    tag = "topics",
    request_body = TopicNames,
    responses(
        (status = 200, description = "Topic record", body = TopicConfig),
        (status = 403, description = "Caller may not read this topic", body = crate::api::types::ErrorResponse),
        (status = 404, description = "Topic not found", body = crate::api::types::ErrorResponse),
        (status = 422, description = "Invalid identifiers", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn get_topic_by_names(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<TopicNames>, JsonRejection>,
) -> Result<Json<TopicConfig>, ApiError> {
    let Json(body) = body?;
    let record = state
        .handler
        .get_topic(&caller_subjects(&headers), &TopicRef::Names(body))
        .await?;
    Ok(Json(record))
}

#[utoipa::path(
    post,
    path = "/v2/topic",
    tag = "topics",
    request_body = TopicConfig,
    responses(
        (status = 201, description = "Topic created or merged", body = TopicConfig),
        (status = 403, description = "Caller may not write this topic", body = crate::api::types::ErrorResponse),
        (status = 422, description = "Invalid identifiers", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn upsert_topic(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<TopicConfig>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;
    let record = state
        .handler
        .update_topic(&caller_subjects(&headers), body)
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[utoipa::path(
    delete,
    path = "/v2/topic/{topic_key}",
    tag = "topics",
    params(("topic_key" = String, Path, description = "Registry key")),
    responses(
        (status = 200, description = "Topic deleted", body = DeletedTopicResponse),
        (status = 403, description = "Caller may not delete this topic", body = crate::api::types::ErrorResponse),
        (status = 404, description = "Topic not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn delete_topic_by_key(
    Path(topic_key): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<DeletedTopicResponse>, ApiError> {
    let key = state
        .handler
        .delete_topic(&caller_subjects(&headers), &TopicRef::Key(topic_key))
        .await?;
    Ok(Json(DeletedTopicResponse { key }))
}

#[utoipa::path(
    delete,
    path = "/v2/topic",
    tag = "topics",
    request_body = TopicNames,
    responses(
        (status = 200, description = "Topic deleted", body = DeletedTopicResponse),
        (status = 403, description = "Caller may not delete this topic", body = crate::api::types::ErrorResponse),
        (status = 404, description = "Topic not found", body = crate::api::types::ErrorResponse),
        (status = 422, description = "Invalid identifiers", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn delete_topic_by_names(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<TopicNames>, JsonRejection>,
) -> Result<Json<DeletedTopicResponse>, ApiError> {
    let Json(body) = body?;
    let key = state
        .handler
        .delete_topic(&caller_subjects(&headers), &TopicRef::Names(body))
        .await?;
    Ok(Json(DeletedTopicResponse { key }))
}

#[utoipa::path(
    get,
    path = "/v2/topics",
    tag = "topics",
    responses(
        (status = 200, description = "Topics visible to the caller", body = TopicListResponse)
    )
)]
pub(crate) async fn list_topics(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<TopicListResponse>, ApiError> {
    let items = state.handler.list_topics(&caller_subjects(&headers)).await?;
    Ok(Json(TopicListResponse { items }))
}
