//! OpenAPI schema aggregation for the gateway API.
use crate::api::{
    relay, system, tokens, topics,
    types::{
        DeletedTopicResponse, ErrorResponse, HealthStatus, SystemInfo, TokenResponse,
        TopicListResponse,
    },
};
use crate::model::{
    InitialPosition, SubscriptionType, TopicConfig, TopicNames, TopicStatus, WebhookConfig,
};
use axum::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "relay-gateway",
        version = "v2",
        description = "Topic registry and message relay gateway"
    ),
    paths(
        system::status,
        system::system_info,
        system::system_health,
        relay::firehose,
        topics::get_topic_by_key,
        topics::get_topic_by_names,
        topics::upsert_topic,
        topics::delete_topic_by_key,
        topics::delete_topic_by_names,
        topics::list_topics,
        tokens::issue_token
    ),
    components(schemas(
        SystemInfo,
        HealthStatus,
        ErrorResponse,
        TopicConfig,
        TopicNames,
        TopicStatus,
        WebhookConfig,
        SubscriptionType,
        InitialPosition,
        TopicListResponse,
        DeletedTopicResponse,
        TokenResponse
    )),
    tags(
        (name = "system", description = "System and discovery endpoints"),
        (name = "relay", description = "Payload relay"),
        (name = "topics", description = "Topic registry"),
        (name = "auth", description = "Subject tokens")
    )
)]
pub struct ApiDoc;

pub(crate) async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
