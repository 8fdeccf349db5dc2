//! HTTP API request/response types.
//!
//! # Purpose
//! Defines payload shapes for the gateway REST API and OpenAPI schema
//! generation. Topic records themselves are served as [`crate::model::TopicConfig`].
use crate::model::TopicConfig;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct SystemInfo {
    pub backend: String,
    pub durable: bool,
    pub api_version: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct HealthStatus {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub request_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TopicListResponse {
    pub items: Vec<TopicConfig>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeletedTopicResponse {
    pub key: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub subject: String,
    pub token: String,
}
