//! Gateway HTTP application wiring.
//!
//! # Purpose
//! Builds the Axum router, configures middleware, and defines the shared
//! application state injected into handlers.
use crate::api;
use crate::relay::RelayHandler;
use axum::Router;
use tower_http::trace::TraceLayer;

#[derive(Debug, Clone)]
pub struct AppState {
    pub handler: RelayHandler,
    pub api_version: String,
}

pub fn build_router(state: AppState) -> Router {
    let trace_layer =
        TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
            tracing::info_span!(
                "http.request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version()
            )
        });

    Router::new()
        .route("/status", axum::routing::get(api::system::status))
        .route(
            "/v2/system/info",
            axum::routing::get(api::system::system_info),
        )
        .route(
            "/v2/system/health",
            axum::routing::get(api::system::system_health),
        )
        .route(
            "/v2/firehose",
            axum::routing::post(api::relay::firehose),
        )
        .route(
            "/v2/topic",
            axum::routing::get(api::topics::get_topic_by_names)
                .post(api::topics::upsert_topic)
                .delete(api::topics::delete_topic_by_names),
        )
        .route(
            "/v2/topic/:topic_key",
            axum::routing::get(api::topics::get_topic_by_key)
                .delete(api::topics::delete_topic_by_key),
        )
        .route("/v2/topics", axum::routing::get(api::topics::list_topics))
        .route(
            "/v2/sub-token/:sub",
            axum::routing::get(api::tokens::issue_token),
        )
        .route(
            "/v2/openapi.json",
            axum::routing::get(api::openapi::openapi_json),
        )
        .layer(trace_layer)
        .with_state(state)
}
