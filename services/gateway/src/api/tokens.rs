//! Subject token endpoint.
use crate::api::caller_subjects;
use crate::api::error::ApiError;
use crate::api::types::TokenResponse;
use crate::app::AppState;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::HeaderMap;

#[utoipa::path(
    get,
    path = "/v2/sub-token/{sub}",
    tag = "auth",
    params(("sub" = String, Path, description = "Subject the token is minted for")),
    responses(
        (status = 200, description = "Token minted", body = TokenResponse),
        (status = 401, description = "Caller is not a superuser", body = crate::api::types::ErrorResponse),
        (status = 500, description = "Token issuer unavailable", body = crate::api::types::ErrorResponse)
    )
)]
/// Mint a token for `sub` on behalf of a superuser caller.
pub(crate) async fn issue_token(
    Path(sub): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = state
        .handler
        .issue_token(&caller_subjects(&headers), &sub)
        .await?;
    Ok(Json(TokenResponse {
        subject: sub,
        token,
    }))
}
