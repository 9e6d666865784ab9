use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::backend::BackendError;

/// JSON body of every failed API call.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ServerErrorResponse {
    /// Machine-readable error code
    pub error: String,
    /// Message suitable for showing to the user
    pub message: String,
}

impl ServerErrorResponse {
    pub fn new(error: &str, message: String) -> Self {
        Self {
            error: error.to_string(),
            message,
        }
    }
}

pub type ApiError = (StatusCode, Json<ServerErrorResponse>);

pub type ApiResult<T> = Result<Json<T>, ApiError>;

/// Turns an upstream failure into a user-facing error.
///
/// Upstream 4xx answers keep their status and message. Anything else is a
/// bad gateway carrying the generic `action` message, e.g. "Failed to fetch
/// subtasks".
pub fn backend_failure(err: BackendError, action: &str) -> ApiError {
    tracing::error!("{}: {}", action, err);
    let status = err
        .upstream_status()
        .filter(|status| (400..500).contains(status))
        .and_then(|status| StatusCode::from_u16(status).ok())
        .unwrap_or(StatusCode::BAD_GATEWAY);
    let error = match status {
        StatusCode::NOT_FOUND => "NOT_FOUND",
        StatusCode::UNAUTHORIZED => "UNAUTHORIZED",
        StatusCode::FORBIDDEN => "FORBIDDEN",
        StatusCode::BAD_GATEWAY => "UPSTREAM_ERROR",
        _ => "REJECTED",
    };
    let message = err
        .upstream_message()
        .map(str::to_string)
        .unwrap_or_else(|| action.to_string());
    (status, Json(ServerErrorResponse::new(error, message)))
}

pub fn validation_failure(err: impl std::fmt::Display) -> ApiError {
    tracing::warn!("Rejected invalid input: {}", err);
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ServerErrorResponse::new("VALIDATION_ERROR", err.to_string())),
    )
}

/// Query string of every DELETE route.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteQuery {
    /// Must be true for the delete to go through
    #[serde(default)]
    pub confirm: bool,
}

/// Deletions are only forwarded when the caller confirmed them.
pub fn require_confirmation(query: &DeleteQuery) -> Result<(), ApiError> {
    if query.confirm {
        return Ok(());
    }
    tracing::warn!("Refused unconfirmed delete");
    Err((
        StatusCode::BAD_REQUEST,
        Json(ServerErrorResponse::new(
            "UNCONFIRMED_DELETE",
            "Deletion must be confirmed with ?confirm=true".to_string(),
        )),
    ))
}
