//! Permission Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use super::models::RoleId;

/// Message attached to a denied check when it reaches the client.
pub const NO_PERMISSION_MESSAGE: &str = "You do not have permission to perform this action";

/// Resolving a role identifier to a role failed.
#[derive(Debug, thiserror::Error)]
pub enum LookupFailure {
    #[error("Role {0} not found")]
    NotFound(RoleId),

    #[error("Role lookup for {0} timed out")]
    TimedOut(RoleId),

    #[error("Role lookup failed: {0}")]
    Database(#[from] sqlx::Error),
}

/// Outcome of a rejected permission check.
#[derive(Debug, thiserror::Error)]
pub enum PermissionError {
    /// The signals did not combine to a permit. Expected; not logged as an error.
    #[error("{}", NO_PERMISSION_MESSAGE)]
    Denied,

    #[error(transparent)]
    Lookup(#[from] LookupFailure),
}

impl PermissionError {
    #[must_use]
    pub const fn is_denied(&self) -> bool {
        matches!(self, Self::Denied)
    }
}

impl IntoResponse for PermissionError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            Self::Denied => (StatusCode::FORBIDDEN, "no_permission", self.to_string()),
            Self::Lookup(LookupFailure::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "not_found", self.to_string())
            }
            Self::Lookup(LookupFailure::TimedOut(_)) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "lookup_timeout",
                self.to_string(),
            ),
            Self::Lookup(LookupFailure::Database(e)) => {
                tracing::error!(error = %e, "Permission lookup database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": code, "message": message }))).into_response()
    }
}
