use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Error surface shared by all handlers and services.
///
/// `Conflict` is deliberately a single kind: a duplicate caught by a
/// registration pre-check and one caught by the database unique constraint
/// must look identical to the caller.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{field}: {message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    #[error("{0} already in use")]
    Conflict(&'static str),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::Internal(e.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, field, message) = match &self {
            ApiError::Validation { field, .. } => {
                (StatusCode::BAD_REQUEST, Some(*field), self.to_string())
            }
            ApiError::Conflict(field) => (StatusCode::CONFLICT, Some(*field), self.to_string()),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, None, self.to_string()),
            ApiError::Internal(e) => {
                // Detail goes to the log, never to the client.
                error!(error = %e, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    None,
                    "internal server error".to_string(),
                )
            }
        };
        (status, Json(json!({ "error": message, "field": field }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400() {
        let err = ApiError::Validation {
            field: "password",
            message: "password must be 8-72 characters",
        };
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn conflict_maps_to_409() {
        let err = ApiError::Conflict("email");
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = ApiError::NotFound("user");
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn internal_hides_detail() {
        let err = ApiError::Internal(anyhow::anyhow!("connection refused"));
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn conflict_message_names_the_field() {
        assert_eq!(
            ApiError::Conflict("username").to_string(),
            "username already in use"
        );
    }
}
