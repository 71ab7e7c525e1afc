//! Platform Error Types
//!
//! Every endpoint funnels failures through [`AdminError`]; its
//! `IntoResponse` impl is the single place the error envelope is built.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("Validation error: {description}")]
    Validation { description: String },

    #[error("Not found: {description}")]
    NotFound { description: String },

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bson::ser::Error),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] bson::de::Error),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl AdminError {
    pub fn validation(description: impl Into<String>) -> Self {
        Self::Validation { description: description.into() }
    }

    pub fn not_found(description: impl Into<String>) -> Self {
        Self::NotFound { description: description.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }

    /// HTTP status this error maps to. Unrecognized failures default to 500.
    pub fn status(&self) -> StatusCode {
        match self {
            AdminError::Validation { .. } => StatusCode::BAD_REQUEST,
            AdminError::NotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short machine-oriented message for the error envelope.
    fn message(&self) -> &'static str {
        match self {
            AdminError::Validation { .. } => "Validation Error",
            AdminError::NotFound { .. } => "Not Found",
            _ => "Internal Server Error",
        }
    }
}

pub type Result<T> = std::result::Result<T, AdminError>;

/// Error envelope returned by every endpoint on failure.
///
/// `code` mirrors the HTTP status; `message` is a short classification and
/// `description` carries the detail for the caller.
#[derive(Debug, serde::Serialize, ToSchema)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
    pub description: String,
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let status = self.status();

        let description = match &self {
            AdminError::Validation { description } | AdminError::NotFound { description } => {
                description.clone()
            }
            // Storage failures are logged in full; the caller gets a
            // generic description.
            other => {
                tracing::error!(error = %other, "request failed");
                "Unknown Error".to_string()
            }
        };

        let body = ErrorResponse {
            code: status.as_u16(),
            message: self.message().to_string(),
            description,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400() {
        let err = AdminError::validation("email field must be filled");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = AdminError::not_found("no such record");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn unclassified_errors_default_to_500() {
        let err = AdminError::internal("boom");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn status_mapping_is_total() {
        // Every variant resolves to a concrete status without panicking.
        for err in [
            AdminError::validation("v"),
            AdminError::not_found("n"),
            AdminError::internal("i"),
        ] {
            assert!(err.status().is_client_error() || err.status().is_server_error());
        }
    }
}
