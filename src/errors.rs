use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::cache::CacheError;

/// Error type shared by the catalog services and their HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::error::DbErr),

    /// A persistence failure already converted into an operator-facing
    /// message that names the affected entity.
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ServiceError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServiceError::Database(_)
            | ServiceError::Storage(_)
            | ServiceError::Cache(_)
            | ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to surface to the caller. Raw database errors are
    /// masked; everything else carries an intentional message.
    pub fn response_message(&self) -> String {
        match self {
            ServiceError::Database(_) => "A storage error occurred".to_string(),
            other => other.to_string(),
        }
    }

    /// Structured per-field detail, present for validation failures.
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ServiceError::Validation(errors) => serde_json::to_value(errors.field_errors()).ok(),
            _ => None,
        }
    }
}

/// Standardized error payload.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// HTTP status category (e.g. "Not Found", "Forbidden")
    pub error: String,
    /// Human-readable error description
    pub message: String,
    /// Field-level validation detail, when applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// ISO 8601 timestamp when the error occurred
    pub timestamp: String,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message: self.response_message(),
            details: self.details(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
    }

    #[test]
    fn validation_errors_carry_field_detail() {
        let err = Probe { name: String::new() }.validate().unwrap_err();
        let service_err = ServiceError::from(err);

        assert_eq!(service_err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        let details = service_err.details().expect("field detail expected");
        assert!(details.get("name").is_some());
    }

    #[test]
    fn database_errors_are_masked() {
        let err = ServiceError::Database(sea_orm::error::DbErr::Custom("secret dsn".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.response_message().contains("secret"));
    }
}
