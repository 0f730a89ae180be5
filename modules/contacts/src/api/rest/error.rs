use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::error::DomainError;

/// Wire shape of an API failure: a human-readable message, plus per-field
/// messages for validation and uniqueness failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

/// API-boundary error carrying the HTTP status and response body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            body: ErrorBody {
                message: message.into(),
                errors: None,
            },
        }
    }

    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::with_field(StatusCode::UNPROCESSABLE_ENTITY, field, message)
    }

    pub fn conflict(field: &str, message: impl Into<String>) -> Self {
        Self::with_field(StatusCode::CONFLICT, field, message)
    }

    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ErrorBody {
                message: "An internal error occurred".to_string(),
                errors: None,
            },
        }
    }

    fn with_field(status: StatusCode, field: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        let mut errors = BTreeMap::new();
        errors.insert(field.to_string(), vec![message.clone()]);
        Self {
            status,
            body: ErrorBody {
                message,
                errors: Some(errors),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Map domain errors to API errors
pub fn map_domain_error(e: &DomainError) -> ApiError {
    match e {
        DomainError::ContactNotFound { .. } => ApiError::not_found(e.to_string()),
        DomainError::PhoneNumberExists { .. } => ApiError::conflict("phone_number", e.to_string()),
        DomainError::EmailExists { .. } => ApiError::conflict("email", e.to_string()),
        DomainError::EmptyName | DomainError::NameTooLong { .. } => {
            ApiError::validation("name", e.to_string())
        }
        DomainError::EmptyPhoneNumber => ApiError::validation("phone_number", e.to_string()),
        DomainError::EmptyEmail
        | DomainError::InvalidEmail { .. }
        | DomainError::EmailTooLong { .. } => ApiError::validation("email", e.to_string()),
        DomainError::Database { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Database error occurred");
            ApiError::internal()
        }
    }
}
