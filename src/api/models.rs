use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::config::CONFIG;
use crate::core::errors::CatalogError;

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        MessageResponse {
            message: message.to_string(),
        }
    }
}

// Error response struct
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// Every schema violation, joined with ", "
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        ErrorResponse {
            error: error.into(),
            details: None,
        }
    }
}

// Newtype wrapper for CatalogError to implement IntoResponse
pub struct ApiError(pub CatalogError);

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let message = self.0.to_string();
        let (status, body) = match self.0 {
            CatalogError::Unauthenticated(_) | CatalogError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, ErrorResponse::new(message))
            }
            CatalogError::Forbidden => (StatusCode::FORBIDDEN, ErrorResponse::new(message)),
            CatalogError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: message.to_string(),
                    details: Some(details.join(", ")),
                },
            ),
            CatalogError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorResponse::new(message)),
            CatalogError::DuplicateKey { .. } => (StatusCode::CONFLICT, ErrorResponse::new(message)),
            CatalogError::StorageError(_) | CatalogError::InternalServerError(_) => {
                error!("request failed: {}", message);
                let exposed = if CONFIG.expose_internal_errors {
                    message
                } else {
                    "Internal server error".to_string()
                };
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::new(exposed))
            }
        };
        (status, Json(body)).into_response()
    }
}
