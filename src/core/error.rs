use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};

use crate::core::response::json_response;
use crate::modules::orders::repositories::StoreError;

/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Main application error type
///
/// The display text of each variant is exactly what the caller sees in the
/// `message` field of the error body.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Missing or invalid configuration (including gateway credentials)
    #[error("{0}")]
    Configuration(String),

    /// No HTTPS client could be constructed on this runtime
    #[error("HTTPS client unavailable: {0}")]
    UnsupportedRuntime(String),

    /// Missing or empty checkout fields
    #[error("{0}")]
    Validation(String),

    /// Request body is not valid JSON
    #[error("Invalid JSON body: {0}")]
    MalformedRequest(#[source] serde_json::Error),

    /// Order store read/write failure; the path and OS error stay in `Debug`
    #[error("Failed to save order")]
    Persistence(#[from] StoreError),

    /// Payment gateway rejected the request or could not be reached
    #[error("YooKassa API error: {0}")]
    Gateway(String),

    /// Any method/path other than the checkout endpoint
    #[error("Not Found")]
    NotFound,
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        json_response(
            self.status_code(),
            &serde_json::json!({ "message": self.to_string() }),
        )
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Configuration(_)
            | AppError::UnsupportedRuntime(_)
            | AppError::MalformedRequest(_)
            | AppError::Persistence(_)
            | AppError::Gateway(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Helper functions for common error scenarios
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::Configuration(msg.into())
    }

    pub fn gateway(msg: impl Into<String>) -> Self {
        AppError::Gateway(msg.into())
    }
}
