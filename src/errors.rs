// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Application error types
/// DOCUMENTATION: Comprehensive error enum for all possible failures
/// Each variant maps to appropriate HTTP status code and error response
#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("No token, authorization denied")]
    Unauthorized,

    #[error("Token is not valid")]
    InvalidToken,

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

impl GalleryError {
    /// Stable machine-readable code used in the error body
    pub fn code(&self) -> &'static str {
        match self {
            GalleryError::NotFound(_) => "NOT_FOUND",
            GalleryError::AlreadyExists(_) => "ALREADY_EXISTS",
            GalleryError::Conflict(_) => "CONFLICT",
            GalleryError::DatabaseError(_) => "DATABASE_ERROR",
            GalleryError::InvalidInput(_) => "INVALID_INPUT",
            GalleryError::ValidationError(_) => "VALIDATION_ERROR",
            GalleryError::InvalidCredentials => "INVALID_CREDENTIALS",
            GalleryError::Unauthorized => "UNAUTHORIZED",
            GalleryError::InvalidToken => "INVALID_TOKEN",
            GalleryError::InternalError(_) => "INTERNAL_ERROR",
            GalleryError::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
        }
    }

    /// Map a sqlx error, promoting constraint violations to client errors
    /// DOCUMENTATION: 23505 = unique_violation, 23503 = foreign_key_violation
    pub fn from_sqlx(err: sqlx::Error, context: &str) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.code().as_deref() {
                Some("23505") => {
                    return GalleryError::AlreadyExists(format!("{} already exists", context))
                }
                Some("23503") => {
                    return GalleryError::Conflict(format!(
                        "{} is still referenced by other records",
                        context
                    ))
                }
                _ => {}
            }
        }
        log::error!("Database error ({}): {}", context, err);
        GalleryError::DatabaseError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for GalleryError {
    fn from(errors: validator::ValidationErrors) -> Self {
        GalleryError::ValidationError(errors.to_string())
    }
}

/// Convert GalleryError to HTTP response
/// DOCUMENTATION: Maps error types to HTTP status codes and JSON responses
impl ResponseError for GalleryError {
    fn error_response(&self) -> HttpResponse {
        let body = json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }
        });

        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            GalleryError::NotFound(_) => StatusCode::NOT_FOUND,
            GalleryError::AlreadyExists(_) => StatusCode::BAD_REQUEST,
            GalleryError::Conflict(_) => StatusCode::CONFLICT,
            GalleryError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GalleryError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            GalleryError::ValidationError(_) => StatusCode::BAD_REQUEST,
            GalleryError::InvalidCredentials => StatusCode::BAD_REQUEST,
            GalleryError::Unauthorized => StatusCode::UNAUTHORIZED,
            GalleryError::InvalidToken => StatusCode::UNAUTHORIZED,
            GalleryError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GalleryError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
        }
    }
}
