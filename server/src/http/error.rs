use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use super::json_response;
use crate::rsvp::RsvpError;

pub const INVALID_JSON: &str = "Invalid JSON payload.";
pub const NOT_FOUND: &str = "RSVP not found.";
pub const PAYLOAD_TOO_LARGE: &str = "Request body too large.";
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed.";
pub const INTERNAL: &str = "Internal server error.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Malformed JSON body")]
    MalformedJson,

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
            ApiError::MalformedJson => (StatusCode::BAD_REQUEST, INVALID_JSON),
            ApiError::PayloadTooLarge => (StatusCode::PAYLOAD_TOO_LARGE, PAYLOAD_TOO_LARGE),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, NOT_FOUND),
            ApiError::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED),
            ApiError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL)
            }
        };

        json_response(status, &ErrorBody { message })
    }
}

impl From<RsvpError> for ApiError {
    fn from(err: RsvpError) -> Self {
        match err {
            RsvpError::Validation(e) => ApiError::Validation(e.0),
            RsvpError::NotFound(id) => ApiError::NotFound(id),
            RsvpError::Storage(e) => ApiError::Internal(e.to_string()),
        }
    }
}
