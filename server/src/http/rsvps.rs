//! `/api/rsvps` handlers.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use std::sync::Arc;

use super::error::ApiError;
use super::json_response;
use crate::persistence::RsvpRepository;
use crate::rsvp::RsvpService;

type ServiceState<R> = State<Arc<RsvpService<R>>>;

type RawBody = Result<Bytes, BytesRejection>;

/// Parse the request body as untyped JSON; shape checks are the validator's job.
fn parse_body(body: RawBody) -> Result<Value, ApiError> {
    let body = body.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Failed to read request body");
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge
        } else {
            ApiError::MalformedJson
        }
    })?;
    serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!(error = %e, "Rejected malformed JSON body");
        ApiError::MalformedJson
    })
}

pub async fn list_rsvps<R: RsvpRepository>(State(service): ServiceState<R>) -> Response {
    json_response(StatusCode::OK, &service.list().await)
}

pub async fn create_rsvp<R: RsvpRepository>(
    State(service): ServiceState<R>,
    body: RawBody,
) -> Result<Response, ApiError> {
    let raw = parse_body(body)?;
    let record = service.create(&raw).await?;
    Ok(json_response(StatusCode::CREATED, &record))
}

pub async fn replace_rsvp<R: RsvpRepository>(
    State(service): ServiceState<R>,
    Path(id): Path<String>,
    body: RawBody,
) -> Result<Response, ApiError> {
    let raw = parse_body(body)?;
    let record = service.replace(&id, &raw).await?;
    Ok(json_response(StatusCode::OK, &record))
}

pub async fn delete_rsvp<R: RsvpRepository>(
    State(service): ServiceState<R>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    if service.remove(&id).await? {
        Ok(StatusCode::NO_CONTENT.into_response())
    } else {
        Err(ApiError::NotFound(id))
    }
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
