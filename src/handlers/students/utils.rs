use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query,
    },
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::error::ApiError;

/// Record ids are integers; anything else cannot name an existing record.
pub fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim().parse::<i64>().map_err(|_| {
        tracing::debug!("Rejecting non-integer student id {:?}", raw);
        ApiError::not_found("Not found.")
    })
}

/// Unwrap a JSON body. Oversized bodies and a wrong content type keep their
/// own status; everything else is `INVALID_JSON`.
pub fn json_payload(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    let rejection = match payload {
        Ok(Json(value)) => return Ok(value),
        Err(rejection) => rejection,
    };

    tracing::debug!("Rejected request body ({}): {}", rejection.status(), rejection.body_text());
    let err = match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => ApiError::payload_too_large("Request body is too large"),
        StatusCode::UNSUPPORTED_MEDIA_TYPE => {
            ApiError::unsupported_media_type("Expected request with `Content-Type: application/json`")
        }
        _ => ApiError::invalid_json(format!("Invalid JSON: {}", rejection.body_text())),
    };
    Err(err)
}

/// Query string parse failures become `BAD_REQUEST` in the error envelope
pub fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    query.map(|Query(params)| params).map_err(|rejection| {
        tracing::debug!("Rejected query string: {}", rejection.body_text());
        ApiError::bad_request(rejection.body_text())
    })
}
