// handlers/mod.rs - Handler tiers
//
// Public (no auth): /api/v1/auth/*, /health
// Protected (Bearer access token): /api/v1/employees/*

pub mod public;
pub mod protected;

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;

/// Unwraps a JSON body, turning axum's rejection into our error envelope
pub(crate) fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::invalid_json(rejection.body_text()))
}

/// Path ids that are not UUIDs cannot name a stored record
pub(crate) fn parse_id(raw: &str, not_found: &'static str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::not_found(not_found))
}
