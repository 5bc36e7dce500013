use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Wrapper for API responses that automatically adds success envelope.
///
/// `data` lands under a `data` key by default; [`ApiResponse::fields`]
/// merges an object's keys into the envelope instead, for endpoints whose
/// clients read `user` or `authToken` at the top level.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub message: Option<&'static str>,
    pub status_code: Option<StatusCode>,
    pub flatten: bool,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful API response with default 200 status
    pub fn success(data: T) -> Self {
        Self {
            data,
            message: None,
            status_code: None, // Default to 200 OK
            flatten: false,
        }
    }

    /// Top-level fields rather than a nested `data` object
    pub fn fields(data: T) -> Self {
        Self {
            flatten: true,
            ..Self::success(data)
        }
    }

    /// Create an API response with custom status code
    pub fn with_status(mut self, status_code: StatusCode) -> Self {
        self.status_code = Some(status_code);
        self
    }

    /// Create a 201 Created response
    pub fn created(self) -> Self {
        self.with_status(StatusCode::CREATED)
    }

    pub fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

impl ApiResponse<()> {
    /// Envelope carrying only a message
    pub fn message(message: &'static str) -> Self {
        ApiResponse::success(()).with_message(message)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status_code.unwrap_or(StatusCode::OK);

        // Convert data to JSON Value for consistent envelope format
        let data_value = match serde_json::to_value(&self.data) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "success": false,
                        "error": "Failed to serialize response data",
                        "code": "INTERNAL_SERVER_ERROR"
                    })),
                )
                    .into_response();
            }
        };

        // Wrap in success envelope
        let mut envelope = Map::new();
        envelope.insert("success".to_string(), Value::Bool(true));
        if let Some(message) = self.message {
            envelope.insert("message".to_string(), Value::String(message.to_string()));
        }
        match data_value {
            Value::Null => {}
            Value::Object(fields) if self.flatten => envelope.extend(fields),
            other => {
                envelope.insert("data".to_string(), other);
            }
        }

        (status, Json(Value::Object(envelope))).into_response()
    }
}

// Convenience type alias
pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;
