//! Pure response value and envelope helpers.
//!
//! Handlers and the dispatcher produce [`ApiResponse`] values; only the
//! transport adapter turns them into HTTP responses. Tests call the
//! dispatcher directly and inspect status and body without any transport.

use crate::error::ApiError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    pub fn json(status: StatusCode, body: Value) -> Self {
        ApiResponse { status, body }
    }

    /// 200 with `{"<key>": data}`.
    pub fn ok<T: Serialize>(key: &str, data: T) -> Self {
        Self::with_status(StatusCode::OK, key, data)
    }

    /// 201 with `{"<key>": data}`.
    pub fn created<T: Serialize>(key: &str, data: T) -> Self {
        Self::with_status(StatusCode::CREATED, key, data)
    }

    /// 200 with `{"message": text}`.
    pub fn message(text: &str) -> Self {
        ApiResponse {
            status: StatusCode::OK,
            body: serde_json::json!({ "message": text }),
        }
    }

    fn with_status<T: Serialize>(status: StatusCode, key: &str, data: T) -> Self {
        let data = serde_json::to_value(data).unwrap_or(Value::Null);
        ApiResponse {
            status,
            body: serde_json::json!({ key: data }),
        }
    }
}

impl From<ApiError> for ApiResponse {
    fn from(e: ApiError) -> Self {
        ApiResponse {
            status: e.status(),
            body: serde_json::json!({ "error": e.to_string() }),
        }
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
