//! Transport adapter: binds the pure dispatcher to axum.

use crate::response::ApiResponse;
use crate::router::dispatch;
use crate::state::AppState;
use axum::extract::{Request, State};
use axum::Router;
use serde_json::Value;
use tower_http::limit::RequestBodyLimitLayer;

const BODY_LIMIT: usize = 1024 * 1024;

/// All catalog routes as one axum service. Path and method matching happen
/// in [`dispatch`]; this layer only reads the body and writes status,
/// `Content-Type`, and the JSON body once per request.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .fallback(handle)
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT))
        .with_state(state)
}

async fn handle(State(state): State<AppState>, req: Request) -> ApiResponse {
    let method = req.method().as_str().to_owned();
    let path = req.uri().path().to_owned();
    // Absent or malformed JSON is an empty body; required-field validation
    // reports what is missing.
    let body = match axum::body::to_bytes(req.into_body(), BODY_LIMIT).await {
        Ok(bytes) => serde_json::from_slice::<Value>(&bytes).unwrap_or(Value::Null),
        Err(_) => Value::Null,
    };
    dispatch(&state, &method, &path, &body).await
}
