//! Pure method+path dispatch to the resource handlers.
//!
//! `dispatch` takes the method as a literal string and the path below the
//! mount point, and returns an [`ApiResponse`]. No headers, no transport:
//! tests call it directly, and [`crate::routes::api_routes`] adapts it to
//! axum.

use crate::error::ApiError;
use crate::handlers::{assignments, categories, values};
use crate::response::ApiResponse;
use crate::state::AppState;
use serde_json::Value;

pub async fn dispatch(state: &AppState, method: &str, path: &str, body: &Value) -> ApiResponse {
    tracing::debug!(method, path, "dispatch");
    match route(state, method, path, body).await {
        Ok(resp) => resp,
        Err(e) => {
            tracing::debug!(method, path, status = %e.status(), error = %e, "request failed");
            ApiResponse::from(e)
        }
    }
}

async fn route(
    state: &AppState,
    method: &str,
    path: &str,
    body: &Value,
) -> Result<ApiResponse, ApiError> {
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    match segments.split_first() {
        None | Some((&"", _)) => Err(ApiError::Validation("Invalid API path".into())),
        Some((&"categories", rest)) => route_categories(state, method, rest, body).await,
        Some((&"products", rest)) => route_products(state, method, rest, body).await,
        Some((resource, _)) => Err(ApiError::NotFound(format!("Unknown resource: {resource}"))),
    }
}

async fn route_categories(
    state: &AppState,
    method: &str,
    rest: &[&str],
    body: &Value,
) -> Result<ApiResponse, ApiError> {
    match rest.split_first() {
        None | Some((&"", _)) => match method {
            "GET" => categories::index(state).await,
            "POST" => categories::create(state, body).await,
            _ => Err(ApiError::MethodNotAllowed),
        },
        Some((segment, tail)) => {
            let id = parse_id(segment, "Invalid category id")?;
            if tail.first() == Some(&"values") {
                return route_values(state, method, id, &tail[1..], body).await;
            }
            // Segments past the id are ignored, as in the host application's
            // router.
            match method {
                "GET" => categories::show(state, id).await,
                "PUT" => categories::update(state, id, body).await,
                "DELETE" => categories::delete(state, id).await,
                _ => Err(ApiError::MethodNotAllowed),
            }
        }
    }
}

async fn route_values(
    state: &AppState,
    method: &str,
    category_id: i64,
    rest: &[&str],
    body: &Value,
) -> Result<ApiResponse, ApiError> {
    match rest.split_first() {
        None | Some((&"", _)) => match method {
            "GET" => values::index(state, category_id).await,
            "POST" => values::create(state, category_id, body).await,
            _ => Err(ApiError::MethodNotAllowed),
        },
        Some((segment, _)) => {
            let id = parse_id(segment, "Invalid value id")?;
            match method {
                "GET" => values::show(state, category_id, id).await,
                "PUT" => values::update(state, category_id, id, body).await,
                "DELETE" => values::delete(state, category_id, id).await,
                _ => Err(ApiError::MethodNotAllowed),
            }
        }
    }
}

async fn route_products(
    state: &AppState,
    method: &str,
    rest: &[&str],
    body: &Value,
) -> Result<ApiResponse, ApiError> {
    match rest.split_first() {
        None | Some((&"", _)) => Err(ApiError::Validation("Product stock_id required".into())),
        Some((stock_id, tail)) => {
            if tail.first() == Some(&"assignments") {
                route_assignments(state, method, stock_id, &tail[1..], body).await
            } else {
                Err(ApiError::NotFound("Unknown products endpoint".into()))
            }
        }
    }
}

async fn route_assignments(
    state: &AppState,
    method: &str,
    stock_id: &str,
    rest: &[&str],
    body: &Value,
) -> Result<ApiResponse, ApiError> {
    match rest.split_first() {
        None | Some((&"", _)) => match method {
            "GET" => assignments::index(state, stock_id).await,
            "POST" => assignments::create(state, stock_id, body).await,
            "PUT" => assignments::bulk_replace(state, stock_id, body).await,
            _ => Err(ApiError::MethodNotAllowed),
        },
        Some((segment, _)) => {
            let id = parse_id(segment, "Invalid assignment id")?;
            match method {
                "GET" => assignments::show(state, stock_id, id).await,
                "DELETE" => assignments::delete(state, stock_id, id).await,
                _ => Err(ApiError::MethodNotAllowed),
            }
        }
    }
}

fn parse_id(segment: &str, message: &str) -> Result<i64, ApiError> {
    segment
        .parse()
        .map_err(|_| ApiError::Validation(message.into()))
}
