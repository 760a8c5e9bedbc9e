//! Value endpoints, scoped to an owning category.

use crate::error::{ApiError, DaoError};
use crate::handlers::{assignment_usage_count, parse_body};
use crate::model::{AttributeValue, ValuePayload};
use crate::response::ApiResponse;
use crate::state::AppState;
use serde_json::Value;

const MISSING_FIELDS: &str = "Missing required fields: value, slug";

pub async fn index(state: &AppState, category_id: i64) -> Result<ApiResponse, ApiError> {
    let values = state.dao.list_values(category_id).await?;
    Ok(ApiResponse::ok("values", values))
}

pub async fn show(state: &AppState, category_id: i64, id: i64) -> Result<ApiResponse, ApiError> {
    let value = find_by_id(state, category_id, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Value not found".into()))?;
    Ok(ApiResponse::ok("value", value))
}

pub async fn create(
    state: &AppState,
    category_id: i64,
    body: &Value,
) -> Result<ApiResponse, ApiError> {
    let payload: ValuePayload = parse_body(body)?;
    let (value, slug) = payload
        .required()
        .ok_or_else(|| ApiError::Validation(MISSING_FIELDS.into()))?;
    let created = upsert_and_fetch(state, category_id, value, slug, &payload)
        .await
        .map_err(|e| ApiError::Persistence(format!("Failed to create value: {e}")))?;
    Ok(ApiResponse::created("value", created))
}

/// Update is upsert by `(category_id, slug)`, matching create; the path id
/// is not consulted.
pub async fn update(
    state: &AppState,
    category_id: i64,
    _id: i64,
    body: &Value,
) -> Result<ApiResponse, ApiError> {
    let payload: ValuePayload = parse_body(body)?;
    let (value, slug) = payload
        .required()
        .ok_or_else(|| ApiError::Validation(MISSING_FIELDS.into()))?;
    let updated = upsert_and_fetch(state, category_id, value, slug, &payload)
        .await
        .map_err(|e| ApiError::Persistence(format!("Failed to update value: {e}")))?;
    Ok(ApiResponse::ok("value", updated))
}

pub async fn delete(state: &AppState, category_id: i64, id: i64) -> Result<ApiResponse, ApiError> {
    let value = find_by_id(state, category_id, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Value not found".into()))?;

    let in_use = assignment_usage_count(state, "value_id", id).await?;
    if in_use > 0 {
        tracing::warn!(value_id = id, count = in_use, "value delete blocked");
        return Err(ApiError::Conflict(
            "Cannot delete value that is in use by products".into(),
        ));
    }

    state
        .dao
        .upsert_value(
            category_id,
            &value.value,
            &value.slug,
            value.sort_order,
            false,
        )
        .await
        .map_err(|e| ApiError::Persistence(format!("Failed to deactivate value: {e}")))?;
    Ok(ApiResponse::message("Value deactivated"))
}

async fn find_by_id(
    state: &AppState,
    category_id: i64,
    id: i64,
) -> Result<Option<AttributeValue>, ApiError> {
    let values = state.dao.list_values(category_id).await?;
    Ok(values.into_iter().find(|v| v.id == id))
}

async fn upsert_and_fetch(
    state: &AppState,
    category_id: i64,
    value: &str,
    slug: &str,
    payload: &ValuePayload,
) -> Result<Option<AttributeValue>, DaoError> {
    state
        .dao
        .upsert_value(
            category_id,
            value,
            slug,
            payload.sort_order.unwrap_or(0),
            payload.active.unwrap_or(true),
        )
        .await?;
    let values = state.dao.list_values(category_id).await?;
    Ok(values.into_iter().find(|v| v.slug == slug))
}
