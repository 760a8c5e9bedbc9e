//! Category endpoints: list, show, upsert-by-code create/update, soft delete.

use crate::error::{ApiError, DaoError};
use crate::handlers::{assignment_usage_count, parse_body};
use crate::model::{Category, CategoryPayload};
use crate::response::ApiResponse;
use crate::state::AppState;
use serde_json::Value;

const MISSING_FIELDS: &str = "Missing required fields: code, label";

pub async fn index(state: &AppState) -> Result<ApiResponse, ApiError> {
    let categories = state.dao.list_categories().await?;
    Ok(ApiResponse::ok("categories", categories))
}

pub async fn show(state: &AppState, id: i64) -> Result<ApiResponse, ApiError> {
    let category = find_by_id(state, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Category not found".into()))?;
    Ok(ApiResponse::ok("category", category))
}

pub async fn create(state: &AppState, body: &Value) -> Result<ApiResponse, ApiError> {
    let payload: CategoryPayload = parse_body(body)?;
    let (code, label) = payload
        .required()
        .ok_or_else(|| ApiError::Validation(MISSING_FIELDS.into()))?;
    let created = upsert_and_fetch(state, code, label, &payload)
        .await
        .map_err(|e| ApiError::Persistence(format!("Failed to create category: {e}")))?;
    Ok(ApiResponse::created("category", created))
}

/// Update is upsert-by-code, matching create; the path id is not consulted.
pub async fn update(state: &AppState, _id: i64, body: &Value) -> Result<ApiResponse, ApiError> {
    let payload: CategoryPayload = parse_body(body)?;
    let (code, label) = payload
        .required()
        .ok_or_else(|| ApiError::Validation(MISSING_FIELDS.into()))?;
    let updated = upsert_and_fetch(state, code, label, &payload)
        .await
        .map_err(|e| ApiError::Persistence(format!("Failed to update category: {e}")))?;
    Ok(ApiResponse::ok("category", updated))
}

pub async fn delete(state: &AppState, id: i64) -> Result<ApiResponse, ApiError> {
    let category = find_by_id(state, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Category not found".into()))?;

    let in_use = assignment_usage_count(state, "category_id", id).await?;
    if in_use > 0 {
        tracing::warn!(category_id = id, count = in_use, "category delete blocked");
        return Err(ApiError::Conflict(
            "Cannot delete category that is in use by products".into(),
        ));
    }

    state
        .dao
        .upsert_category(
            &category.code,
            &category.label,
            &category.description,
            category.sort_order,
            false,
        )
        .await
        .map_err(|e| ApiError::Persistence(format!("Failed to deactivate category: {e}")))?;
    Ok(ApiResponse::message("Category deactivated"))
}

async fn find_by_id(state: &AppState, id: i64) -> Result<Option<Category>, ApiError> {
    let categories = state.dao.list_categories().await?;
    Ok(categories.into_iter().find(|c| c.id == id))
}

/// Upsert with contract defaults, then re-read and return the row matched
/// by code.
async fn upsert_and_fetch(
    state: &AppState,
    code: &str,
    label: &str,
    payload: &CategoryPayload,
) -> Result<Option<Category>, DaoError> {
    state
        .dao
        .upsert_category(
            code,
            label,
            payload.description.as_deref().unwrap_or(""),
            payload.sort_order.unwrap_or(0),
            payload.active.unwrap_or(true),
        )
        .await?;
    let categories = state.dao.list_categories().await?;
    Ok(categories.into_iter().find(|c| c.code == code))
}
