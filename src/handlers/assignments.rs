//! Assignment endpoints: per-product attribute bindings, including bulk
//! replacement of a product's whole assignment set.

use crate::error::ApiError;
use crate::handlers::parse_body;
use crate::model::{Assignment, AssignmentPayload, BulkAssignmentsPayload, BulkEntry};
use crate::response::ApiResponse;
use crate::state::AppState;
use serde_json::{json, Value};

pub async fn index(state: &AppState, stock_id: &str) -> Result<ApiResponse, ApiError> {
    let assignments = state.dao.list_assignments(stock_id).await?;
    Ok(ApiResponse::ok("assignments", assignments))
}

pub async fn show(state: &AppState, stock_id: &str, id: i64) -> Result<ApiResponse, ApiError> {
    let assignment = find_by_id(state, stock_id, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Assignment not found".into()))?;
    Ok(ApiResponse::ok("assignment", assignment))
}

pub async fn create(state: &AppState, stock_id: &str, body: &Value) -> Result<ApiResponse, ApiError> {
    let payload: AssignmentPayload = parse_body(body)?;
    let (category_id, value_id) = payload.required().ok_or_else(|| {
        ApiError::Validation("Missing required fields: category_id, value_id".into())
    })?;

    let categories = state.dao.list_categories().await?;
    if !categories.iter().any(|c| c.id == category_id) {
        return Err(ApiError::Validation("Invalid category_id".into()));
    }

    let values = state.dao.list_values(category_id).await?;
    if !values.iter().any(|v| v.id == value_id) {
        return Err(ApiError::Validation(
            "Invalid value_id for the specified category".into(),
        ));
    }

    let new_id = state
        .dao
        .add_assignment(stock_id, category_id, value_id, payload.sort_order.unwrap_or(0))
        .await
        .map_err(|e| ApiError::Persistence(format!("Failed to create assignment: {e}")))?;
    let assignments = state
        .dao
        .list_assignments(stock_id)
        .await
        .map_err(|e| ApiError::Persistence(format!("Failed to create assignment: {e}")))?;
    let created = assignments.into_iter().find(|a| a.id == new_id);
    Ok(ApiResponse::created("assignment", created))
}

pub async fn delete(state: &AppState, stock_id: &str, id: i64) -> Result<ApiResponse, ApiError> {
    find_by_id(state, stock_id, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Assignment not found".into()))?;

    state
        .dao
        .delete_assignment(id)
        .await
        .map_err(|e| ApiError::Persistence(format!("Failed to delete assignment: {e}")))?;
    Ok(ApiResponse::message("Assignment deleted"))
}

/// Replace a product's whole assignment set: delete all rows for the stock
/// id through the raw adapter, then re-add each well-formed entry. Replaces
/// for the same stock id are serialized by [`crate::state::StockLocks`];
/// entries missing either id are skipped without error.
pub async fn bulk_replace(
    state: &AppState,
    stock_id: &str,
    body: &Value,
) -> Result<ApiResponse, ApiError> {
    let payload: BulkAssignmentsPayload = parse_body(body)?;
    let entries = payload
        .entries()
        .ok_or_else(|| ApiError::Validation("Missing or invalid assignments array".into()))?;

    let _guard = state.locks.acquire(stock_id).await;

    let prefix = state.db.table_prefix();
    let sql =
        format!("DELETE FROM {prefix}product_attribute_assignments WHERE stock_id = :stock_id");
    state
        .db
        .execute(&sql, &[("stock_id", json!(stock_id))])
        .await
        .map_err(|e| ApiError::Persistence(format!("Failed to update assignments: {e}")))?;

    for entry in entries {
        let entry: BulkEntry = match serde_json::from_value(entry.clone()) {
            Ok(entry) => entry,
            Err(_) => continue,
        };
        let (Some(category_id), Some(value_id)) = (entry.category_id, entry.value_id) else {
            continue;
        };
        state
            .dao
            .add_assignment(stock_id, category_id, value_id, entry.sort_order.unwrap_or(0))
            .await
            .map_err(|e| ApiError::Persistence(format!("Failed to update assignments: {e}")))?;
    }

    let assignments = state
        .dao
        .list_assignments(stock_id)
        .await
        .map_err(|e| ApiError::Persistence(format!("Failed to update assignments: {e}")))?;
    Ok(ApiResponse::ok("assignments", assignments))
}

async fn find_by_id(
    state: &AppState,
    stock_id: &str,
    id: i64,
) -> Result<Option<Assignment>, ApiError> {
    let assignments = state.dao.list_assignments(stock_id).await?;
    Ok(assignments.into_iter().find(|a| a.id == id))
}
