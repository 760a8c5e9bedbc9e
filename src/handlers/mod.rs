//! The four resource controllers plus shared body parsing.

pub mod assignments;
pub mod categories;
pub mod values;

use crate::error::ApiError;
use crate::state::AppState;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Parse a request body into a typed payload. An absent body (`Null`)
/// becomes the payload's default so the required-field check names the
/// missing fields; a body that fails typed parsing is a 400 outright.
pub(crate) fn parse_body<T: DeserializeOwned + Default>(body: &Value) -> Result<T, ApiError> {
    if body.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(body.clone())
        .map_err(|e| ApiError::Validation(format!("Invalid request body: {e}")))
}

/// COUNT of assignment rows referencing `id` through `column`. Issued
/// through the raw adapter; the DAO exposes no usage query.
pub(crate) async fn assignment_usage_count(
    state: &AppState,
    column: &str,
    id: i64,
) -> Result<i64, ApiError> {
    let prefix = state.db.table_prefix();
    let sql = format!(
        "SELECT COUNT(*) AS count FROM `{prefix}product_attribute_assignments` WHERE {column} = :{column}"
    );
    let rows = state
        .db
        .query(&sql, &[(column, serde_json::json!(id))])
        .await?;
    Ok(rows
        .first()
        .and_then(|row| row.get("count"))
        .and_then(Value::as_i64)
        .unwrap_or(0))
}
