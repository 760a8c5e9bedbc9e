//! Catalog records and typed request payloads.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Attribute category: a classification axis such as Color or Size.
/// `code` is the natural key; upserts with the same code update in place.
/// Categories are never hard-deleted, only deactivated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: i64,
    pub code: String,
    pub label: String,
    pub description: String,
    pub sort_order: i32,
    pub active: bool,
}

/// Attribute value within a category (e.g. Red within Color), keyed by
/// `(category_id, slug)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AttributeValue {
    pub id: i64,
    pub category_id: i64,
    pub value: String,
    pub slug: String,
    pub sort_order: i32,
    pub active: bool,
}

/// Binding of a product (stock_id) to one category+value pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Assignment {
    pub id: i64,
    pub stock_id: String,
    pub category_id: i64,
    pub value_id: i64,
    pub sort_order: i32,
}

/// Create/update body for a category. `code` and `label` are required and
/// must be non-empty; the rest default to `""`, `0`, `true`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CategoryPayload {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sort_order: Option<i32>,
    #[serde(default)]
    pub active: Option<bool>,
}

/// Create/update body for a value. `value` and `slug` are required and must
/// be non-empty.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ValuePayload {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub sort_order: Option<i32>,
    #[serde(default)]
    pub active: Option<bool>,
}

/// Create body for an assignment. Both ids are required.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct AssignmentPayload {
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub value_id: Option<i64>,
    #[serde(default)]
    pub sort_order: Option<i32>,
}

/// Bulk-replace body for a product's assignments. The list itself is
/// required; entries are validated individually.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct BulkAssignmentsPayload {
    #[serde(default)]
    pub assignments: Option<serde_json::Value>,
}

impl BulkAssignmentsPayload {
    /// The submitted list, or `None` when `assignments` is absent or not an
    /// array.
    pub fn entries(&self) -> Option<&Vec<serde_json::Value>> {
        self.assignments.as_ref()?.as_array()
    }
}

/// One entry of a bulk-replace list. Entries missing either id are skipped
/// rather than rejected.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct BulkEntry {
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub value_id: Option<i64>,
    #[serde(default)]
    pub sort_order: Option<i32>,
}

fn present(s: &Option<String>) -> bool {
    matches!(s.as_deref(), Some(v) if !v.is_empty())
}

impl CategoryPayload {
    /// Required fields, validated the way the API contract states them:
    /// present and non-empty.
    pub fn required(&self) -> Option<(&str, &str)> {
        if present(&self.code) && present(&self.label) {
            Some((
                self.code.as_deref().unwrap_or_default(),
                self.label.as_deref().unwrap_or_default(),
            ))
        } else {
            None
        }
    }
}

impl ValuePayload {
    pub fn required(&self) -> Option<(&str, &str)> {
        if present(&self.value) && present(&self.slug) {
            Some((
                self.value.as_deref().unwrap_or_default(),
                self.slug.as_deref().unwrap_or_default(),
            ))
        } else {
            None
        }
    }
}

impl AssignmentPayload {
    pub fn required(&self) -> Option<(i64, i64)> {
        match (self.category_id, self.value_id) {
            (Some(c), Some(v)) => Some((c, v)),
            _ => None,
        }
    }
}
