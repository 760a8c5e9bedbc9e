//! Collaborator contracts: the catalog DAO and the raw DB adapter.
//!
//! Both are injected by the host application; this crate never opens a
//! database connection itself. An in-memory implementation of both lives in
//! [`crate::memory`] for tests and demos.

use crate::error::DaoError;
use crate::model::{Assignment, AttributeValue, Category};
use async_trait::async_trait;
use serde_json::Value;

/// Persistence contract for the attribute catalog.
///
/// Upserts are keyed by natural key (`code` for categories,
/// `(category_id, slug)` for values): the same key updates in place and
/// never creates a second row. `list_assignments` must return rows in
/// stable insertion order.
#[async_trait]
pub trait AttributesDao: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<Category>, DaoError>;

    async fn upsert_category(
        &self,
        code: &str,
        label: &str,
        description: &str,
        sort_order: i32,
        active: bool,
    ) -> Result<(), DaoError>;

    async fn list_values(&self, category_id: i64) -> Result<Vec<AttributeValue>, DaoError>;

    async fn upsert_value(
        &self,
        category_id: i64,
        value: &str,
        slug: &str,
        sort_order: i32,
        active: bool,
    ) -> Result<(), DaoError>;

    async fn list_assignments(&self, stock_id: &str) -> Result<Vec<Assignment>, DaoError>;

    /// Insert one assignment row and return its id.
    async fn add_assignment(
        &self,
        stock_id: &str,
        category_id: i64,
        value_id: i64,
        sort_order: i32,
    ) -> Result<i64, DaoError>;

    async fn delete_assignment(&self, id: i64) -> Result<(), DaoError>;
}

/// Raw database access used only where the DAO has no operation: the two
/// usage-count checks guarding soft deletes, and the delete-all step of a
/// bulk replace. SQL uses `:name` placeholders resolved against `params`,
/// and table names are built from [`DbAdapter::table_prefix`].
#[async_trait]
pub trait DbAdapter: Send + Sync {
    /// Host table-name prefix (e.g. `"0_"` for a FrontAccounting install).
    fn table_prefix(&self) -> String;

    async fn query(
        &self,
        sql: &str,
        params: &[(&str, Value)],
    ) -> Result<Vec<serde_json::Map<String, Value>>, DaoError>;

    async fn execute(&self, sql: &str, params: &[(&str, Value)]) -> Result<(), DaoError>;
}
