//! In-memory implementation of both collaborators over one shared store.
//!
//! Stands in for the host application's persistence in demos and tests:
//! upserts are keyed by natural key, each entity has its own id sequence,
//! and the adapter recognizes the SQL shapes the handlers issue (the two
//! usage COUNTs and the per-stock delete-all).

use crate::dao::{AttributesDao, DbAdapter};
use crate::error::DaoError;
use crate::model::{Assignment, AttributeValue, Category};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct StoreInner {
    categories: Vec<Category>,
    values: Vec<AttributeValue>,
    assignments: Vec<Assignment>,
    next_category_id: i64,
    next_value_id: i64,
    next_assignment_id: i64,
}

#[derive(Clone)]
pub struct MemoryStore {
    prefix: String,
    inner: Arc<RwLock<StoreInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_prefix("")
    }

    /// Store whose adapter reports the given table prefix, mirroring a host
    /// install (e.g. `"0_"`).
    pub fn with_prefix(prefix: &str) -> Self {
        MemoryStore {
            prefix: prefix.to_string(),
            inner: Arc::new(RwLock::new(StoreInner::default())),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AttributesDao for MemoryStore {
    async fn list_categories(&self) -> Result<Vec<Category>, DaoError> {
        Ok(self.inner.read().await.categories.clone())
    }

    async fn upsert_category(
        &self,
        code: &str,
        label: &str,
        description: &str,
        sort_order: i32,
        active: bool,
    ) -> Result<(), DaoError> {
        let mut store = self.inner.write().await;
        match store.categories.iter().position(|c| c.code == code) {
            Some(i) => {
                let existing = &mut store.categories[i];
                existing.label = label.to_string();
                existing.description = description.to_string();
                existing.sort_order = sort_order;
                existing.active = active;
            }
            None => {
                store.next_category_id += 1;
                let id = store.next_category_id;
                store.categories.push(Category {
                    id,
                    code: code.to_string(),
                    label: label.to_string(),
                    description: description.to_string(),
                    sort_order,
                    active,
                });
            }
        }
        Ok(())
    }

    async fn list_values(&self, category_id: i64) -> Result<Vec<AttributeValue>, DaoError> {
        Ok(self
            .inner
            .read()
            .await
            .values
            .iter()
            .filter(|v| v.category_id == category_id)
            .cloned()
            .collect())
    }

    async fn upsert_value(
        &self,
        category_id: i64,
        value: &str,
        slug: &str,
        sort_order: i32,
        active: bool,
    ) -> Result<(), DaoError> {
        let mut store = self.inner.write().await;
        match store
            .values
            .iter()
            .position(|v| v.category_id == category_id && v.slug == slug)
        {
            Some(i) => {
                let existing = &mut store.values[i];
                existing.value = value.to_string();
                existing.sort_order = sort_order;
                existing.active = active;
            }
            None => {
                store.next_value_id += 1;
                let id = store.next_value_id;
                store.values.push(AttributeValue {
                    id,
                    category_id,
                    value: value.to_string(),
                    slug: slug.to_string(),
                    sort_order,
                    active,
                });
            }
        }
        Ok(())
    }

    async fn list_assignments(&self, stock_id: &str) -> Result<Vec<Assignment>, DaoError> {
        Ok(self
            .inner
            .read()
            .await
            .assignments
            .iter()
            .filter(|a| a.stock_id == stock_id)
            .cloned()
            .collect())
    }

    async fn add_assignment(
        &self,
        stock_id: &str,
        category_id: i64,
        value_id: i64,
        sort_order: i32,
    ) -> Result<i64, DaoError> {
        let mut store = self.inner.write().await;
        store.next_assignment_id += 1;
        let id = store.next_assignment_id;
        store.assignments.push(Assignment {
            id,
            stock_id: stock_id.to_string(),
            category_id,
            value_id,
            sort_order,
        });
        Ok(id)
    }

    async fn delete_assignment(&self, id: i64) -> Result<(), DaoError> {
        self.inner.write().await.assignments.retain(|a| a.id != id);
        Ok(())
    }
}

#[async_trait]
impl DbAdapter for MemoryStore {
    fn table_prefix(&self) -> String {
        self.prefix.clone()
    }

    async fn query(
        &self,
        sql: &str,
        params: &[(&str, Value)],
    ) -> Result<Vec<serde_json::Map<String, Value>>, DaoError> {
        let store = self.inner.read().await;
        if sql.contains("WHERE category_id") {
            let id = param_i64(params, "category_id")?;
            let count = store.assignments.iter().filter(|a| a.category_id == id).count();
            return Ok(vec![count_row(count)]);
        }
        if sql.contains("WHERE value_id") {
            let id = param_i64(params, "value_id")?;
            let count = store.assignments.iter().filter(|a| a.value_id == id).count();
            return Ok(vec![count_row(count)]);
        }
        Err(DaoError::new(format!("unsupported query: {sql}")))
    }

    async fn execute(&self, sql: &str, params: &[(&str, Value)]) -> Result<(), DaoError> {
        if sql.starts_with("DELETE") && sql.contains("WHERE stock_id") {
            let stock_id = param_str(params, "stock_id")?;
            self.inner
                .write()
                .await
                .assignments
                .retain(|a| a.stock_id != stock_id);
            return Ok(());
        }
        Err(DaoError::new(format!("unsupported statement: {sql}")))
    }
}

fn param_i64(params: &[(&str, Value)], name: &str) -> Result<i64, DaoError> {
    params
        .iter()
        .find(|(key, _)| *key == name)
        .and_then(|(_, v)| v.as_i64())
        .ok_or_else(|| DaoError::new(format!("missing parameter: {name}")))
}

fn param_str(params: &[(&str, Value)], name: &str) -> Result<String, DaoError> {
    params
        .iter()
        .find(|(key, _)| *key == name)
        .and_then(|(_, v)| v.as_str())
        .map(str::to_owned)
        .ok_or_else(|| DaoError::new(format!("missing parameter: {name}")))
}

fn count_row(count: usize) -> serde_json::Map<String, Value> {
    let mut row = serde_json::Map::new();
    row.insert("count".to_string(), Value::from(count as i64));
    row
}
