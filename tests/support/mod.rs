//! Shared fixtures: app state over the in-memory store, dispatch helpers,
//! and seeding shortcuts.

#![allow(dead_code)]

use attributes_api::{
    dispatch, AppState, Assignment, AttributeValue, AttributesDao, Category, DaoError, MemoryStore,
};
use axum::http::StatusCode;
use serde_json::Value;

pub fn state() -> (AppState, MemoryStore) {
    let store = MemoryStore::with_prefix("fa_");
    (AppState::new(store.clone(), store.clone()), store)
}

/// State whose DAO fails every call, for 500-path tests. The adapter side
/// stays in-memory so usage checks are reachable when needed.
pub fn failing_state() -> AppState {
    AppState::new(FailingDao, MemoryStore::new())
}

pub async fn request(
    state: &AppState,
    method: &str,
    path: &str,
    body: Value,
) -> (StatusCode, Value) {
    let resp = dispatch(state, method, path, &body).await;
    (resp.status, resp.body)
}

pub async fn get(state: &AppState, path: &str) -> (StatusCode, Value) {
    request(state, "GET", path, Value::Null).await
}

pub async fn seed_category(store: &MemoryStore, code: &str, label: &str) -> i64 {
    store
        .upsert_category(code, label, "", 0, true)
        .await
        .unwrap();
    store
        .list_categories()
        .await
        .unwrap()
        .into_iter()
        .find(|c| c.code == code)
        .unwrap()
        .id
}

pub async fn seed_value(store: &MemoryStore, category_id: i64, value: &str, slug: &str) -> i64 {
    store
        .upsert_value(category_id, value, slug, 0, true)
        .await
        .unwrap();
    store
        .list_values(category_id)
        .await
        .unwrap()
        .into_iter()
        .find(|v| v.slug == slug)
        .unwrap()
        .id
}

pub async fn seed_assignment(
    store: &MemoryStore,
    stock_id: &str,
    category_id: i64,
    value_id: i64,
) -> i64 {
    store
        .add_assignment(stock_id, category_id, value_id, 0)
        .await
        .unwrap()
}

pub struct FailingDao;

#[async_trait::async_trait]
impl AttributesDao for FailingDao {
    async fn list_categories(&self) -> Result<Vec<Category>, DaoError> {
        Err(DaoError::new("storage offline"))
    }

    async fn upsert_category(
        &self,
        _code: &str,
        _label: &str,
        _description: &str,
        _sort_order: i32,
        _active: bool,
    ) -> Result<(), DaoError> {
        Err(DaoError::new("storage offline"))
    }

    async fn list_values(&self, _category_id: i64) -> Result<Vec<AttributeValue>, DaoError> {
        Err(DaoError::new("storage offline"))
    }

    async fn upsert_value(
        &self,
        _category_id: i64,
        _value: &str,
        _slug: &str,
        _sort_order: i32,
        _active: bool,
    ) -> Result<(), DaoError> {
        Err(DaoError::new("storage offline"))
    }

    async fn list_assignments(&self, _stock_id: &str) -> Result<Vec<Assignment>, DaoError> {
        Err(DaoError::new("storage offline"))
    }

    async fn add_assignment(
        &self,
        _stock_id: &str,
        _category_id: i64,
        _value_id: i64,
        _sort_order: i32,
    ) -> Result<i64, DaoError> {
        Err(DaoError::new("storage offline"))
    }

    async fn delete_assignment(&self, _id: i64) -> Result<(), DaoError> {
        Err(DaoError::new("storage offline"))
    }
}
