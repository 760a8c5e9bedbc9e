//! Shared application state: injected collaborators plus the per-stock-id
//! lock table that serializes bulk replaces.

use crate::dao::{AttributesDao, DbAdapter};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Clone)]
pub struct AppState {
    pub dao: Arc<dyn AttributesDao>,
    pub db: Arc<dyn DbAdapter>,
    pub locks: StockLocks,
}

impl AppState {
    pub fn new(
        dao: impl AttributesDao + 'static,
        db: impl DbAdapter + 'static,
    ) -> Self {
        AppState {
            dao: Arc::new(dao),
            db: Arc::new(db),
            locks: StockLocks::default(),
        }
    }
}

/// One async mutex per stock id. Bulk replace is two external operations
/// (delete-all, then inserts) with no transaction at this layer; holding the
/// stock's lock across both prevents two replaces from interleaving.
/// Readers are not blocked.
#[derive(Clone, Default)]
pub struct StockLocks {
    inner: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl StockLocks {
    pub async fn acquire(&self, stock_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock().await;
            map.entry(stock_id.to_string()).or_default().clone()
        };
        lock.lock_owned().await
    }
}
