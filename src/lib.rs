//! REST API over a product-attribute catalog for an accounting host
//! application: categories, per-category values, and product-to-value
//! assignments, with soft-delete semantics and in-use guards.
//!
//! Persistence is injected through the [`dao`] traits; this crate owns
//! routing, validation, and orchestration. [`router::dispatch`] is the pure
//! core; [`routes`] adapts it to axum.

pub mod dao;
pub mod error;
pub mod handlers;
pub mod memory;
pub mod model;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;

pub use dao::{AttributesDao, DbAdapter};
pub use error::{ApiError, DaoError};
pub use memory::MemoryStore;
pub use model::{Assignment, AttributeValue, Category};
pub use response::ApiResponse;
pub use router::dispatch;
pub use routes::{api_routes, common_routes};
pub use state::AppState;
