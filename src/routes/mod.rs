//! axum route builders: the transport adapter over the pure dispatcher,
//! plus health/version/OpenAPI routes.

mod api;
mod common;
pub use api::api_routes;
pub use common::common_routes;
