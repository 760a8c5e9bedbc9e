//! Demo server: the API over the in-memory store, seeded with a small
//! color/size catalog.

use attributes_api::{api_routes, common_routes, AppState, AttributesDao, DaoError, MemoryStore};
use axum::Router;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("attributes_api=info".parse()?))
        .init();

    let prefix = std::env::var("TABLE_PREFIX").unwrap_or_else(|_| "0_".into());
    let store = MemoryStore::with_prefix(&prefix);
    seed(&store).await?;
    let state = AppState::new(store.clone(), store);

    let app = Router::new()
        .merge(common_routes())
        .nest("/api", api_routes(state));

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn seed(store: &MemoryStore) -> Result<(), DaoError> {
    store.upsert_category("color", "Color", "Item color", 1, true).await?;
    store.upsert_category("size", "Size", "", 2, true).await?;
    for category in store.list_categories().await? {
        if category.code == "color" {
            store.upsert_value(category.id, "Red", "red", 1, true).await?;
            store.upsert_value(category.id, "Blue", "blue", 2, true).await?;
        }
    }
    Ok(())
}
