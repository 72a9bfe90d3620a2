//! Catalog API routes

use axum::Router;
use domain_catalog::{CatalogService, MongoCatalogRepository, handlers};

use crate::state::AppState;

/// Create the products router
pub fn router(state: &AppState) -> Router {
    let repository = MongoCatalogRepository::new(&state.db);
    let service = CatalogService::new(repository);
    handlers::router(service)
}

/// Initialize catalog indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    let repository = MongoCatalogRepository::new(&state.db);
    repository.init_indexes().await?;
    Ok(())
}
