use async_trait::async_trait;
use mongodb::bson::Document;
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::query::ProductQuery;

/// Repository trait for Product persistence
///
/// Defines the data access interface for the catalog. Implementations can
/// use different storage backends (MongoDB in production, mocks in tests).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Insert a new product
    async fn create(&self, input: CreateProduct) -> CatalogResult<Product>;

    /// Fetch a product by ID
    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>>;

    /// Run a translated query and return the matching documents.
    ///
    /// Returns raw documents rather than typed products so the query's
    /// field projection is reflected in the response shape.
    async fn find(&self, query: ProductQuery) -> CatalogResult<Vec<Document>>;

    /// Count products matching a filter
    async fn count(&self, filter: Document) -> CatalogResult<u64>;

    /// Apply a partial update to an existing product
    async fn update(&self, id: Uuid, input: UpdateProduct) -> CatalogResult<Product>;

    /// Remove a product, returning the removed document when it existed
    async fn delete(&self, id: Uuid) -> CatalogResult<Option<Product>>;
}
