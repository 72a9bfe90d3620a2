//! Catalog Service - Business logic layer

use std::collections::HashMap;
use std::sync::Arc;

use mongodb::bson::Document;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::query::translate;
use crate::repository::CatalogRepository;

/// Catalog service providing business logic operations
///
/// The service layer handles validation, query translation, and
/// orchestrates repository operations.
pub struct CatalogService<R: CatalogRepository> {
    repository: Arc<R>,
}

impl<R: CatalogRepository> CatalogService<R> {
    /// Create a new CatalogService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new product
    ///
    /// The slug is derived from the title; a colliding slug surfaces as
    /// [`CatalogError::DuplicateSlug`] from the storage layer's unique index.
    #[instrument(skip(self, input), fields(product_title = %input.title))]
    pub async fn create_product(&self, input: CreateProduct) -> CatalogResult<Product> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> CatalogResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound(id))
    }

    /// List products for a flat query-parameter mapping.
    ///
    /// Translates the parameters into a structured query, runs the
    /// page-exists check when a page was explicitly requested, and returns
    /// the matching documents under the query's projection.
    #[instrument(skip(self, params))]
    pub async fn list_products(
        &self,
        params: &HashMap<String, String>,
    ) -> CatalogResult<Vec<Document>> {
        let query = translate(params)?;

        // The check only runs when the caller asked for a page explicitly;
        // a bare limit never fails this way.
        if let Some(page) = query.page {
            let total = self.repository.count(query.filter.clone()).await?;
            let skip = query.skip.unwrap_or(0);
            if skip >= total {
                return Err(CatalogError::PageOutOfRange { page, total });
            }
        }

        self.repository.find(query).await
    }

    /// Update an existing product
    ///
    /// A payload carrying a title regenerates the slug; payloads without a
    /// title leave it unchanged.
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> CatalogResult<Product> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        self.repository.update(id, input).await
    }

    /// Delete a product, returning the removed document when it existed.
    ///
    /// Deleting an unknown id yields `Ok(None)` rather than an error.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        self.repository.delete(id).await
    }
}

impl<R: CatalogRepository> Clone for CatalogService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
