//! MongoDB implementation of CatalogRepository

use async_trait::async_trait;
use mongodb::{
    Collection, Database,
    bson::{Bson, Document, doc, to_bson},
    options::IndexOptions,
    IndexModel,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::query::ProductQuery;
use crate::repository::CatalogRepository;

/// MongoDB implementation of the CatalogRepository
pub struct MongoCatalogRepository {
    collection: Collection<Product>,
}

impl MongoCatalogRepository {
    /// Create a new MongoCatalogRepository
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Product>("products");
        Self { collection }
    }

    /// Create a new MongoCatalogRepository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Product>(collection_name);
        Self { collection }
    }

    /// Initialize indexes for query performance and slug uniqueness
    pub async fn init_indexes(&self) -> CatalogResult<()> {
        let indexes = vec![
            // Unique slug index; slug collisions surface as duplicate-key errors
            IndexModel::builder()
                .keys(doc! { "slug": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("idx_slug_unique".to_string())
                        .build(),
                )
                .build(),
            // Category listing with the default newest-first order
            IndexModel::builder()
                .keys(doc! { "category": 1, "created_at": -1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_category_created".to_string())
                        .build(),
                )
                .build(),
            // Price range queries
            IndexModel::builder()
                .keys(doc! { "price": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_price".to_string())
                        .build(),
                )
                .build(),
            // Brand index
            IndexModel::builder()
                .keys(doc! { "brand": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_brand".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Catalog indexes created successfully");
        Ok(())
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Product> {
        &self.collection
    }
}

/// Whether a driver error is a unique-index violation (code 11000).
fn is_duplicate_key_error(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};

    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == 11000,
        ErrorKind::Command(command_error) => command_error.code == 11000,
        _ => false,
    }
}

#[async_trait]
impl CatalogRepository for MongoCatalogRepository {
    #[instrument(skip(self, input), fields(product_title = %input.title))]
    async fn create(&self, input: CreateProduct) -> CatalogResult<Product> {
        let product = Product::new(input);

        self.collection.insert_one(&product).await.map_err(|e| {
            if is_duplicate_key_error(&e) {
                CatalogError::DuplicateSlug(product.slug.clone())
            } else {
                e.into()
            }
        })?;

        tracing::info!(product_id = %product.id, slug = %product.slug, "Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let product = self.collection.find_one(filter).await?;
        Ok(product)
    }

    #[instrument(skip(self, query))]
    async fn find(&self, query: ProductQuery) -> CatalogResult<Vec<Document>> {
        use futures_util::TryStreamExt;

        let options = mongodb::options::FindOptions::builder()
            .sort(query.sort)
            .projection(query.projection)
            .skip(query.skip)
            .limit(query.limit)
            .build();

        // Raw documents so the projection shapes the result
        let cursor = self
            .collection
            .clone_with_type::<Document>()
            .find(query.filter)
            .with_options(options)
            .await?;
        let products: Vec<Document> = cursor.try_collect().await?;

        Ok(products)
    }

    #[instrument(skip(self, filter))]
    async fn count(&self, filter: Document) -> CatalogResult<u64> {
        let count = self.collection.count_documents(filter).await?;
        Ok(count)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: UpdateProduct) -> CatalogResult<Product> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let existing = self
            .collection
            .find_one(filter.clone())
            .await?
            .ok_or(CatalogError::NotFound(id))?;

        let mut updated = existing;
        updated.apply_update(input);

        self.collection
            .replace_one(filter, &updated)
            .await
            .map_err(|e| {
                if is_duplicate_key_error(&e) {
                    CatalogError::DuplicateSlug(updated.slug.clone())
                } else {
                    e.into()
                }
            })?;

        tracing::info!(product_id = %id, "Product updated successfully");
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let deleted = self.collection.find_one_and_delete(filter).await?;

        match &deleted {
            Some(product) => {
                tracing::info!(product_id = %product.id, "Product deleted successfully")
            }
            // Deleting a missing product is a no-op, not a failure
            None => tracing::info!(product_id = %id, "Delete matched no product"),
        }

        Ok(deleted)
    }
}
