//! HTTP handlers for the Catalog API

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestQueryResponse, BadRequestUuidResponse, BadRequestValidationResponse,
        ConflictResponse, InternalServerErrorResponse, NotFoundResponse,
    },
};
use mongodb::bson::Document;
use utoipa::OpenApi;

use crate::error::CatalogResult;
use crate::models::{CreateProduct, Product, Rating, UpdateProduct};
use crate::repository::CatalogRepository;
use crate::service::CatalogService;

/// OpenAPI documentation for the Catalog API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(Product, Rating, CreateProduct, UpdateProduct),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            BadRequestQueryResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Catalog", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Create the catalog router with all HTTP endpoints
pub fn router<R: CatalogRepository + 'static>(service: CatalogService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(shared_service)
}

/// List products matching a flat query-parameter mapping.
///
/// Non-reserved parameters filter on product fields, optionally with a
/// bracketed comparison operator (`price[gte]=100`). `sort`, `fields`,
/// `page`, and `limit` control ordering, projection, and pagination.
#[utoipa::path(
    get,
    path = "",
    tag = "Catalog",
    params(
        ("sort" = Option<String>, Query, description = "Comma-separated sort fields, '-' prefix for descending (default: -created_at)"),
        ("fields" = Option<String>, Query, description = "Comma-separated fields to include in results"),
        ("page" = Option<u64>, Query, description = "1-based page number; requires 'limit'"),
        ("limit" = Option<i64>, Query, description = "Maximum number of results"),
    ),
    responses(
        (status = 200, description = "Matching products under the requested projection", body = Vec<Product>),
        (status = 400, response = BadRequestQueryResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Query(params): Query<HashMap<String, String>>,
) -> CatalogResult<Json<Vec<Document>>> {
    let products = service.list_products(&params).await?;
    Ok(Json(products))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Catalog",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> CatalogResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Catalog",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<Product>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// Update a product
///
/// A payload carrying a `title` regenerates the slug.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Catalog",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> CatalogResult<Json<Product>> {
    let product = service.update_product(id, input).await?;
    Ok(Json(product))
}

/// Delete a product
///
/// Returns the deleted product, or `null` when no product matched the id
/// (a no-op delete is not a failure).
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Catalog",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Deleted product, or null when nothing matched", body = Product),
        (status = 400, response = BadRequestUuidResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<Option<Product>>> {
    let product = service.delete_product(id).await?;
    Ok(Json(product))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use crate::repository::MockCatalogRepository;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use mongodb::bson::doc;
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use uuid::Uuid;

    async fn json_body(body: Body) -> Value {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn create_body() -> String {
        json!({
            "title": "Apple Watch",
            "description": "Smart watch",
            "category": "electronics",
            "brand": "Apple",
            "color": "black",
            "price": 399.0,
            "quantity": 10
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_create_product_returns_201_with_slug() {
        let mut repository = MockCatalogRepository::new();
        repository
            .expect_create()
            .returning(|input| Ok(Product::new(input)));
        let app = router(CatalogService::new(repository));

        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(create_body()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["slug"], "apple-watch");
        assert_eq!(body["sold"], 0);
        assert!(body["_id"].is_string());
    }

    #[tokio::test]
    async fn test_create_product_validates_input() {
        let repository = MockCatalogRepository::new();
        let app = router(CatalogService::new(repository));

        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({
                    "title": "",
                    "description": "x",
                    "category": "electronics",
                    "brand": "Apple",
                    "color": "black",
                    "price": 1.0,
                    "quantity": 1
                })
                .to_string(),
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_duplicate_slug_returns_409() {
        let mut repository = MockCatalogRepository::new();
        repository
            .expect_create()
            .returning(|_| Err(CatalogError::DuplicateSlug("apple-watch".to_string())));
        let app = router(CatalogService::new(repository));

        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(create_body()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_get_product_returns_200() {
        let product = Product::new(crate::models::CreateProduct {
            title: "Apple Watch".to_string(),
            description: "Smart watch".to_string(),
            category: "electronics".to_string(),
            brand: "Apple".to_string(),
            color: "black".to_string(),
            price: 399.0,
            quantity: 10,
            images: vec![],
            ratings: vec![],
        });
        let id = product.id;

        let mut repository = MockCatalogRepository::new();
        repository
            .expect_get_by_id()
            .returning(move |_| Ok(Some(product.clone())));
        let app = router(CatalogService::new(repository));

        let request = Request::builder()
            .method("GET")
            .uri(format!("/{}", id))
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["_id"], id.to_string());
    }

    #[tokio::test]
    async fn test_get_product_returns_404_for_missing() {
        let mut repository = MockCatalogRepository::new();
        repository.expect_get_by_id().returning(|_| Ok(None));
        let app = router(CatalogService::new(repository));

        let request = Request::builder()
            .method("GET")
            .uri(format!("/{}", Uuid::new_v4()))
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_product_rejects_bad_uuid() {
        let repository = MockCatalogRepository::new();
        let app = router(CatalogService::new(repository));

        let request = Request::builder()
            .method("GET")
            .uri("/not-a-uuid")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_products_translates_comparison_filter() {
        let mut repository = MockCatalogRepository::new();
        repository
            .expect_find()
            .withf(|query| query.filter == doc! { "price": { "$gte": 100.0 } })
            .returning(|_| Ok(vec![doc! { "title": "Laptop", "price": 1299.0 }]));
        let app = router(CatalogService::new(repository));

        // price[gte]=100, with the brackets percent-encoded
        let request = Request::builder()
            .method("GET")
            .uri("/?price%5Bgte%5D=100")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response.into_body()).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["title"], "Laptop");
    }

    #[tokio::test]
    async fn test_list_products_unknown_field_is_400() {
        let repository = MockCatalogRepository::new();
        let app = router(CatalogService::new(repository));

        let request = Request::builder()
            .method("GET")
            .uri("/?warehouse=7")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["error"], "INVALID_QUERY");
    }

    #[tokio::test]
    async fn test_list_products_page_overflow_is_400() {
        let mut repository = MockCatalogRepository::new();
        repository.expect_count().returning(|_| Ok(25));
        let app = router(CatalogService::new(repository));

        let request = Request::builder()
            .method("GET")
            .uri("/?page=4&limit=10")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["error"], "PAGE_OUT_OF_RANGE");
        assert!(body["message"].as_str().unwrap().contains("does not exist"));
    }

    #[tokio::test]
    async fn test_update_product_returns_updated_document() {
        let mut repository = MockCatalogRepository::new();
        repository.expect_update().returning(|id, input| {
            let mut product = Product::new(crate::models::CreateProduct {
                title: "Old Title".to_string(),
                description: "d".to_string(),
                category: "c".to_string(),
                brand: "b".to_string(),
                color: "black".to_string(),
                price: 1.0,
                quantity: 1,
                images: vec![],
                ratings: vec![],
            });
            product.id = id;
            product.apply_update(input);
            Ok(product)
        });
        let app = router(CatalogService::new(repository));

        let request = Request::builder()
            .method("PUT")
            .uri(format!("/{}", Uuid::new_v4()))
            .header("content-type", "application/json")
            .body(Body::from(json!({ "title": "New Title" }).to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["title"], "New Title");
        assert_eq!(body["slug"], "new-title");
    }

    #[tokio::test]
    async fn test_update_missing_product_returns_404() {
        let mut repository = MockCatalogRepository::new();
        repository
            .expect_update()
            .returning(|id, _| Err(CatalogError::NotFound(id)));
        let app = router(CatalogService::new(repository));

        let request = Request::builder()
            .method("PUT")
            .uri(format!("/{}", Uuid::new_v4()))
            .header("content-type", "application/json")
            .body(Body::from(json!({ "price": 10.0 }).to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_missing_product_returns_null() {
        let mut repository = MockCatalogRepository::new();
        repository.expect_delete().returning(|_| Ok(None));
        let app = router(CatalogService::new(repository));

        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/{}", Uuid::new_v4()))
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response.into_body()).await;
        assert!(body.is_null());
    }
}
