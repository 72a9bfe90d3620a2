use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_helpers::errors::{ErrorCode, error_response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Product not found: {0}")]
    NotFound(Uuid),

    #[error("Product with slug '{0}' already exists")]
    DuplicateSlug(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Page {page} does not exist ({total} matching products)")]
    PageOutOfRange { page: u64, total: u64 },

    #[error("Database error: {0}")]
    Database(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Convert CatalogError to AppError for standardized error responses
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(id) => AppError::NotFound(format!("Product {} not found", id)),
            CatalogError::DuplicateSlug(slug) => {
                AppError::Conflict(format!("Product with slug '{}' already exists", slug))
            }
            CatalogError::Validation(msg) => AppError::BadRequest(msg),
            CatalogError::InvalidQuery(msg) => AppError::BadRequest(msg),
            CatalogError::PageOutOfRange { page, .. } => {
                AppError::BadRequest(format!("Page {} does not exist", page))
            }
            CatalogError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        // Query-shape errors carry their own error codes so clients can
        // tell a bad filter from a failed validation.
        match self {
            CatalogError::InvalidQuery(msg) => {
                error_response(StatusCode::BAD_REQUEST, msg, ErrorCode::InvalidQuery)
            }
            CatalogError::PageOutOfRange { page, .. } => error_response(
                StatusCode::BAD_REQUEST,
                format!("Page {} does not exist", page),
                ErrorCode::PageOutOfRange,
            ),
            other => {
                let app_error: AppError = other.into();
                app_error.into_response()
            }
        }
    }
}

impl From<mongodb::error::Error> for CatalogError {
    fn from(err: mongodb::error::Error) -> Self {
        CatalogError::Database(err.to_string())
    }
}
