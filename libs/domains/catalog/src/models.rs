use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::slug::slugify;

/// A star rating left on a product by a user
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct Rating {
    /// Stars awarded (1-5)
    #[validate(range(min = 1, max = 5))]
    pub star: i32,
    /// User who posted the rating (non-owning reference)
    pub posted_by: Uuid,
}

/// Product entity - represents a product stored in MongoDB
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Product title
    pub title: String,
    /// URL-safe identifier derived from the title; unique across products
    pub slug: String,
    /// Product description
    pub description: String,
    /// Product category
    pub category: String,
    /// Brand name
    pub brand: String,
    /// Product color
    pub color: String,
    /// Price
    pub price: f64,
    /// Units in stock
    pub quantity: i64,
    /// Image URLs or identifiers, in display order
    #[serde(default)]
    pub images: Vec<String>,
    /// Ratings posted by users
    #[serde(default)]
    pub ratings: Vec<Rating>,
    /// Units sold so far
    #[serde(default)]
    pub sold: i64,
    /// Internal write counter; excluded from the default list projection
    #[serde(default)]
    pub revision: i64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    #[validate(length(min = 1, max = 100))]
    pub brand: String,
    #[validate(length(min = 1, max = 50))]
    pub color: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(range(min = 0))]
    pub quantity: i64,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    #[validate(nested)]
    pub ratings: Vec<Rating>,
}

/// DTO for updating an existing product
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub brand: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub color: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[validate(range(min = 0))]
    pub quantity: Option<i64>,
    pub images: Option<Vec<String>>,
    #[validate(nested)]
    pub ratings: Option<Vec<Rating>>,
    #[validate(range(min = 0))]
    pub sold: Option<i64>,
}

impl Product {
    /// Create a new product from a CreateProduct DTO.
    ///
    /// Assigns the identifier, derives the slug from the title, and starts
    /// the sold counter at zero.
    pub fn new(input: CreateProduct) -> Self {
        let now = Utc::now();
        let title = input.title.trim().to_string();
        Self {
            id: Uuid::now_v7(),
            slug: slugify(&title),
            title,
            description: input.description,
            category: input.category,
            brand: input.brand,
            color: input.color,
            price: input.price,
            quantity: input.quantity,
            images: input.images,
            ratings: input.ratings,
            sold: 0,
            revision: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates from an UpdateProduct DTO.
    ///
    /// A new title regenerates the slug; the slug is never updated directly.
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(title) = update.title {
            let title = title.trim().to_string();
            self.slug = slugify(&title);
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(brand) = update.brand {
            self.brand = brand;
        }
        if let Some(color) = update.color {
            self.color = color;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        if let Some(images) = update.images {
            self.images = images;
        }
        if let Some(ratings) = update.ratings {
            self.ratings = ratings;
        }
        if let Some(sold) = update.sold {
            self.sold = sold;
        }
        self.revision += 1;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_create() -> CreateProduct {
        CreateProduct {
            title: "Apple Watch Series 9".to_string(),
            description: "Smart watch".to_string(),
            category: "electronics".to_string(),
            brand: "Apple".to_string(),
            color: "black".to_string(),
            price: 399.0,
            quantity: 10,
            images: vec![],
            ratings: vec![],
        }
    }

    #[test]
    fn test_new_product_derives_slug() {
        let product = Product::new(sample_create());
        assert_eq!(product.slug, "apple-watch-series-9");
    }

    #[test]
    fn test_new_product_defaults() {
        let product = Product::new(sample_create());
        assert_eq!(product.sold, 0);
        assert_eq!(product.revision, 0);
        assert_eq!(product.created_at, product.updated_at);
    }

    #[test]
    fn test_new_product_trims_title() {
        let mut input = sample_create();
        input.title = "  Apple Watch  ".to_string();
        let product = Product::new(input);
        assert_eq!(product.title, "Apple Watch");
        assert_eq!(product.slug, "apple-watch");
    }

    #[test]
    fn test_apply_update_with_title_regenerates_slug() {
        let mut product = Product::new(sample_create());
        product.apply_update(UpdateProduct {
            title: Some("Apple Watch Ultra".to_string()),
            ..Default::default()
        });
        assert_eq!(product.title, "Apple Watch Ultra");
        assert_eq!(product.slug, "apple-watch-ultra");
        assert_eq!(product.revision, 1);
    }

    #[test]
    fn test_apply_update_without_title_keeps_slug() {
        let mut product = Product::new(sample_create());
        let slug_before = product.slug.clone();
        product.apply_update(UpdateProduct {
            price: Some(349.0),
            ..Default::default()
        });
        assert_eq!(product.slug, slug_before);
        assert_eq!(product.price, 349.0);
        assert_eq!(product.revision, 1);
    }

    #[test]
    fn test_product_serializes_id_as_underscore_id() {
        let product = Product::new(sample_create());
        let value = serde_json::to_value(&product).unwrap();
        assert!(value.get("_id").is_some());
        assert!(value.get("id").is_none());
    }

    #[test]
    fn test_create_product_validation() {
        let mut input = sample_create();
        input.title = String::new();
        assert!(validator::Validate::validate(&input).is_err());

        let mut input = sample_create();
        input.price = -1.0;
        assert!(validator::Validate::validate(&input).is_err());

        let mut input = sample_create();
        input.ratings = vec![Rating {
            star: 6,
            posted_by: Uuid::new_v4(),
        }];
        assert!(validator::Validate::validate(&input).is_err());
    }
}
