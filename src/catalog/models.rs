//! Data models for catalog products and categories.

use serde::{Deserialize, Serialize};

/// A catalog product as used throughout the crate.
///
/// Serialized with camelCase keys; this is also the shape persisted in the wish list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique catalog id
    pub id: u64,
    /// Product title
    pub title: String,
    /// Long description
    #[serde(default)]
    pub description: String,
    /// Current price in USD
    pub price: f64,
    /// Advertised discount in percent
    #[serde(default)]
    pub discount_percentage: f64,
    /// Star rating (0.0 - 5.0)
    #[serde(default)]
    pub rating: f64,
    /// Units in stock
    #[serde(default)]
    pub stock: u32,
    /// Brand, missing for some catalog entries
    #[serde(default)]
    pub brand: Option<String>,
    /// Category slug
    #[serde(default)]
    pub category: String,
    /// Thumbnail image URL
    #[serde(default)]
    pub thumbnail_url: String,
    /// Image URLs, the first one is the primary image
    #[serde(default)]
    pub image_urls: Vec<String>,
    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Product {
    /// Returns the primary image URL if any.
    pub fn primary_image(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }

    /// Returns true if at least one unit is in stock.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Returns the price before the advertised discount was applied.
    pub fn original_price(&self) -> Option<f64> {
        if self.discount_percentage <= 0.0 || self.discount_percentage >= 100.0 {
            return None;
        }
        Some(self.price / (1.0 - self.discount_percentage / 100.0))
    }
}

/// Product as returned by the catalog endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetails {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub discount_percentage: f64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl From<ProductDetails> for Product {
    fn from(details: ProductDetails) -> Self {
        Self {
            id: details.id,
            title: details.title,
            description: details.description,
            price: details.price.max(0.0),
            discount_percentage: details.discount_percentage,
            rating: details.rating.clamp(0.0, 5.0),
            stock: details.stock,
            brand: details.brand,
            category: details.category,
            thumbnail_url: details.thumbnail,
            image_urls: details.images,
            tags: details.tags,
        }
    }
}

/// Envelope of the list endpoints (`/products`, `/products/category/..`, `/products/search`).
#[derive(Debug, Clone, Deserialize)]
pub struct ProductPage {
    /// Missing or null means the endpoint answered without a payload
    #[serde(default)]
    pub products: Option<Vec<ProductDetails>>,
    #[serde(default)]
    pub total: Option<u32>,
    #[serde(default)]
    pub skip: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

/// A selectable product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CategoryWire")]
pub struct Category {
    /// Unique key used in `/products/category/{slug}`
    pub slug: String,
    /// Display name
    pub name: String,
}

impl Category {
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self { slug: slug.into(), name: name.into() }
    }

    /// Builds a category from a bare slug, deriving a display name.
    pub fn from_slug(slug: impl Into<String>) -> Self {
        let slug = slug.into();
        let name = display_name(&slug);
        Self { slug, name }
    }
}

/// The catalog has returned both `{slug, name, url}` objects and bare slugs.
#[derive(Deserialize)]
#[serde(untagged)]
enum CategoryWire {
    Full { slug: String, name: String },
    Slug(String),
}

impl From<CategoryWire> for Category {
    fn from(wire: CategoryWire) -> Self {
        match wire {
            CategoryWire::Full { slug, name } => Category { slug, name },
            CategoryWire::Slug(slug) => Category::from_slug(slug),
        }
    }
}

fn display_name(slug: &str) -> String {
    slug.split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
