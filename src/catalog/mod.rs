//! Catalog endpoint access: HTTP client and data models.

pub mod client;
pub mod models;

pub use client::{CatalogClient, CatalogSource};
pub use models::{Category, Product, ProductDetails, ProductPage};
