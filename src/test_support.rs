//! Fixtures shared by unit tests across modules.

use crate::catalog::Product;

pub fn make_product(id: u64, title: &str, price: f64, rating: f64, stock: u32) -> Product {
    Product {
        id,
        title: title.to_string(),
        description: String::new(),
        price,
        discount_percentage: 0.0,
        rating,
        stock,
        brand: None,
        category: "misc".to_string(),
        thumbnail_url: String::new(),
        image_urls: Vec::new(),
        tags: Vec::new(),
    }
}
