//! Share text and deep links for a product.

use crate::catalog::Product;
use serde::Serialize;

/// What gets handed to a share sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareMessage {
    pub message: String,
    pub url: String,
}

/// Deep link that opens the product's detail view.
pub fn deep_link(product_id: u64, scheme: &str) -> String {
    let scheme = scheme.trim_end_matches("://");
    format!("{}://product/{}", scheme, product_id)
}

/// Builds the share text for `product`.
pub fn share_message(product: &Product, scheme: &str) -> ShareMessage {
    let url = deep_link(product.id, scheme);
    let message = format!(
        "That product looks perfect for you!\n\n\u{1F381} {}\n\u{1F4B5} Price: USD {}\n\u{2B50} Rating: {}\n\nOpen it here: {}",
        product.title, product.price, product.rating, url
    );
    ShareMessage { message, url }
}
