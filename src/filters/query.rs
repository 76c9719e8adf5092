//! Title substring filter backing the local search box.

use super::Filter;
use crate::catalog::Product;

/// Matches products whose title contains the query, ignoring case.
pub struct QueryFilter {
    needle: String,
}

impl QueryFilter {
    /// Creates a filter for the given query. Surrounding whitespace is ignored.
    pub fn new(query: &str) -> Self {
        Self { needle: query.trim().to_lowercase() }
    }
}

impl Filter for QueryFilter {
    fn matches(&self, product: &Product) -> bool {
        self.needle.is_empty() || product.title.to_lowercase().contains(&self.needle)
    }

    fn description(&self) -> String {
        if self.needle.is_empty() {
            "Title: any".to_string()
        } else {
            format!("Title contains: {}", self.needle)
        }
    }
}
