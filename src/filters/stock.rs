//! In-stock filter.

use super::Filter;
use crate::catalog::Product;

/// Filter that only keeps products with stock left.
pub struct StockFilter;

impl StockFilter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StockFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for StockFilter {
    fn matches(&self, product: &Product) -> bool {
        product.in_stock()
    }

    fn description(&self) -> String {
        "In stock only".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::make_product;

    #[test]
    fn test_stock_filter() {
        let filter = StockFilter::new();
        assert!(filter.matches(&make_product(1, "A", 1.0, 1.0, 3)));
        assert!(!filter.matches(&make_product(1, "A", 1.0, 1.0, 0)));
    }

    #[test]
    fn test_description() {
        assert_eq!(StockFilter::default().description(), "In stock only");
    }
}
