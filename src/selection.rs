//! Product detail selection.

use crate::catalog::{CatalogSource, Product};
use crate::error::Result;
use std::sync::Arc;
use tracing::{debug, warn};

/// Tracks which product's detail view is open.
pub struct SelectionController<C: CatalogSource + ?Sized> {
    client: Arc<C>,
    selected: Option<Product>,
    detail_visible: bool,
    loading: bool,
    error: Option<String>,
}

impl<C: CatalogSource + ?Sized> SelectionController<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client, selected: None, detail_visible: false, loading: false, error: None }
    }

    /// Fetches the product and opens its detail view.
    ///
    /// On failure the previous selection and visibility are left as they were.
    pub async fn select(&mut self, id: u64) -> Result<&Product> {
        debug!("Selecting product {}", id);
        self.loading = true;
        let result = self.client.product(id).await;
        self.loading = false;

        match result {
            Ok(product) => {
                self.error = None;
                self.detail_visible = true;
                Ok(&*self.selected.insert(product))
            }
            Err(e) => {
                warn!("Failed to load product {}: {}", id, e);
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Closes the detail view and forgets the selection.
    pub fn dismiss(&mut self) {
        self.selected = None;
        self.detail_visible = false;
    }

    pub fn selected(&self) -> Option<&Product> {
        self.selected.as_ref()
    }

    pub fn is_detail_visible(&self) -> bool {
        self.detail_visible
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use crate::error::Error;
    use crate::test_support::make_product;
    use async_trait::async_trait;

    struct MockCatalog {
        products: Vec<Product>,
    }

    #[async_trait]
    impl CatalogSource for MockCatalog {
        async fn all_products(&self) -> Result<Vec<Product>> {
            Ok(self.products.clone())
        }

        async fn products_by_category(&self, _category: &str) -> Result<Vec<Product>> {
            Ok(Vec::new())
        }

        async fn product(&self, id: u64) -> Result<Product> {
            self.products.iter().find(|p| p.id == id).cloned().ok_or(Error::NotFound(id))
        }

        async fn search(&self, _query: &str) -> Result<Vec<Product>> {
            Ok(Vec::new())
        }

        async fn categories(&self) -> Result<Vec<Category>> {
            Ok(Vec::new())
        }
    }

    fn controller() -> SelectionController<MockCatalog> {
        SelectionController::new(Arc::new(MockCatalog {
            products: vec![make_product(1, "Phone", 10.0, 4.0, 1), make_product(2, "Laptop", 20.0, 4.0, 1)],
        }))
    }

    #[tokio::test]
    async fn test_select_opens_detail() {
        let mut selection = controller();
        assert!(selection.selected().is_none());
        assert!(!selection.is_detail_visible());

        let product = selection.select(2).await.unwrap();
        assert_eq!(product.title, "Laptop");
        assert!(selection.is_detail_visible());
        assert!(!selection.is_loading());
        assert_eq!(selection.selected().map(|p| p.id), Some(2));
    }

    #[tokio::test]
    async fn test_failed_select_keeps_previous_selection() {
        let mut selection = controller();
        selection.select(1).await.unwrap();

        let err = selection.select(99).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(99)));
        assert_eq!(selection.selected().map(|p| p.id), Some(1));
        assert!(selection.is_detail_visible());
        assert_eq!(selection.error(), Some("Product 99 not found"));

        selection.select(2).await.unwrap();
        assert!(selection.error().is_none());
    }

    #[tokio::test]
    async fn test_failed_select_without_selection_stays_hidden() {
        let mut selection = controller();
        assert!(selection.select(42).await.is_err());
        assert!(selection.selected().is_none());
        assert!(!selection.is_detail_visible());
    }

    #[tokio::test]
    async fn test_dismiss() {
        let mut selection = controller();
        selection.select(1).await.unwrap();

        selection.dismiss();
        assert!(selection.selected().is_none());
        assert!(!selection.is_detail_visible());

        // Dismissing twice is harmless
        selection.dismiss();
        assert!(!selection.is_detail_visible());
    }
}
