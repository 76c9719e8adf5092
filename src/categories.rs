//! Cached category list.

use crate::catalog::{CatalogSource, Category};
use crate::error::Result;
use std::sync::Arc;
use tracing::{info, warn};

/// Loads and caches the catalog's categories.
pub struct CategoryController<C: CatalogSource + ?Sized> {
    client: Arc<C>,
    categories: Vec<Category>,
    loaded: bool,
    error: Option<String>,
}

impl<C: CatalogSource + ?Sized> CategoryController<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client, categories: Vec::new(), loaded: false, error: None }
    }

    /// Fetches categories and replaces the cache. A failure keeps the previous cache.
    pub async fn load(&mut self) -> Result<&[Category]> {
        match self.client.categories().await {
            Ok(categories) => {
                info!("Loaded {} categories", categories.len());
                self.categories = categories;
                self.loaded = true;
                self.error = None;
                Ok(&self.categories)
            }
            Err(e) => {
                warn!("Failed to load categories: {}", e);
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Looks up a cached category by slug, ignoring case.
    pub fn find(&self, slug: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.slug.eq_ignore_ascii_case(slug.trim()))
    }

    /// True once a load has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::error::Error;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct MockCatalog {
        fail: AtomicBool,
    }

    #[async_trait]
    impl CatalogSource for MockCatalog {
        async fn all_products(&self) -> Result<Vec<Product>> {
            Ok(Vec::new())
        }

        async fn products_by_category(&self, _category: &str) -> Result<Vec<Product>> {
            Ok(Vec::new())
        }

        async fn product(&self, id: u64) -> Result<Product> {
            Err(Error::NotFound(id))
        }

        async fn search(&self, _query: &str) -> Result<Vec<Product>> {
            Ok(Vec::new())
        }

        async fn categories(&self) -> Result<Vec<Category>> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(Error::Status(502));
            }
            Ok(vec![
                Category::new("beauty", "Beauty"),
                Category::from_slug("home-decoration"),
            ])
        }
    }

    #[tokio::test]
    async fn test_load_and_find() {
        let mut controller = CategoryController::new(Arc::new(MockCatalog { fail: AtomicBool::new(false) }));
        assert!(!controller.is_loaded());

        let loaded = controller.load().await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert!(controller.is_loaded());

        assert_eq!(controller.find("Home-Decoration").map(|c| c.name.as_str()), Some("Home Decoration"));
        assert!(controller.find("groceries").is_none());
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_cache() {
        let catalog = Arc::new(MockCatalog { fail: AtomicBool::new(false) });
        let mut controller = CategoryController::new(Arc::clone(&catalog));
        controller.load().await.unwrap();

        catalog.fail.store(true, Ordering::SeqCst);
        let err = controller.load().await.unwrap_err();
        assert!(matches!(err, Error::Status(502)));
        assert_eq!(controller.categories().len(), 2);
        assert!(controller.error().is_some());
    }

    #[tokio::test]
    async fn test_failed_first_load() {
        let mut controller = CategoryController::new(Arc::new(MockCatalog { fail: AtomicBool::new(true) }));
        assert!(controller.load().await.is_err());
        assert!(controller.categories().is_empty());
        assert!(!controller.is_loaded());
    }
}
