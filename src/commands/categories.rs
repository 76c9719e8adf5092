//! Categories command implementation.

use crate::catalog::{CatalogClient, CatalogSource};
use crate::categories::CategoryController;
use crate::config::Config;
use crate::format::Formatter;
use anyhow::{Context, Result};
use std::sync::Arc;

/// Lists the catalog's categories.
pub struct CategoriesCommand {
    config: Config,
}

impl CategoriesCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn execute(&self) -> Result<String> {
        let client = CatalogClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(Arc::new(client)).await
    }

    pub async fn execute_with_client<C: CatalogSource + ?Sized>(&self, client: Arc<C>) -> Result<String> {
        let mut controller = CategoryController::new(client);
        let categories = controller.load().await.context("Failed to load categories")?;

        Ok(Formatter::new(self.config.format).format_categories(categories))
    }
}
