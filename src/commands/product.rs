//! Product detail command implementation.

use crate::catalog::{CatalogClient, CatalogSource, Product};
use crate::config::Config;
use crate::format::Formatter;
use crate::selection::SelectionController;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

/// Shows product details by id.
pub struct ProductCommand {
    config: Config,
}

impl ProductCommand {
    /// Creates a new product command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Fetches a product and returns its formatted detail view.
    pub async fn execute(&self, id: u64) -> Result<String> {
        let client = CatalogClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(Arc::new(client), id).await
    }

    /// Fetches a product with a provided client (for testing).
    pub async fn execute_with_client<C: CatalogSource + ?Sized>(
        &self,
        client: Arc<C>,
        id: u64,
    ) -> Result<String> {
        info!("Looking up product: {}", id);

        let mut selection = SelectionController::new(client);
        let product = selection.select(id).await?;

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_product(product))
    }

    /// Fetches several products.
    pub async fn execute_batch(&self, ids: &[u64]) -> Result<String> {
        let client = CatalogClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_batch_with_client(Arc::new(client), ids).await
    }

    /// Fetches several products with a provided client (for testing).
    /// Failures are reported on stderr and skipped.
    pub async fn execute_batch_with_client<C: CatalogSource + ?Sized>(
        &self,
        client: Arc<C>,
        ids: &[u64],
    ) -> Result<String> {
        let mut selection = SelectionController::new(client);
        let mut products: Vec<Product> = Vec::new();

        for &id in ids {
            info!("Looking up product: {}", id);

            match selection.select(id).await {
                Ok(product) => products.push(product.clone()),
                Err(e) => eprintln!("Failed to fetch {}: {}", id, e),
            }
            selection.dismiss();
        }

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_products(&products))
    }
}
