//! Share command implementation.

use crate::catalog::{CatalogClient, CatalogSource};
use crate::config::Config;
use crate::format::Formatter;
use crate::share::share_message;
use anyhow::{Context, Result};
use std::sync::Arc;

/// Prints the share text and deep link for a product.
pub struct ShareCommand {
    config: Config,
}

impl ShareCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn execute(&self, id: u64) -> Result<String> {
        let client = CatalogClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(Arc::new(client), id).await
    }

    pub async fn execute_with_client<C: CatalogSource + ?Sized>(
        &self,
        client: Arc<C>,
        id: u64,
    ) -> Result<String> {
        let product = client.product(id).await?;
        let share = share_message(&product, &self.config.share_scheme);

        Ok(Formatter::new(self.config.format).format_share(&share))
    }
}
