//! List and search command implementation.

use crate::catalog::{CatalogClient, CatalogSource};
use crate::config::{Config, OutputFormat};
use crate::engine::{ListCriteria, ListEngine};
use crate::format::Formatter;
use crate::sort::SortOrder;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

/// What to list and how much of it to show.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Category slug to fetch
    pub category: Option<String>,
    /// Server-side search query
    pub search: Option<String>,
    /// Local title filter applied after fetching
    pub filter: Option<String>,
    /// Sort applied to the fetched products
    pub sort: Option<SortOrder>,
    /// Number of pages to reveal
    pub pages: usize,
}

/// Lists catalog products through the list engine.
pub struct ListCommand {
    config: Config,
}

impl ListCommand {
    /// Creates a new list command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Fetches and returns the formatted visible window.
    pub async fn execute(&self, options: &ListOptions) -> Result<String> {
        let client = CatalogClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(Arc::new(client), options).await
    }

    /// Runs the listing with a provided client (for testing).
    pub async fn execute_with_client<C: CatalogSource + ?Sized>(
        &self,
        client: Arc<C>,
        options: &ListOptions,
    ) -> Result<String> {
        let mut engine = ListEngine::with_page_size(client, self.config.page_size)
            .with_filters(self.config.filter_chain());

        let criteria = ListCriteria {
            category: options.category.clone(),
            sort: options.sort,
            search: options.search.clone(),
        };
        info!("Listing products: {:?}", criteria);

        engine.reload(criteria).await.context("Failed to load products")?;

        if let Some(filter) = &options.filter {
            engine.set_query(filter.as_str());
        }

        for _ in 1..options.pages.max(1) {
            if !engine.load_more() {
                debug!("Reached the end after {} pages", engine.page_count());
                break;
            }
        }

        let formatter = Formatter::new(self.config.format);
        let mut output = formatter.format_products(engine.visible());

        if self.config.format == OutputFormat::Table && engine.has_more() {
            output.push_str(&format!(
                "\nShowing {} of {} (use --pages {} for more)",
                engine.visible().len(),
                engine.filtered_len(),
                engine.page_count() + 1
            ));
        }

        Ok(output)
    }
}
