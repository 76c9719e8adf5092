//! Wish list command implementation.

use crate::catalog::{CatalogClient, CatalogSource};
use crate::config::Config;
use crate::format::Formatter;
use crate::storage::{FileStore, KeyValueStore};
use crate::wishlist::{AddOutcome, WishListStore};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::debug;

/// Wish list subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishlistAction {
    List,
    Add(u64),
    Remove(u64),
    Toggle(u64),
    Clear,
}

/// Manages the persisted wish list.
pub struct WishlistCommand {
    config: Config,
}

impl WishlistCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs `action` against the wish list in the configured data directory.
    pub async fn execute(&self, action: WishlistAction) -> Result<String> {
        let data_dir = self.config.resolved_data_dir();
        debug!("Wish list directory: {}", data_dir.display());

        let config = &self.config;
        let connect = || -> Result<Arc<CatalogClient>> {
            let client = CatalogClient::new(config).context("Failed to create HTTP client")?;
            Ok(Arc::new(client))
        };

        self.execute_with(connect, Arc::new(FileStore::new(data_dir)), action).await
    }

    /// Runs `action` with the given storage (for testing).
    ///
    /// `connect` is only called for actions that fetch a product, so listing,
    /// removing and clearing never touch the network.
    pub async fn execute_with<C, S, F>(
        &self,
        connect: F,
        storage: Arc<S>,
        action: WishlistAction,
    ) -> Result<String>
    where
        C: CatalogSource + ?Sized,
        S: KeyValueStore + ?Sized,
        F: FnOnce() -> Result<Arc<C>>,
    {
        let mut store = WishListStore::new(storage);
        store.load().await.context("Failed to read wish list")?;

        let message = match action {
            WishlistAction::List => {
                return Ok(Formatter::new(self.config.format).format_products(store.entries()));
            }
            WishlistAction::Add(id) => {
                let product = connect()?.product(id).await?;
                let title = product.title.clone();
                match store.add(product).await.context("Failed to save wish list")? {
                    AddOutcome::Added => format!("Saved {} ({})", title, id),
                    AddOutcome::Replaced => format!("Updated {} ({})", title, id),
                }
            }
            WishlistAction::Remove(id) => {
                if store.remove(id).await.context("Failed to save wish list")? {
                    format!("Removed product {}", id)
                } else {
                    format!("Product {} was not saved", id)
                }
            }
            WishlistAction::Toggle(id) => {
                // Unsaving uses the stored snapshot, so it works offline
                let product = match store.entries().iter().find(|p| p.id == id) {
                    Some(saved) => saved.clone(),
                    None => connect()?.product(id).await?,
                };
                if store.toggle(product).await.context("Failed to save wish list")? {
                    format!("Saved product {}", id)
                } else {
                    format!("Removed product {}", id)
                }
            }
            WishlistAction::Clear => {
                store.clear().await.context("Failed to save wish list")?;
                "Cleared wish list".to_string()
            }
        };

        Ok(format!("{} ({} saved)", message, store.len()))
    }
}
