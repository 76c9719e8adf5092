//! Wish list of product snapshots persisted under a single storage key.
//!
//! The whole collection is stored as one JSON array and rewritten on every
//! mutation. Mutations read the persisted blob, modify it and write it back;
//! `&mut self` keeps one store instance single-writer, but two instances over
//! the same storage can still lose an update (last write wins).

use crate::catalog::Product;
use crate::error::{Error, Result};
use crate::storage::KeyValueStore;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Storage key holding the saved products.
pub const STORAGE_KEY: &str = "savedItems";

/// Result of [`WishListStore::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The product was not saved before and was appended.
    Added,
    /// A snapshot with the same id existed and was replaced in place.
    Replaced,
}

/// Persisted wish list with an in-memory mirror of the last known state.
pub struct WishListStore<S: KeyValueStore + ?Sized> {
    storage: Arc<S>,
    items: Vec<Product>,
}

impl<S: KeyValueStore + ?Sized> WishListStore<S> {
    /// Creates a store over `storage`. The mirror starts empty until [`load`](Self::load).
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage, items: Vec::new() }
    }

    /// Reloads the mirror from storage.
    ///
    /// A corrupt payload is logged and treated as an empty list; storage I/O
    /// errors are returned.
    pub async fn load(&mut self) -> Result<&[Product]> {
        match self.read_persisted().await {
            Ok(items) => self.items = items,
            Err(Error::Corrupt(e)) => {
                warn!("Saved wish list could not be parsed, treating it as empty: {}", e);
                self.items = Vec::new();
            }
            Err(e) => return Err(e),
        }

        debug!("Loaded {} saved products", self.items.len());
        Ok(&self.items)
    }

    /// Like [`load`](Self::load) but reports a corrupt payload as [`Error::Corrupt`].
    pub async fn try_load(&mut self) -> Result<&[Product]> {
        self.items = self.read_persisted().await?;
        Ok(&self.items)
    }

    /// Saves a snapshot of `product`, replacing an existing entry with the same id.
    pub async fn add(&mut self, product: Product) -> Result<AddOutcome> {
        let mut items = self.read_persisted().await?;

        let outcome = match items.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => {
                *existing = product;
                AddOutcome::Replaced
            }
            None => {
                items.push(product);
                AddOutcome::Added
            }
        };

        self.persist(items).await?;
        info!("Wish list now holds {} products ({:?})", self.items.len(), outcome);
        Ok(outcome)
    }

    /// Removes the entry with `id`. Returns whether anything was removed.
    pub async fn remove(&mut self, id: u64) -> Result<bool> {
        let mut items = self.read_persisted().await?;
        let before = items.len();
        items.retain(|p| p.id != id);

        if items.len() == before {
            // Nothing to write, but the mirror still learns the persisted state
            self.items = items;
            return Ok(false);
        }

        self.persist(items).await?;
        info!("Removed product {} from wish list", id);
        Ok(true)
    }

    /// Removes the product if saved, saves it otherwise. Returns the new saved state.
    pub async fn toggle(&mut self, product: Product) -> Result<bool> {
        let mut items = self.read_persisted().await?;

        let saved = if items.iter().any(|p| p.id == product.id) {
            items.retain(|p| p.id != product.id);
            false
        } else {
            items.push(product);
            true
        };

        self.persist(items).await?;
        Ok(saved)
    }

    /// Persists `products` wholesale. Duplicate ids collapse onto the first
    /// position with the last snapshot.
    pub async fn replace(&mut self, products: Vec<Product>) -> Result<()> {
        let mut items: Vec<Product> = Vec::with_capacity(products.len());
        for product in products {
            match items.iter_mut().find(|p| p.id == product.id) {
                Some(existing) => *existing = product,
                None => items.push(product),
            }
        }

        self.persist(items).await
    }

    /// Persists an empty wish list.
    pub async fn clear(&mut self) -> Result<()> {
        self.persist(Vec::new()).await
    }

    /// Membership test against the mirror; call [`load`](Self::load) to see external changes.
    pub fn is_saved(&self, id: u64) -> bool {
        self.items.iter().any(|p| p.id == id)
    }

    pub fn entries(&self) -> &[Product] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    async fn read_persisted(&self) -> Result<Vec<Product>> {
        match self.storage.get(STORAGE_KEY).await? {
            Some(json) if !json.trim().is_empty() => {
                serde_json::from_str(&json).map_err(Error::Corrupt)
            }
            _ => Ok(Vec::new()),
        }
    }

    /// Writes `items` and only then updates the mirror.
    async fn persist(&mut self, items: Vec<Product>) -> Result<()> {
        let json = serde_json::to_string(&items).map_err(Error::Encode)?;
        self.storage.set(STORAGE_KEY, &json).await?;
        self.items = items;
        Ok(())
    }
}
