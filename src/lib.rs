//! shopfront - Product catalog browser
//!
//! Fetches a remote product catalog, filters, sorts and paginates it locally,
//! and keeps a persisted wish list of product snapshots.

pub mod catalog;
pub mod categories;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod filters;
pub mod format;
pub mod selection;
pub mod share;
pub mod sort;
pub mod storage;
pub mod wishlist;

#[cfg(test)]
mod test_support;

pub use catalog::{CatalogClient, CatalogSource, Category, Product};
pub use categories::CategoryController;
pub use config::Config;
pub use engine::{ListCriteria, ListEngine, ReloadOutcome, ReloadTicket};
pub use error::{Error, ErrorKind, Result};
pub use selection::SelectionController;
pub use sort::{SortDirection, SortKey, SortOrder};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use wishlist::{AddOutcome, WishListStore};
