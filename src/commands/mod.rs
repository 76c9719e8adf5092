//! CLI command implementations.

pub mod categories;
pub mod list;
pub mod product;
pub mod share;
pub mod wishlist;

pub use categories::CategoriesCommand;
pub use list::{ListCommand, ListOptions};
pub use product::ProductCommand;
pub use share::ShareCommand;
pub use wishlist::{WishlistAction, WishlistCommand};
