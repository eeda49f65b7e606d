//! Items Module
//!
//! The record store guarded by the session middleware: create, list, read,
//! update and delete named inventory items.
//!
//! - **`db`** - SQLite queries over the `items` table
//! - **`handlers`** - HTTP handlers for `/api/items`

/// Item database operations
pub mod db;

/// Item HTTP handlers
pub mod handlers;

pub use db::Item;
pub use handlers::ItemRequest;
