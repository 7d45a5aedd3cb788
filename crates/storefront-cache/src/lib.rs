//! Type-safe Key-Value storage for the storefront client state.
//!
//! Plays the role browser local storage plays for a web storefront: a flat
//! namespace of string keys holding JSON values, read at startup and
//! overwritten on change.
//!
//! # Example
//!
//! ```rust
//! use storefront_cache::{Cache, MemoryStore};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Line {
//!     id: i64,
//!     quantity: u32,
//! }
//!
//! let cache = Cache::new(MemoryStore::new());
//!
//! // Store a value
//! cache.set("cart", &vec![Line { id: 1, quantity: 2 }]).unwrap();
//!
//! // Retrieve a value
//! let cart: Option<Vec<Line>> = cache.get("cart").unwrap();
//! assert_eq!(cart.unwrap()[0].quantity, 2);
//!
//! // Delete a value
//! cache.delete("cart").unwrap();
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::{Cache, KeyValueStore};
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore};
}
