//! Storefront Storage Layer
//!
//! SQLite-backed client state plus the key-value capability the session
//! layer persists through. Hosts without durable storage use [`MemoryStore`].

mod database;
mod error;
mod migrations;
mod store;

pub use database::Database;
pub use error::StorageError;
pub use store::{KeyValueStore, KeyValueStoreExt, MemoryStore};

pub type Result<T> = std::result::Result<T, StorageError>;
