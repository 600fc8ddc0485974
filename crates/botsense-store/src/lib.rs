//! Botsense message store - per-dialog message log with pluggable backends.
//!
//! Provides the `MessageStore` contract plus two interchangeable
//! implementations: a volatile in-process store and a durable WAL-mode
//! SQLite store. Both guarantee chronological history ordering with a
//! stable tiebreaker for equal timestamps.

pub mod db;
pub mod memory;
pub mod migrations;
pub mod sqlite;
pub mod store;

pub use db::Database;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use store::{MessageStore, StoreError, StoreStats};
