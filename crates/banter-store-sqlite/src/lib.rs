//! SQLite backend for the banter community store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Every multi-write operation runs in an
//! explicit transaction that commits or rolls back before its future
//! resolves; a caller dropping that future does not abort the unit, which
//! runs to completion on the connection thread.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
