//! SQLite backend for the Rostrum talk and account stores.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread without blocking the async runtime. A single connection serves
//! the whole process; SQLite serialises writes, which is what makes the
//! revision-guarded update/delete statements atomic.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
