//! SQLite backend for the public office register.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Referential actions (cascade and set
//! null) are declared in the schema and carried out by SQLite itself.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
