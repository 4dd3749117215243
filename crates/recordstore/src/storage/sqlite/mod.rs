//! SQLite storage backend.
//!
//! Implements the repository contract from `recordstore_core::storage` over
//! a relational table per record type, created lazily on first use.

mod error;
mod repository;
mod sql;

pub use repository::SqliteRepository;
