//! DynamoDB storage backend.
//!
//! Implements the repository contract from `recordstore_core::storage` over
//! one table per record type, keyed so that every record is its own
//! partition.

mod conversions;
mod error;
mod repository;

pub use repository::DynamoDbRepository;
