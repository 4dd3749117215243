//! The storage contract shared by every backend.
//!
//! Backends implement [`Repository`]; callers select one at startup via the
//! factory in the binary crate and hold onto it for the process lifetime.

mod error;
mod settings;
mod traits;

pub use error::{ConfigError, CreateRepositoryError, Result, StorageError};
pub use settings::{BackendKind, StorageSettings};
pub use traits::Repository;
