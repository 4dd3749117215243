//! The record contract and field mapping types.
//!
//! A record is a plain data value identified by a [`uuid::Uuid`]. Instead of
//! inspecting types at runtime, each record type declares its non-identity
//! fields once as a static schema; the backends drive their DDL, writes and
//! reads off that declaration in a single, stable order.

mod traits;
mod types;

pub use traits::Record;
pub use types::{FieldDef, FieldKind, FieldMap, FieldValue};
