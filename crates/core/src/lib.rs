//! Core contracts for the recordstore project.
//!
//! This crate defines the storage-agnostic pieces shared by every backend:
//! the [`record::Record`] contract a persistable type implements, the
//! [`storage::Repository`] trait the backends fulfil, and the business
//! validation helpers used by the service layer.

pub mod record;
pub mod storage;
pub mod validation;
