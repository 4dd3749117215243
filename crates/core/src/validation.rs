//! Business validation helpers.
//!
//! Pure string predicates used by the service layer before anything reaches
//! a repository. Validation failures are user-facing and never originate
//! from storage.
//!
//! The full set is the shared validation surface; a given service only wires
//! in the predicates its fields call for.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static LETTERS_OR_SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}\p{M}\s]+$").expect("valid regex"));

static LETTERS_DIGITS_OR_SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w\s]+$").expect("valid regex"));

/// A rejected field value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },
    #[error("{field} must not start or end with a space and may only contain letters or spaces")]
    NotAName { field: &'static str },
    #[error(
        "{field} must not start or end with a space and may only contain letters, digits or spaces"
    )]
    NotAWord { field: &'static str },
    #[error(
        "{field} must not start or end with a space and may only contain digits, parentheses, commas or spaces"
    )]
    NotAPhoneNumber { field: &'static str },
}

/// Rejects unset and empty values.
pub fn require_not_empty(field: &'static str, value: Option<&str>) -> Result<(), ValidationError> {
    match value {
        Some(v) if !v.is_empty() => Ok(()),
        _ => Err(ValidationError::Empty { field }),
    }
}

/// Rejects values that start or end with a space or contain anything besides
/// letters and spaces. Unset values are rejected too.
pub fn require_letters_or_spaces(
    field: &'static str,
    value: Option<&str>,
) -> Result<(), ValidationError> {
    match value {
        Some(v) if !has_edge_space(v) && LETTERS_OR_SPACES.is_match(v) => Ok(()),
        _ => Err(ValidationError::NotAName { field }),
    }
}

/// Rejects values that start or end with a space or contain anything besides
/// letters, digits and spaces. Unset values are rejected too.
pub fn require_letters_digits_or_spaces(
    field: &'static str,
    value: Option<&str>,
) -> Result<(), ValidationError> {
    match value {
        Some(v) if !has_edge_space(v) && LETTERS_DIGITS_OR_SPACES.is_match(v) => Ok(()),
        _ => Err(ValidationError::NotAWord { field }),
    }
}

fn has_edge_space(value: &str) -> bool {
    value.starts_with(' ') || value.ends_with(' ')
}
