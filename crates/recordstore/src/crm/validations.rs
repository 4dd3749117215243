//! CRM-specific field validation.

use std::sync::LazyLock;

use regex::Regex;
use recordstore_core::validation::ValidationError;

static PHONE_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9(), ]+$").expect("valid regex"));

/// Validates an optional phone number.
///
/// An unset number is fine; a present one may only contain digits,
/// parentheses, commas and spaces, and must not start or end with a space.
pub fn validate_phone_number(input: Option<&str>) -> Result<(), ValidationError> {
    match input {
        None => Ok(()),
        Some(number)
            if !number.starts_with(' ')
                && !number.ends_with(' ')
                && PHONE_CHARSET.is_match(number) =>
        {
            Ok(())
        }
        Some(_) => Err(ValidationError::NotAPhoneNumber {
            field: "phone number",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_phone_number_is_accepted() {
        assert!(validate_phone_number(None).is_ok());
    }

    #[test]
    fn test_digits_parentheses_and_spaces_are_accepted() {
        assert!(validate_phone_number(Some("(06) 1234 5678")).is_ok());
        assert!(validate_phone_number(Some("0612345678")).is_ok());
    }

    #[test]
    fn test_edge_spaces_are_rejected() {
        assert!(validate_phone_number(Some(" 0612345678")).is_err());
        assert!(validate_phone_number(Some("0612345678 ")).is_err());
    }

    #[test]
    fn test_letters_and_plus_are_rejected() {
        assert!(validate_phone_number(Some("+31612345678")).is_err());
        assert!(validate_phone_number(Some("call me")).is_err());
        assert!(validate_phone_number(Some("")).is_err());
    }
}
