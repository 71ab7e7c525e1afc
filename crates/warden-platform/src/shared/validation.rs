//! Request Validation
//!
//! Pure field checks shared by the API handlers. Rules run in a fixed
//! order and the first violated rule wins; later rules are not evaluated.

use std::sync::OnceLock;

use regex::Regex;

use crate::shared::error::{AdminError, Result};

/// Minimum accepted password length.
pub const PASS_LENGTH: usize = 8;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    })
}

/// Require a field to be present and non-empty, returning its value.
pub fn required<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AdminError::validation(format!("{field} field must be filled"))),
    }
}

/// Require a well-formed email address.
pub fn valid_email(email: &str) -> Result<()> {
    if email_regex().is_match(email) {
        Ok(())
    } else {
        Err(AdminError::validation("email field must be valid email"))
    }
}

/// Require a password of at least [`PASS_LENGTH`] characters.
pub fn valid_password(password: &str) -> Result<()> {
    if password.chars().count() < PASS_LENGTH {
        return Err(AdminError::validation(format!(
            "password length must be at least {PASS_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Require an array field to be present and non-empty, returning the list.
pub fn required_list<'a, T>(field: &str, value: Option<&'a Vec<T>>) -> Result<&'a Vec<T>> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AdminError::validation(format!("{field} field must be a non-empty array"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_missing_and_blank() {
        assert!(required("email", None).is_err());
        assert!(required("email", Some("")).is_err());
        assert!(required("email", Some("   ")).is_err());
        assert_eq!(required("email", Some("a@b.co")).unwrap(), "a@b.co");
    }

    #[test]
    fn required_reports_field_name_first() {
        let err = required("email", None).unwrap_err();
        let AdminError::Validation { description } = err else {
            panic!("expected validation error");
        };
        assert_eq!(description, "email field must be filled");
    }

    #[test]
    fn email_shape_is_checked() {
        assert!(valid_email("user@example.com").is_ok());
        assert!(valid_email("u.ser+tag@sub.example.org").is_ok());
        assert!(valid_email("not-an-email").is_err());
        assert!(valid_email("missing@tld").is_err());
        assert!(valid_email("spaces in@example.com").is_err());
        assert!(valid_email("@example.com").is_err());
    }

    #[test]
    fn password_length_is_enforced() {
        assert!(valid_password("short").is_err());
        assert!(valid_password("1234567").is_err());
        assert!(valid_password("12345678").is_ok());
        assert!(valid_password("a much longer passphrase").is_ok());
    }

    #[test]
    fn required_list_rejects_missing_and_empty() {
        let empty: Vec<String> = vec![];
        assert!(required_list::<String>("roles", None).is_err());
        assert!(required_list("roles", Some(&empty)).is_err());

        let roles = vec!["r1".to_string()];
        assert_eq!(required_list("roles", Some(&roles)).unwrap().len(), 1);
    }
}
