//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use std::sync::OnceLock;
use regex::Regex;

/// Validate email format
pub fn is_valid_email(email: &str) -> bool {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(email))
}

/// Validate phone number format.
///
/// Digits, parentheses, spaces and dashes only, at least ten characters.
pub fn is_valid_phone(phone: &str) -> bool {
    phone.chars().count() >= 10
        && phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '(' | ')' | ' ' | '-'))
}

/// Trim and collapse runs of whitespace into single spaces
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trimmed text, or `None` if nothing is left
pub fn non_empty(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("maria@example.com"));
        assert!(is_valid_email("a.b+c@escola.org.br"));
        assert!(!is_valid_email("maria@example"));
        assert!(!is_valid_email("maria example@x.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_phone_validation() {
        assert!(is_valid_phone("(11) 98765-4321"));
        assert!(is_valid_phone("11987654321"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("+55 11 98765-4321"));
        assert!(!is_valid_phone("phone-number"));
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  Ana   Maria \t Silva "), "Ana Maria Silva");
        assert_eq!(normalize_whitespace("   "), "");
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("  x ".to_string())), Some("x".to_string()));
        assert_eq!(non_empty(Some("   ".to_string())), None);
        assert_eq!(non_empty(None), None);
    }
}
