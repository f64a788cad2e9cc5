/// Input validation helpers for registration and login.
///
/// Emails are normalized (trimmed, lowercased) before any storage or
/// comparison. Password checks report every violated rule at once so a
/// client can show the full list instead of fixing one rule per attempt.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ValidationError;

const PASSWORD_MIN_LENGTH: usize = 8;
/// Fixed set of accepted special characters.
const PASSWORD_SYMBOLS: &str = "@$!%*?&";

lazy_static! {
    // user@domain shape check; anything stricter rejects real addresses.
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Trim surrounding whitespace and lowercase the address.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Validate an already-normalized email address.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::MissingField("email"));
    }
    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Validate password strength.
///
/// Rules: minimum 8 characters, at least one lowercase letter, one uppercase
/// letter, one digit, and one symbol from the fixed set. The error carries
/// all violated rules.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::MissingField("password"));
    }

    let mut violations = Vec::new();

    if password.len() < PASSWORD_MIN_LENGTH {
        violations.push(format!(
            "Password must be at least {} characters long",
            PASSWORD_MIN_LENGTH
        ));
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        violations.push("Password must contain at least one lowercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        violations.push("Password must contain at least one uppercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        violations.push("Password must contain at least one number".to_string());
    }
    if !password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
        violations.push(format!(
            "Password must contain at least one special character ({})",
            PASSWORD_SYMBOLS
        ));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::PasswordPolicy(violations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  User@Example.COM "), "user@example.com");
        assert_eq!(normalize_email("a@b.com"), "a@b.com");
    }

    #[test]
    fn test_valid_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("test.email@domain.co.uk").is_ok());
        assert!(validate_email("user+tag@example.com").is_ok());
    }

    #[test]
    fn test_invalid_email_format() {
        assert!(validate_email("notanemail").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@nodot").is_err());
        assert!(validate_email("user name@example.com").is_err());
    }

    #[test]
    fn test_empty_email() {
        match validate_email("") {
            Err(ValidationError::MissingField("email")) => (),
            other => panic!("Expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_password() {
        assert!(validate_password("Valid1Pass!").is_ok());
        assert!(validate_password("Another$Pass9").is_ok());
    }

    #[test]
    fn test_short_password_reports_length() {
        match validate_password("short1") {
            Err(ValidationError::PasswordPolicy(violations)) => {
                assert!(violations
                    .iter()
                    .any(|v| v.contains("at least 8 characters")));
            }
            other => panic!("Expected PasswordPolicy, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_uppercase_reported() {
        match validate_password("alllowercase1!") {
            Err(ValidationError::PasswordPolicy(violations)) => {
                assert!(violations.iter().any(|v| v.contains("uppercase")));
                assert!(!violations.iter().any(|v| v.contains("lowercase letter")));
            }
            other => panic!("Expected PasswordPolicy, got {:?}", other),
        }
    }

    #[test]
    fn test_all_violations_listed() {
        // "abc" breaks length, uppercase, digit, and symbol rules at once.
        match validate_password("abc") {
            Err(ValidationError::PasswordPolicy(violations)) => {
                assert_eq!(violations.len(), 4);
            }
            other => panic!("Expected PasswordPolicy, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_symbol_reported() {
        match validate_password("NoSymbol123") {
            Err(ValidationError::PasswordPolicy(violations)) => {
                assert_eq!(violations.len(), 1);
                assert!(violations[0].contains("special character"));
            }
            other => panic!("Expected PasswordPolicy, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_password() {
        match validate_password("") {
            Err(ValidationError::MissingField("password")) => (),
            other => panic!("Expected MissingField, got {:?}", other),
        }
    }
}
