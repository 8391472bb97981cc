//! Password complexity rules.
//!
//! Stateless checks over a candidate plaintext, shared by self-service
//! signup and admin-driven resets. Rules run in a fixed order and the
//! first failure wins, so callers always see a single, specific reason.

use thiserror::Error;

/// Minimum password length in characters.
const MIN_LENGTH: usize = 8;

/// A password rejected for failing a complexity rule.
///
/// One variant per rule; the display string is the message shown to the
/// person choosing the password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PolicyViolation {
    #[error("Password must be at least 8 characters.")]
    TooShort,
    #[error("Password must contain at least one lowercase letter.")]
    MissingLowercase,
    #[error("Password must contain at least one uppercase letter.")]
    MissingUppercase,
    #[error("Password must contain at least one digit.")]
    MissingDigit,
    #[error("Password must contain at least one special character (e.g., !@#$%).")]
    MissingSpecial,
}

/// Check a candidate password against the complexity rules.
///
/// Rules, in order: length, lowercase, uppercase, digit, special
/// character (anything that is neither alphanumeric nor whitespace).
pub fn validate_password(password: &str) -> Result<(), PolicyViolation> {
    if password.chars().count() < MIN_LENGTH {
        return Err(PolicyViolation::TooShort);
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(PolicyViolation::MissingLowercase);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(PolicyViolation::MissingUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(PolicyViolation::MissingDigit);
    }
    if !password
        .chars()
        .any(|c| !c.is_alphanumeric() && !c.is_whitespace())
    {
        return Err(PolicyViolation::MissingSpecial);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seven_characters_rejected_for_length() {
        assert_eq!(validate_password("short1!"), Err(PolicyViolation::TooShort));
    }

    #[test]
    fn missing_uppercase_rejected() {
        assert_eq!(
            validate_password("alllowercase1!"),
            Err(PolicyViolation::MissingUppercase)
        );
    }

    #[test]
    fn missing_lowercase_rejected() {
        assert_eq!(
            validate_password("ALLUPPER1!"),
            Err(PolicyViolation::MissingLowercase)
        );
    }

    #[test]
    fn missing_digit_rejected() {
        assert_eq!(
            validate_password("NoDigits!"),
            Err(PolicyViolation::MissingDigit)
        );
    }

    #[test]
    fn missing_special_rejected() {
        assert_eq!(
            validate_password("NoSpecial123"),
            Err(PolicyViolation::MissingSpecial)
        );
    }

    #[test]
    fn compliant_password_accepted() {
        assert_eq!(validate_password("Valid123!"), Ok(()));
    }

    #[test]
    fn first_failure_wins() {
        // Fails length, lowercase and special at once; length is reported.
        assert_eq!(validate_password("AAA111"), Err(PolicyViolation::TooShort));
    }

    #[test]
    fn whitespace_is_not_a_special_character() {
        assert_eq!(
            validate_password("With Space1"),
            Err(PolicyViolation::MissingSpecial)
        );
    }
}
