//! Registered users and registration rules.

use common::{CartId, UserId};
use store::UserRecord;
use thiserror::Error;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 7;

/// A registered user.
///
/// Not `Serialize`: the password hash must never reach a response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
    pub cart_id: Option<CartId>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            username: record.username,
            password_hash: record.password_hash,
            cart_id: record.cart_id,
        }
    }
}

/// Reasons a registration request is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Password must be at least {MIN_PASSWORD_LEN} characters")]
    PasswordTooShort,

    #[error("Password and confirmation do not match")]
    PasswordMismatch,
}

/// Checks a registration's password rules.
pub fn validate_password(password: &str, confirm_password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    if password != confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_seven_characters() {
        assert_eq!(validate_password("abcdefg", "abcdefg"), Ok(()));
    }

    #[test]
    fn rejects_short_password() {
        assert_eq!(
            validate_password("abcdef", "abcdef"),
            Err(ValidationError::PasswordTooShort)
        );
    }

    #[test]
    fn rejects_mismatched_confirmation() {
        assert_eq!(
            validate_password("password1", "password2"),
            Err(ValidationError::PasswordMismatch)
        );
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // Six characters, twelve bytes.
        assert_eq!(
            validate_password("éééééé", "éééééé"),
            Err(ValidationError::PasswordTooShort)
        );
    }
}
