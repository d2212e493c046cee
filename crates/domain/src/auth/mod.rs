//! Token verification, password hashing, and the identity check applied to
//! every authenticated operation.

mod jwt;
mod password;

pub use jwt::{DEFAULT_TOKEN_TTL_SECS, TokenClaims, TokenKeys};
pub use password::{DEFAULT_BCRYPT_COST, PasswordHasher};

use thiserror::Error;

/// Authentication and authorization failures.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token subject does not match the targeted identity, or there is
    /// no verified subject at all.
    #[error("Forbidden")]
    Forbidden,

    /// Login attempted with an unknown username or wrong password.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// A token could not be issued.
    #[error("Token error: {0}")]
    Token(String),

    /// The password hashing primitive failed.
    #[error("Password hashing error: {0}")]
    Hashing(String),
}

/// The identity recovered from a request's bearer token.
///
/// `None` when the token was missing or failed verification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity(Option<String>);

impl Identity {
    /// An identity carrying a verified subject.
    pub fn verified(subject: impl Into<String>) -> Self {
        Self(Some(subject.into()))
    }

    /// The identity of a request with no valid token.
    pub fn anonymous() -> Self {
        Self(None)
    }

    /// Returns the verified subject, if any.
    pub fn subject(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Allows the request only if the verified subject equals `target`
    /// exactly. Comparison is case-sensitive with no normalization.
    pub fn authorize(&self, target: &str) -> Result<(), AuthError> {
        match self.subject() {
            Some(subject) if subject == target => Ok(()),
            subject => {
                tracing::warn!(
                    target_user = %target,
                    token_subject = ?subject,
                    "token subject does not match requested user"
                );
                metrics::counter!("auth_denied_total").increment(1);
                Err(AuthError::Forbidden)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_subject_is_authorized() {
        let identity = Identity::verified("bob");
        assert!(identity.authorize("bob").is_ok());
    }

    #[test]
    fn mismatched_subject_is_forbidden() {
        let identity = Identity::verified("bob");
        assert!(matches!(
            identity.authorize("alice"),
            Err(AuthError::Forbidden)
        ));
    }

    #[test]
    fn comparison_is_case_sensitive() {
        let identity = Identity::verified("bob");
        assert!(matches!(identity.authorize("Bob"), Err(AuthError::Forbidden)));
        assert!(matches!(identity.authorize("bob "), Err(AuthError::Forbidden)));
    }

    #[test]
    fn anonymous_is_always_forbidden() {
        let identity = Identity::anonymous();
        assert!(identity.subject().is_none());
        assert!(matches!(identity.authorize(""), Err(AuthError::Forbidden)));
        assert!(matches!(identity.authorize("bob"), Err(AuthError::Forbidden)));
    }
}
