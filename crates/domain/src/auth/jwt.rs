//! JWT issuance and verification.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use super::AuthError;

/// Token lifetime: 10 days.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 10 * 24 * 60 * 60;

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// The username the token was issued to.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signing and verification keys for HS512 access tokens.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenKeys {
    /// Creates keys from a shared secret and a token lifetime.
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Issues a signed token whose subject is `subject`.
    pub fn issue(&self, subject: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        self.sign(&claims)
    }

    fn sign(&self, claims: &TokenClaims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS512), claims, &self.encoding)
            .map_err(|e| AuthError::Token(format!("jwt encode: {e}")))
    }

    /// Verifies a token's signature and expiry and returns its subject.
    ///
    /// Every failure (malformed, bad signature, expired, wrong algorithm)
    /// yields `None`.
    pub fn verify(&self, token: &str) -> Option<String> {
        let mut validation = Validation::new(Algorithm::HS512);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        match decode::<TokenClaims>(token, &self.decoding, &validation) {
            Ok(data) => Some(data.claims.sub),
            Err(e) => {
                tracing::debug!(error = %e, "token verification failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> TokenKeys {
        TokenKeys::new(b"test-secret", Duration::seconds(DEFAULT_TOKEN_TTL_SECS))
    }

    #[test]
    fn issued_token_verifies_to_subject() {
        let keys = keys();
        let token = keys.issue("bob").unwrap();
        assert_eq!(keys.verify(&token).as_deref(), Some("bob"));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = TokenKeys::new(b"other-secret", Duration::hours(1))
            .issue("bob")
            .unwrap();
        assert!(keys().verify(&token).is_none());
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = keys();
        let now = Utc::now().timestamp();
        let token = keys
            .sign(&TokenClaims {
                sub: "bob".to_string(),
                iat: now - 7200,
                exp: now - 3600,
            })
            .unwrap();
        assert!(keys.verify(&token).is_none());
    }

    #[test]
    fn malformed_token_is_rejected() {
        let keys = keys();
        assert!(keys.verify("").is_none());
        assert!(keys.verify("not.a.jwt").is_none());
        assert!(keys.verify("Bearer abc").is_none());
    }

    #[test]
    fn token_with_other_algorithm_is_rejected() {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            sub: "bob".to_string(),
            iat: now,
            exp: now + 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();
        assert!(keys().verify(&token).is_none());
    }
}
