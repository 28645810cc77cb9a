//! Session token issuance and verification.

use std::{fmt, time::Duration};

use jiff::Timestamp;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::{RngCore, rngs::OsRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::Zeroize;

use crate::domain::users::records::{Role, UserRecord};

/// Number of random bytes in an opaque token.
pub const OPAQUE_TOKEN_BYTES: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// HS256-signed JWT carrying [`SessionClaims`].
    Jwt,

    /// Random value with no verifiable claims.
    Opaque,
}

/// Claims carried by a signed session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Account UUID.
    pub sub: String,
    pub role: Role,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_id: Option<String>,

    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("opaque tokens carry no verifiable claims")]
    Unverifiable,

    #[error("failed to sign session token")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error("session token is invalid or expired")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

#[derive(Clone)]
struct SigningKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

/// Issues JWTs when a signing secret is configured, opaque tokens otherwise.
#[derive(Clone)]
pub struct TokenIssuer {
    keys: Option<SigningKeys>,
    expires_in: Duration,
}

impl TokenIssuer {
    #[must_use]
    pub fn new(secret: Option<&str>, expires_in: Duration) -> Self {
        let keys = secret
            .filter(|secret| !secret.is_empty())
            .map(|secret| SigningKeys {
                encoding: EncodingKey::from_secret(secret.as_bytes()),
                decoding: DecodingKey::from_secret(secret.as_bytes()),
            });

        Self { keys, expires_in }
    }

    #[must_use]
    pub const fn token_type(&self) -> TokenType {
        if self.keys.is_some() {
            TokenType::Jwt
        } else {
            TokenType::Opaque
        }
    }

    /// Issue a token for `user`, embedding `restaurant_id` when signing.
    ///
    /// # Errors
    ///
    /// Returns an error when JWT encoding fails.
    pub fn issue(&self, user: &UserRecord, restaurant_id: Option<&str>) -> Result<String, TokenError> {
        let Some(keys) = &self.keys else {
            return Ok(generate_opaque_token());
        };

        let iat = Timestamp::now().as_second();
        let ttl = i64::try_from(self.expires_in.as_secs()).unwrap_or(i64::MAX);

        let claims = SessionClaims {
            sub: user.id.to_string(),
            role: user.role,
            restaurant_id: restaurant_id.map(str::to_string),
            iat,
            exp: iat.saturating_add(ttl),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding).map_err(TokenError::Signing)
    }

    /// Verify a signed token and return its claims.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Unverifiable`] without a signing secret, and
    /// [`TokenError::Invalid`] for bad signatures or expired tokens.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let keys = self.keys.as_ref().ok_or(TokenError::Unverifiable)?;

        decode::<SessionClaims>(token, &keys.decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(TokenError::Invalid)
    }
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("token_type", &self.token_type())
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

fn generate_opaque_token() -> String {
    let mut bytes = [0_u8; OPAQUE_TOKEN_BYTES];

    OsRng.fill_bytes(&mut bytes);

    let token = hex::encode(bytes);

    bytes.zeroize();

    token
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::domain::users::records::UserUuid;

    fn owner() -> UserRecord {
        UserRecord {
            id: UserUuid::new(),
            username: "chef".to_string(),
            email: "chef@example.com".to_string(),
            password_hash: String::new(),
            role: Role::Ristoratore,
            restaurant_id: None,
            legacy_id: None,
            created_at: Timestamp::now(),
        }
    }

    #[test]
    fn opaque_tokens_are_random_hex() {
        let issuer = TokenIssuer::new(None, Duration::from_secs(60));

        let first = issuer.issue(&owner(), None);
        let second = issuer.issue(&owner(), None);

        assert_eq!(issuer.token_type(), TokenType::Opaque);
        assert!(matches!((&first, &second), (Ok(a), Ok(b)) if a != b && a.len() == 64));
    }

    #[test]
    fn opaque_tokens_cannot_be_verified() {
        let issuer = TokenIssuer::new(None, Duration::from_secs(60));

        let result = issuer.verify("00");

        assert!(
            matches!(result, Err(TokenError::Unverifiable)),
            "expected Unverifiable, got {result:?}"
        );
    }

    #[test]
    fn signed_tokens_carry_claims() -> TestResult {
        let issuer = TokenIssuer::new(Some("secret"), Duration::from_secs(60));
        let user = owner();

        let token = issuer.issue(&user, Some("r_42"))?;
        let claims = issuer.verify(&token)?;

        assert_eq!(issuer.token_type(), TokenType::Jwt);
        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.role, Role::Ristoratore);
        assert_eq!(claims.restaurant_id.as_deref(), Some("r_42"));
        assert_eq!(claims.exp - claims.iat, 60);

        Ok(())
    }

    #[test]
    fn tokens_signed_with_another_secret_are_rejected() -> TestResult {
        let token = TokenIssuer::new(Some("one"), Duration::from_secs(60)).issue(&owner(), None)?;

        let result = TokenIssuer::new(Some("two"), Duration::from_secs(60)).verify(&token);

        assert!(
            matches!(result, Err(TokenError::Invalid(_))),
            "expected Invalid, got {result:?}"
        );

        Ok(())
    }
}
