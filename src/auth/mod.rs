pub mod password;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::SecurityConfig;

/// Which secret a token was signed with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id, named after the wire field the client stores
    pub sno: Uuid,
    pub kind: TokenKind,
    pub jti: Uuid,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid token")]
    InvalidToken,
}

struct SigningKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime_secs: u64,
}

impl SigningKeys {
    fn new(secret: &str, lifetime_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            lifetime_secs,
        }
    }
}

/// Issues and verifies access and refresh tokens. Each kind has its own
/// secret so an access token never verifies as a refresh token.
pub struct TokenService {
    access: SigningKeys,
    refresh: SigningKeys,
}

impl TokenService {
    pub fn new(security: &SecurityConfig) -> Self {
        Self {
            access: SigningKeys::new(
                &security.auth_token_secret,
                security.auth_token_lifetime_secs,
            ),
            refresh: SigningKeys::new(
                &security.refresh_token_secret,
                security.refresh_token_lifetime_secs,
            ),
        }
    }

    fn keys(&self, kind: TokenKind) -> &SigningKeys {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }

    fn issue(&self, user_id: Uuid, kind: TokenKind) -> Result<String, JwtError> {
        let keys = self.keys(kind);
        let now = Utc::now();
        let exp = i64::try_from(keys.lifetime_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                JwtError::TokenGeneration(format!(
                    "{:?} token lifetime of {}s is out of range",
                    kind, keys.lifetime_secs
                ))
            })?;
        let claims = Claims {
            sno: user_id,
            kind,
            jti: Uuid::new_v4(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &keys.encoding)
            .map_err(|e| JwtError::TokenGeneration(e.to_string()))
    }

    pub fn issue_access_token(&self, user_id: Uuid) -> Result<String, JwtError> {
        self.issue(user_id, TokenKind::Access)
    }

    pub fn issue_refresh_token(&self, user_id: Uuid) -> Result<String, JwtError> {
        self.issue(user_id, TokenKind::Refresh)
    }

    /// Checks signature, expiry and that the claims were minted for `kind`
    pub fn verify(&self, token: &str, kind: TokenKind) -> Result<Claims, JwtError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.keys(kind).decoding, &validation).map_err(|e| {
            tracing::debug!("{:?} token rejected: {}", kind, e);
            JwtError::InvalidToken
        })?;

        if data.claims.kind != kind {
            return Err(JwtError::InvalidToken);
        }
        Ok(data.claims)
    }
}
