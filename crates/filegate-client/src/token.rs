//! Token authority
//!
//! Mints and verifies HS256 tokens binding a user identity and issuance
//! instant to one of two purposes. Each purpose carries its own secret, so a
//! leaked direct-link token can never be replayed as an API-access token:
//! purpose isolation is enforced at the key level, not by a forgeable claim
//! field.

use chrono::Utc;
use filegate_core::config::AccessTokenOptions;
use filegate_core::error::{FileServiceError, FileServiceResult};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Default API-access token lifetime: 15 minutes. Backs short interactive
/// sessions.
pub const DEFAULT_API_ACCESS_LIFETIME_MS: i64 = 900_000;

/// Default direct-link token lifetime: 3 days. Direct links are meant to be
/// shared and must outlive the session that produced them.
pub const DEFAULT_DIRECT_LINK_LIFETIME_MS: i64 = 3 * 24 * 60 * 60 * 1000;

/// The scope a token is issued for; a token is meaningless outside it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenPurpose {
    /// Ordinary API access via `Authorization: Bearer` headers
    #[default]
    ApiAccess,
    /// Shareable direct-download links carrying the token as a query parameter
    DirectLink,
}

impl Display for TokenPurpose {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            TokenPurpose::ApiAccess => write!(f, "api-access"),
            TokenPurpose::DirectLink => write!(f, "direct-link"),
        }
    }
}

impl FromStr for TokenPurpose {
    type Err = FileServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "api-access" => Ok(TokenPurpose::ApiAccess),
            "direct-link" => Ok(TokenPurpose::DirectLink),
            _ => Err(FileServiceError::TokenInvalid),
        }
    }
}

/// Signed token payload
///
/// `user_id` and `timestamp` are set at issuance; `iat` and `exp` are the
/// standard issued-at/expiry claims enforced on verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthClaims {
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Issuance instant, milliseconds since epoch
    pub timestamp: i64,
    /// Issued-at, seconds since epoch
    pub iat: i64,
    /// Expiry, seconds since epoch
    pub exp: i64,
}

struct PurposeKey {
    secret: String,
    lifetime_ms: i64,
}

/// Mints and verifies purpose-scoped access tokens
pub struct TokenAuthority {
    api_access: PurposeKey,
    direct_link: PurposeKey,
}

// Secrets stay out of Debug output.
impl Debug for TokenAuthority {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("TokenAuthority")
            .field("api_access_lifetime_ms", &self.api_access.lifetime_ms)
            .field("direct_link_lifetime_ms", &self.direct_link.lifetime_ms)
            .finish()
    }
}

impl TokenAuthority {
    /// Build an authority from the two per-purpose option sets, applying the
    /// purpose defaults for unset lifetimes.
    pub fn new(file_access: AccessTokenOptions, file_access_link: AccessTokenOptions) -> Self {
        Self {
            api_access: PurposeKey {
                secret: file_access.secret,
                lifetime_ms: file_access
                    .expired_ms
                    .unwrap_or(DEFAULT_API_ACCESS_LIFETIME_MS),
            },
            direct_link: PurposeKey {
                secret: file_access_link.secret,
                lifetime_ms: file_access_link
                    .expired_ms
                    .unwrap_or(DEFAULT_DIRECT_LINK_LIFETIME_MS),
            },
        }
    }

    fn key(&self, purpose: TokenPurpose) -> &PurposeKey {
        match purpose {
            TokenPurpose::ApiAccess => &self.api_access,
            TokenPurpose::DirectLink => &self.direct_link,
        }
    }

    /// Mint a token for `user_id` scoped to `purpose`, expiring after the
    /// purpose's configured lifetime.
    pub fn create_token(&self, user_id: &str, purpose: TokenPurpose) -> FileServiceResult<String> {
        let key = self.key(purpose);
        let now_ms = Utc::now().timestamp_millis();

        let claims = AuthClaims {
            user_id: user_id.to_string(),
            timestamp: now_ms,
            iat: now_ms / 1000,
            exp: (now_ms + key.lifetime_ms) / 1000,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(key.secret.as_bytes()),
        )
        .map_err(FileServiceError::Signing)
    }

    /// Verify signature and expiry under the secret for `purpose`.
    ///
    /// Every verification failure collapses into the generic
    /// [`FileServiceError::TokenInvalid`]; the cause is logged at debug level
    /// only.
    pub fn validate_token(
        &self,
        token: &str,
        purpose: TokenPurpose,
    ) -> FileServiceResult<AuthClaims> {
        let key = self.key(purpose);

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        decode::<AuthClaims>(
            token,
            &DecodingKey::from_secret(key.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| {
            tracing::debug!("token validation failed: {}", e);
            FileServiceError::TokenInvalid
        })
    }
}
