//! Configuration module
//!
//! Resolved options for the file-service gateway. Loaded once at process start
//! via [`FileServiceConfig::from_env`] and passed by value to whatever
//! constructs the gateway; never mutated afterwards.

use anyhow::Context;
use std::env;

/// Per-purpose token signing options
#[derive(Clone, Debug)]
pub struct AccessTokenOptions {
    /// Opaque HMAC signing key
    pub secret: String,
    /// Token lifetime in milliseconds; the token authority applies the
    /// purpose's default when unset
    pub expired_ms: Option<i64>,
}

/// Resolved gateway configuration
///
/// `api_url` is the remote file-service origin. The two token option sets are
/// independent: one for ordinary API access, one for shareable direct links.
#[derive(Clone, Debug)]
pub struct FileServiceConfig {
    pub api_url: String,
    pub file_access: AccessTokenOptions,
    pub file_access_link: AccessTokenOptions,
}

impl FileServiceConfig {
    /// Load configuration from the environment (and `.env` if present).
    ///
    /// Required: `FILE_SERVICE_URL`, `AUTH_JWT_FILESERVICE_SECRET`,
    /// `AUTH_JWT_FILESERVICELINK_SECRET`.
    /// Optional lifetimes (milliseconds): `AUTH_JWT_FILESERVICE_LIFETIME`,
    /// `AUTH_JWT_FILESERVICELINK_LIFETIME`.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let api_url = env::var("FILE_SERVICE_URL").context("FILE_SERVICE_URL must be set")?;

        let file_access = AccessTokenOptions {
            secret: env::var("AUTH_JWT_FILESERVICE_SECRET")
                .context("AUTH_JWT_FILESERVICE_SECRET must be set")?,
            expired_ms: parse_lifetime("AUTH_JWT_FILESERVICE_LIFETIME")?,
        };

        let file_access_link = AccessTokenOptions {
            secret: env::var("AUTH_JWT_FILESERVICELINK_SECRET")
                .context("AUTH_JWT_FILESERVICELINK_SECRET must be set")?,
            expired_ms: parse_lifetime("AUTH_JWT_FILESERVICELINK_LIFETIME")?,
        };

        Ok(Self {
            api_url,
            file_access,
            file_access_link,
        })
    }
}

fn parse_lifetime(var: &str) -> Result<Option<i64>, anyhow::Error> {
    match env::var(var) {
        Ok(raw) if !raw.trim().is_empty() => {
            let ms = raw
                .trim()
                .parse::<i64>()
                .with_context(|| format!("{} must be a number of milliseconds", var))?;
            Ok(Some(ms))
        }
        _ => Ok(None),
    }
}
