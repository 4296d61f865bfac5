//! Error types module
//!
//! All failures of the file-service gateway are unified under the
//! `FileServiceError` enum: configuration problems, token failures, and
//! remote-call failures.
//!
//! Remote-call variants name the operation's target (file name + user, or the
//! resource URL) and never carry the remote response body. Diagnostic detail
//! (status code, body text) is logged at the call site instead, so callers
//! only ever see a terse, non-sensitive message.

use thiserror::Error;

/// Errors produced by the token authority and the remote file gateway
#[derive(Debug, Error)]
pub enum FileServiceError {
    #[error("Invalid file service URL: {0}")]
    InvalidApiUrl(#[from] url::ParseError),

    #[error("Token signing failed: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    /// Deliberately generic: signature mismatch, tampering, and expiry all
    /// collapse into this one variant so the error carries no oracle about
    /// token structure.
    #[error("Token invalid")]
    TokenInvalid,

    #[error("Failed to create {name} for {user_id}")]
    CreateFailed { name: String, user_id: String },

    #[error("Failed to edit {name} for {user_id}")]
    EditFailed { name: String, user_id: String },

    #[error("Failed to download file {0}")]
    DownloadFailed(String),

    #[error("Failed to get info for file {0}")]
    InfoFailed(String),

    #[error("Failed to destroy file {0}")]
    DestroyFailed(String),

    /// Connection refused, DNS failure, timeout: propagated from the
    /// transport layer unmodified.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid response envelope: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    #[error("Invalid multipart field: {0}")]
    InvalidUpload(String),
}

/// Result type for file-service operations
pub type FileServiceResult<T> = Result<T, FileServiceError>;
