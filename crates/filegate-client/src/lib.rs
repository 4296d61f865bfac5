//! Filegate Client Library
//!
//! HTTP gateway to a remote file-service with purpose-scoped signed access
//! tokens. The [`TokenAuthority`] mints and verifies short-lived JWTs bound to
//! a user identity and a purpose (ordinary API access vs. shareable direct
//! links); the [`FileGateway`] translates typed file operations into
//! authenticated calls against the remote service.
//!
//! Construct one [`FileGateway`] at startup from a resolved
//! [`FileServiceConfig`] and pass it by reference to whatever needs file
//! operations, either directly or through the [`FileService`] trait.

pub mod gateway;
pub mod service;
pub mod token;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-export commonly used types
pub use gateway::FileGateway;
pub use service::FileService;
pub use token::{AuthClaims, TokenAuthority, TokenPurpose};

// Re-export core domain types for convenience
pub use filegate_core::{
    AccessTokenOptions, FileCred, FileEdit, FileRecord, FileServiceConfig, FileServiceError,
    FileStorage, FileUpload,
};
