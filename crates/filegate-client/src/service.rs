//! File-service capability trait
//!
//! The eight named operations the host application consumes, behind one
//! trait so callers can hold a `&dyn FileService` without coupling to the
//! concrete gateway. Constructed once at startup and passed by reference; no
//! global registration.

use async_trait::async_trait;
use bytes::Bytes;
use filegate_core::error::FileServiceResult;
use filegate_core::{FileCred, FileEdit, FileRecord, FileUpload};
use url::Url;

use crate::gateway::FileGateway;
use crate::token::{AuthClaims, TokenPurpose};

/// Named file-service capabilities bound to one gateway instance
#[async_trait]
pub trait FileService: Send + Sync {
    /// Mint a purpose-scoped token for a user
    fn create_token(&self, user_id: &str, purpose: TokenPurpose) -> FileServiceResult<String>;

    /// Verify a token under the given purpose
    fn validate_token(&self, token: &str, purpose: TokenPurpose) -> FileServiceResult<AuthClaims>;

    /// Build a self-authenticating direct-download URL
    fn direct_link(&self, cred: &FileCred) -> FileServiceResult<Url>;

    /// Upload a new file
    async fn create(&self, upload: &FileUpload) -> FileServiceResult<FileRecord>;

    /// Replace an existing file's content/metadata
    async fn edit(&self, edit: &FileEdit) -> FileServiceResult<FileRecord>;

    /// Download a file's bytes
    async fn get(&self, cred: &FileCred) -> FileServiceResult<Bytes>;

    /// Fetch a file's record
    async fn info(&self, cred: &FileCred) -> FileServiceResult<FileRecord>;

    /// Delete a file; `true` on success
    async fn destroy(&self, cred: &FileCred) -> FileServiceResult<bool>;
}

#[async_trait]
impl FileService for FileGateway {
    fn create_token(&self, user_id: &str, purpose: TokenPurpose) -> FileServiceResult<String> {
        FileGateway::create_token(self, user_id, purpose)
    }

    fn validate_token(&self, token: &str, purpose: TokenPurpose) -> FileServiceResult<AuthClaims> {
        FileGateway::validate_token(self, token, purpose)
    }

    fn direct_link(&self, cred: &FileCred) -> FileServiceResult<Url> {
        FileGateway::direct_link(self, cred)
    }

    async fn create(&self, upload: &FileUpload) -> FileServiceResult<FileRecord> {
        FileGateway::create(self, upload).await
    }

    async fn edit(&self, edit: &FileEdit) -> FileServiceResult<FileRecord> {
        FileGateway::edit(self, edit).await
    }

    async fn get(&self, cred: &FileCred) -> FileServiceResult<Bytes> {
        FileGateway::get(self, cred).await
    }

    async fn info(&self, cred: &FileCred) -> FileServiceResult<FileRecord> {
        FileGateway::info(self, cred).await
    }

    async fn destroy(&self, cred: &FileCred) -> FileServiceResult<bool> {
        FileGateway::destroy(self, cred).await
    }
}
