//! Test doubles for the file-service capabilities
//!
//! `MockFileService` implements [`FileService`] from a partial set of
//! override closures. Operations without an override panic when invoked, so a
//! test that forgets to register the capability it exercises fails loudly
//! instead of silently succeeding.
//!
//! Only built for tests and under the `testing` feature.

use async_trait::async_trait;
use bytes::Bytes;
use filegate_core::error::FileServiceResult;
use filegate_core::{FileCred, FileEdit, FileRecord, FileUpload};
use url::Url;

use crate::service::FileService;
use crate::token::{AuthClaims, TokenPurpose};

type TokenFn = Box<dyn Fn(&str, TokenPurpose) -> FileServiceResult<String> + Send + Sync>;
type ValidateFn = Box<dyn Fn(&str, TokenPurpose) -> FileServiceResult<AuthClaims> + Send + Sync>;
type LinkFn = Box<dyn Fn(&FileCred) -> FileServiceResult<Url> + Send + Sync>;
type CreateFn = Box<dyn Fn(&FileUpload) -> FileServiceResult<FileRecord> + Send + Sync>;
type EditFn = Box<dyn Fn(&FileEdit) -> FileServiceResult<FileRecord> + Send + Sync>;
type GetFn = Box<dyn Fn(&FileCred) -> FileServiceResult<Bytes> + Send + Sync>;
type InfoFn = Box<dyn Fn(&FileCred) -> FileServiceResult<FileRecord> + Send + Sync>;
type DestroyFn = Box<dyn Fn(&FileCred) -> FileServiceResult<bool> + Send + Sync>;

/// Partial stand-in for the file-service capabilities
#[derive(Default)]
pub struct MockFileService {
    create_token_fn: Option<TokenFn>,
    validate_token_fn: Option<ValidateFn>,
    direct_link_fn: Option<LinkFn>,
    create_fn: Option<CreateFn>,
    edit_fn: Option<EditFn>,
    get_fn: Option<GetFn>,
    info_fn: Option<InfoFn>,
    destroy_fn: Option<DestroyFn>,
}

impl MockFileService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_create_token<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, TokenPurpose) -> FileServiceResult<String> + Send + Sync + 'static,
    {
        self.create_token_fn = Some(Box::new(f));
        self
    }

    pub fn with_validate_token<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, TokenPurpose) -> FileServiceResult<AuthClaims> + Send + Sync + 'static,
    {
        self.validate_token_fn = Some(Box::new(f));
        self
    }

    pub fn with_direct_link<F>(mut self, f: F) -> Self
    where
        F: Fn(&FileCred) -> FileServiceResult<Url> + Send + Sync + 'static,
    {
        self.direct_link_fn = Some(Box::new(f));
        self
    }

    pub fn with_create<F>(mut self, f: F) -> Self
    where
        F: Fn(&FileUpload) -> FileServiceResult<FileRecord> + Send + Sync + 'static,
    {
        self.create_fn = Some(Box::new(f));
        self
    }

    pub fn with_edit<F>(mut self, f: F) -> Self
    where
        F: Fn(&FileEdit) -> FileServiceResult<FileRecord> + Send + Sync + 'static,
    {
        self.edit_fn = Some(Box::new(f));
        self
    }

    pub fn with_get<F>(mut self, f: F) -> Self
    where
        F: Fn(&FileCred) -> FileServiceResult<Bytes> + Send + Sync + 'static,
    {
        self.get_fn = Some(Box::new(f));
        self
    }

    pub fn with_info<F>(mut self, f: F) -> Self
    where
        F: Fn(&FileCred) -> FileServiceResult<FileRecord> + Send + Sync + 'static,
    {
        self.info_fn = Some(Box::new(f));
        self
    }

    pub fn with_destroy<F>(mut self, f: F) -> Self
    where
        F: Fn(&FileCred) -> FileServiceResult<bool> + Send + Sync + 'static,
    {
        self.destroy_fn = Some(Box::new(f));
        self
    }
}

#[async_trait]
impl FileService for MockFileService {
    fn create_token(&self, user_id: &str, purpose: TokenPurpose) -> FileServiceResult<String> {
        let f = self
            .create_token_fn
            .as_ref()
            .expect("no mock registered for create_token");
        f(user_id, purpose)
    }

    fn validate_token(&self, token: &str, purpose: TokenPurpose) -> FileServiceResult<AuthClaims> {
        let f = self
            .validate_token_fn
            .as_ref()
            .expect("no mock registered for validate_token");
        f(token, purpose)
    }

    fn direct_link(&self, cred: &FileCred) -> FileServiceResult<Url> {
        let f = self
            .direct_link_fn
            .as_ref()
            .expect("no mock registered for direct_link");
        f(cred)
    }

    async fn create(&self, upload: &FileUpload) -> FileServiceResult<FileRecord> {
        let f = self
            .create_fn
            .as_ref()
            .expect("no mock registered for create");
        f(upload)
    }

    async fn edit(&self, edit: &FileEdit) -> FileServiceResult<FileRecord> {
        let f = self.edit_fn.as_ref().expect("no mock registered for edit");
        f(edit)
    }

    async fn get(&self, cred: &FileCred) -> FileServiceResult<Bytes> {
        let f = self.get_fn.as_ref().expect("no mock registered for get");
        f(cred)
    }

    async fn info(&self, cred: &FileCred) -> FileServiceResult<FileRecord> {
        let f = self.info_fn.as_ref().expect("no mock registered for info");
        f(cred)
    }

    async fn destroy(&self, cred: &FileCred) -> FileServiceResult<bool> {
        let f = self
            .destroy_fn
            .as_ref()
            .expect("no mock registered for destroy");
        f(cred)
    }
}
