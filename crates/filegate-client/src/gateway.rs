//! Remote file gateway
//!
//! Translates typed file operations (create, edit, get, info, destroy,
//! direct-link) into authenticated HTTP calls against the remote
//! file-service. Every remote call is authenticated with a freshly minted
//! API-access token; direct links instead embed a direct-link token as a
//! query parameter so the holder needs no further credentials.
//!
//! The gateway is immutable after construction and safe to share across
//! concurrent callers. It does not retry, queue, or cache; each operation is
//! an independent request with its own token and outcome.

use bytes::Bytes;
use filegate_core::error::{FileServiceError, FileServiceResult};
use filegate_core::{FileCred, FileEdit, FileRecord, FileServiceConfig, FileUpload};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error};
use url::Url;

use crate::token::{TokenAuthority, TokenPurpose};

/// Success envelope returned by the remote service for record-producing calls
#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    result: FileRecord,
}

/// Gateway to the remote file-service
#[derive(Debug)]
pub struct FileGateway {
    client: Client,
    /// Base origin, guaranteed to end with `/` so joins append instead of
    /// replacing the last path segment
    api_url: Url,
    tokens: TokenAuthority,
}

impl FileGateway {
    /// Build a gateway from resolved configuration.
    ///
    /// Fails fast if `api_url` is not a syntactically valid URL. The URL is
    /// normalized to carry a trailing slash so that `file/{id}` resolves
    /// under the configured path rather than next to it.
    pub fn new(config: FileServiceConfig) -> FileServiceResult<Self> {
        let normalized = if config.api_url.ends_with('/') {
            config.api_url.clone()
        } else {
            format!("{}/", config.api_url)
        };
        let api_url = Url::parse(&normalized)?;

        let client = Client::builder().build()?;

        Ok(Self {
            client,
            api_url,
            tokens: TokenAuthority::new(config.file_access, config.file_access_link),
        })
    }

    /// Mint a token for `user_id` scoped to `purpose`.
    pub fn create_token(&self, user_id: &str, purpose: TokenPurpose) -> FileServiceResult<String> {
        self.tokens.create_token(user_id, purpose)
    }

    /// Verify a token under the secret for `purpose`.
    pub fn validate_token(
        &self,
        token: &str,
        purpose: TokenPurpose,
    ) -> FileServiceResult<crate::token::AuthClaims> {
        self.tokens.validate_token(token, purpose)
    }

    /// Resolve `file/{file_id}` (or `file/{file_id}/{subroute}`) against the
    /// base origin. Pure URL construction, no I/O.
    pub fn file_url(&self, file_id: &str, subroute: Option<&str>) -> FileServiceResult<Url> {
        let mut path = format!("file/{}", file_id);
        if let Some(subroute) = subroute {
            path.push('/');
            path.push_str(subroute);
        }
        Ok(self.api_url.join(&path)?)
    }

    /// Build a self-authenticating download URL: the file URL with a
    /// direct-link token for the credential's user in the `token` query
    /// parameter.
    pub fn direct_link(&self, cred: &FileCred) -> FileServiceResult<Url> {
        let mut url = self.file_url(&cred.file_id, None)?;
        let token = self
            .tokens
            .create_token(&cred.user_id, TokenPurpose::DirectLink)?;
        url.query_pairs_mut().append_pair("token", &token);
        Ok(url)
    }

    fn upload_form(&self, upload: &FileUpload) -> FileServiceResult<Form> {
        let mut form = Form::new();

        if let Some(public) = upload.public {
            form = form.text("public", public.to_string());
        }
        if let Some(storage) = upload.storage {
            form = form.text("storage", storage.to_string());
        }
        if let Some(file_type) = &upload.file_type {
            form = form.text("type", file_type.clone());
        }

        let mut part = Part::bytes(upload.data.to_vec()).file_name(upload.name.clone());
        if let Some(mime) = &upload.mime {
            part = part
                .mime_str(mime)
                .map_err(|e| FileServiceError::InvalidUpload(e.to_string()))?;
        }

        Ok(form.part("file", part))
    }

    /// Create a file on the remote service.
    ///
    /// POSTs a multipart body to `{base}file` with an API-access bearer token
    /// for the uploading user and returns the created record.
    pub async fn create(&self, upload: &FileUpload) -> FileServiceResult<FileRecord> {
        let url = self.api_url.join("file")?;
        let token = self
            .tokens
            .create_token(&upload.user_id, TokenPurpose::ApiAccess)?;

        debug!(url = %url, upload = ?upload, "creating file");

        let response = self
            .client
            .post(url.clone())
            .bearer_auth(&token)
            .multipart(self.upload_form(upload)?)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(
                url = %url,
                upload = ?upload,
                status = %status,
                response = %body,
                "failed to create file"
            );
            return Err(FileServiceError::CreateFailed {
                name: upload.name.clone(),
                user_id: upload.user_id.clone(),
            });
        }

        let envelope: ApiEnvelope = serde_json::from_str(&body)?;
        debug!(url = %url, id = %envelope.result.id, "created file");

        Ok(envelope.result)
    }

    /// Edit an existing file: same multipart body as [`create`](Self::create),
    /// PUT to `{base}file/{file_id}`.
    pub async fn edit(&self, edit: &FileEdit) -> FileServiceResult<FileRecord> {
        let url = self.file_url(&edit.file_id, None)?;
        let token = self
            .tokens
            .create_token(&edit.upload.user_id, TokenPurpose::ApiAccess)?;

        debug!(url = %url, upload = ?edit.upload, "editing file");

        let response = self
            .client
            .put(url.clone())
            .bearer_auth(&token)
            .multipart(self.upload_form(&edit.upload)?)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(
                url = %url,
                upload = ?edit.upload,
                status = %status,
                response = %body,
                "failed to edit file"
            );
            return Err(FileServiceError::EditFailed {
                name: edit.upload.name.clone(),
                user_id: edit.upload.user_id.clone(),
            });
        }

        let envelope: ApiEnvelope = serde_json::from_str(&body)?;
        debug!(url = %url, id = %envelope.result.id, "edited file");

        Ok(envelope.result)
    }

    /// Download a file's bytes from `{base}file/{file_id}`.
    pub async fn get(&self, cred: &FileCred) -> FileServiceResult<Bytes> {
        let url = self.file_url(&cred.file_id, None)?;
        let token = self
            .tokens
            .create_token(&cred.user_id, TokenPurpose::ApiAccess)?;

        debug!(url = %url, "downloading file");

        let response = self.client.get(url.clone()).bearer_auth(&token).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(url = %url, status = %status, response = %body, "failed to download file");
            return Err(FileServiceError::DownloadFailed(url.to_string()));
        }

        let data = response.bytes().await?;
        debug!(url = %url, bytes = data.len(), "downloaded file");

        Ok(data)
    }

    /// Fetch a file's record from `{base}file/{file_id}/info`.
    pub async fn info(&self, cred: &FileCred) -> FileServiceResult<FileRecord> {
        let url = self.file_url(&cred.file_id, Some("info"))?;
        let token = self
            .tokens
            .create_token(&cred.user_id, TokenPurpose::ApiAccess)?;

        debug!(url = %url, "fetching file info");

        let response = self.client.get(url.clone()).bearer_auth(&token).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(url = %url, status = %status, response = %body, "failed to fetch file info");
            return Err(FileServiceError::InfoFailed(url.to_string()));
        }

        let envelope: ApiEnvelope = serde_json::from_str(&body)?;
        debug!(url = %url, "fetched file info");

        Ok(envelope.result)
    }

    /// Delete a file via `DELETE {base}file/{file_id}`. Returns `true` on any
    /// 2xx status; the remote service owns deletion semantics entirely.
    pub async fn destroy(&self, cred: &FileCred) -> FileServiceResult<bool> {
        let url = self.file_url(&cred.file_id, None)?;
        let token = self
            .tokens
            .create_token(&cred.user_id, TokenPurpose::ApiAccess)?;

        debug!(url = %url, "destroying file");

        let response = self
            .client
            .delete(url.clone())
            .bearer_auth(&token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(url = %url, status = %status, response = %body, "failed to destroy file");
            return Err(FileServiceError::DestroyFailed(url.to_string()));
        }

        debug!(url = %url, "destroyed file");

        Ok(true)
    }
}
