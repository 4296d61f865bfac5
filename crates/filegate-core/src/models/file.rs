use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter, Result as FmtResult};

use super::storage::FileStorage;

/// A file as the remote service describes it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub ext: String,
    pub mime: String,
    /// Free-form type tag assigned by the uploader (e.g. "avatar", "report")
    #[serde(rename = "type")]
    pub file_type: String,
    pub public: bool,
    pub storage: FileStorage,
}

/// Payload for creating a file on the remote service
///
/// Optional fields are omitted from the multipart body entirely when unset;
/// the remote service applies its own defaults.
#[derive(Clone)]
pub struct FileUpload {
    pub user_id: String,
    /// Display name, used as the multipart filename
    pub name: String,
    pub public: Option<bool>,
    pub storage: Option<FileStorage>,
    pub file_type: Option<String>,
    pub mime: Option<String>,
    pub data: Bytes,
}

// Keep raw payload bytes out of logs; only their length is diagnostic.
impl Debug for FileUpload {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("FileUpload")
            .field("user_id", &self.user_id)
            .field("name", &self.name)
            .field("public", &self.public)
            .field("storage", &self.storage)
            .field("file_type", &self.file_type)
            .field("mime", &self.mime)
            .field("data_len", &self.data.len())
            .finish()
    }
}

/// Payload for editing an existing file: an upload plus the target file id
#[derive(Debug, Clone)]
pub struct FileEdit {
    pub file_id: String,
    pub upload: FileUpload,
}

/// Minimal addressing pair for fetch, info, destroy, and direct links
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCred {
    pub file_id: String,
    pub user_id: String,
}
