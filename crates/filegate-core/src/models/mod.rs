//! Data models for the file-service gateway
//!
//! These mirror the remote file-service's wire shapes. The remote service owns
//! and produces `FileRecord`; this side only deserializes it.

mod file;
mod storage;

pub use file::{FileCred, FileEdit, FileRecord, FileUpload};
pub use storage::FileStorage;
