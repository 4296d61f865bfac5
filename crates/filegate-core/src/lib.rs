//! Filegate Core Library
//!
//! This crate provides the domain models, error types, and configuration
//! shared across the filegate components.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{AccessTokenOptions, FileServiceConfig};
pub use error::FileServiceError;
pub use models::{FileCred, FileEdit, FileRecord, FileStorage, FileUpload};
