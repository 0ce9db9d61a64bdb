//! Filesystem providers
//!
//! Providers abstract directory enumeration so that the recent-file scanner
//! can walk the local disk in production and a scripted tree in tests.

mod local;

pub use local::LocalProvider;

use crate::fs::FileEntry;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error type for provider operations
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("I/O error: {0}")]
    Io(io::Error),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    #[error("{0}")]
    Other(String),
}

impl From<io::Error> for ProviderError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => ProviderError::NotFound(err.to_string()),
            io::ErrorKind::PermissionDenied => ProviderError::PermissionDenied(err.to_string()),
            _ => ProviderError::Io(err),
        }
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Trait for filesystem providers
///
/// All paths are absolute local paths.
pub trait FileSystemProvider: Send + Sync {
    /// List the immediate children of a directory, unfiltered.
    /// Any error means the directory could not be enumerated.
    fn list_directory(&self, path: &Path) -> ProviderResult<Vec<FileEntry>>;

    /// Default starting directory (the user's home)
    fn home_path(&self) -> PathBuf;
}
