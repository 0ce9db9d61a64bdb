//! Local filesystem provider

use std::path::{Path, PathBuf};

use crate::fs::FileEntry;
use super::{FileSystemProvider, ProviderResult};

/// Provider for local filesystem operations
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalProvider;

impl LocalProvider {
    /// Create a new local provider
    pub fn new() -> Self {
        Self
    }
}

impl FileSystemProvider for LocalProvider {
    fn list_directory(&self, path: &Path) -> ProviderResult<Vec<FileEntry>> {
        Ok(crate::fs::list_children(path)?)
    }

    fn home_path(&self) -> PathBuf {
        #[cfg(unix)]
        {
            std::env::var_os("HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("/"))
        }
        #[cfg(windows)]
        {
            std::env::var_os("USERPROFILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("C:\\"))
        }
        #[cfg(not(any(unix, windows)))]
        {
            PathBuf::from("/")
        }
    }
}
