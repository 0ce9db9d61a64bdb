//! File entry representation

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Represents a single file or directory entry
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileEntry {
    /// File/directory name (not full path)
    pub name: String,
    /// Full path to the entry
    pub path: PathBuf,
    /// Whether this is a directory (follows symlinks)
    pub is_dir: bool,
    /// Whether this is a regular file (follows symlinks; false for dangling links)
    pub is_file: bool,
    /// File size in bytes (0 for directories)
    pub size: u64,
    /// Last modification time
    pub modified: Option<SystemTime>,
    /// Whether this is a hidden file (starts with '.')
    pub is_hidden: bool,
    /// Unix permission bits or Windows file attributes
    pub permissions: u32,
    /// Whether this is a symbolic link
    pub is_symlink: bool,
}

impl FileEntry {
    /// Create a FileEntry from a path
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let metadata = fs::symlink_metadata(path)?;
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        let is_symlink = metadata.is_symlink();

        // For symlinks, get the target's metadata for is_dir and size
        let target_metadata = if is_symlink {
            fs::metadata(path).ok()
        } else {
            Some(metadata.clone())
        };

        let is_dir = target_metadata
            .as_ref()
            .map(|m| m.is_dir())
            .unwrap_or(false);

        let is_file = target_metadata
            .as_ref()
            .map(|m| m.is_file())
            .unwrap_or(false);

        let size = if is_dir {
            0
        } else {
            target_metadata.as_ref().map(|m| m.len()).unwrap_or(0)
        };

        // A dangling link has no target time; fall back to the link's own
        let modified = target_metadata
            .as_ref()
            .and_then(|m| m.modified().ok())
            .or_else(|| metadata.modified().ok());

        #[cfg(unix)]
        let permissions = {
            use std::os::unix::fs::PermissionsExt;
            metadata.permissions().mode()
        };
        #[cfg(windows)]
        let permissions = {
            use std::os::windows::fs::MetadataExt;
            metadata.file_attributes()
        };
        #[cfg(not(any(unix, windows)))]
        let permissions = 0u32;

        Ok(Self {
            is_hidden: name.starts_with('.'),
            name,
            path: path.to_path_buf(),
            is_dir,
            is_file,
            size,
            modified,
            permissions,
            is_symlink,
        })
    }

    /// Get the file extension, if any
    pub fn extension(&self) -> Option<&str> {
        self.path.extension().and_then(|s| s.to_str())
    }

    /// Whether this entry is a file the archive viewer can open
    pub fn is_zip(&self) -> bool {
        !self.is_dir && crate::archive::is_zip_file(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_path_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, b"hello").unwrap();

        let entry = FileEntry::from_path(&path).unwrap();
        assert_eq!(entry.name, "notes.txt");
        assert!(!entry.is_dir);
        assert!(entry.is_file);
        assert_eq!(entry.size, 5);
        assert!(entry.modified.is_some());
        assert!(!entry.is_hidden);
        assert_eq!(entry.extension(), Some("txt"));
    }

    #[test]
    fn test_from_path_hidden_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".cache");
        fs::create_dir(&path).unwrap();

        let entry = FileEntry::from_path(&path).unwrap();
        assert!(entry.is_dir);
        assert!(!entry.is_file);
        assert!(entry.is_hidden);
        assert_eq!(entry.size, 0);
    }

    #[test]
    fn test_is_zip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Bundle.ZIP");
        fs::write(&path, b"").unwrap();
        assert!(FileEntry::from_path(&path).unwrap().is_zip());
    }

    #[test]
    fn test_missing_path_errors() {
        let dir = TempDir::new().unwrap();
        assert!(FileEntry::from_path(&dir.path().join("nope")).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_to_dir_follows_target() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("real");
        fs::create_dir(&target).unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let entry = FileEntry::from_path(&link).unwrap();
        assert!(entry.is_symlink);
        assert!(entry.is_dir);
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_not_a_file() {
        let dir = TempDir::new().unwrap();
        let link = dir.path().join("broken");
        std::os::unix::fs::symlink(dir.path().join("missing"), &link).unwrap();

        let entry = FileEntry::from_path(&link).unwrap();
        assert!(entry.is_symlink);
        assert!(!entry.is_file);
        assert!(!entry.is_dir);
        assert!(entry.modified.is_some());
    }
}
