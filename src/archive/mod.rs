//! Archive browsing logic
//!
//! Reads the entry names of a zip container (central directory only, no
//! decompression) and turns them into a navigable tree.

pub mod tree;

pub use tree::{build_entry_tree, ArchiveEntryNode};

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use crate::errors::{AppError, AppResult};

/// Supported archive containers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    Zip,
}

impl ArchiveKind {
    /// Detect archive kind from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_string_lossy().to_lowercase();
        match ext.as_str() {
            "zip" | "jar" | "war" | "apk" => Some(ArchiveKind::Zip),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ArchiveKind::Zip => "ZIP",
        }
    }
}

/// Check if a file looks like a zip archive by its extension
pub fn is_zip_file(path: &Path) -> bool {
    ArchiveKind::from_path(path) == Some(ArchiveKind::Zip)
}

/// Raw entry names of a zip archive, in central-directory order
pub fn list_zip_entries(path: &Path) -> AppResult<Vec<String>> {
    let file = File::open(path)?;
    read_zip_entries(BufReader::new(file))
}

/// Same as [`list_zip_entries`] for an already open reader
pub fn read_zip_entries<R: Read + Seek>(reader: R) -> AppResult<Vec<String>> {
    let mut archive = zip::ZipArchive::new(reader)?;

    let mut names = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        // Raw access skips decryption, so encrypted archives still list
        let file = archive.by_index_raw(i)?;
        names.push(file.name().to_string());
    }

    Ok(names)
}

/// A loaded archive: its name plus the rebuilt entry tree
#[derive(Debug, Clone)]
pub struct ArchiveView {
    display_name: String,
    nodes: Vec<ArchiveEntryNode>,
    index: HashMap<String, usize>,
}

impl ArchiveView {
    /// Open an archive file and build its tree
    pub fn open(path: &Path) -> AppResult<Self> {
        let kind = ArchiveKind::from_path(path)
            .ok_or_else(|| AppError::Archive(format!("Unknown archive type: {}", path.display())))?;

        let raw = match kind {
            ArchiveKind::Zip => list_zip_entries(path)?,
        };

        let archive_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Archive".to_string());

        tracing::debug!(archive = %path.display(), entries = raw.len(), "Read archive entries");
        Ok(Self::from_entries(format!("{} [{}]", archive_name, kind.display_name()), raw))
    }

    /// Build a view from entry names that were already read
    pub fn from_entries<I, S>(display_name: impl Into<String>, raw_entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let nodes = build_entry_tree(raw_entries);
        let index = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.path.clone(), i))
            .collect();
        Self {
            display_name: display_name.into(),
            nodes,
            index,
        }
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// All nodes, sorted by depth then path
    pub fn nodes(&self) -> &[ArchiveEntryNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node by path; leading/trailing '/' are ignored
    pub fn get(&self, path: &str) -> Option<&ArchiveEntryNode> {
        self.index
            .get(path.trim_matches('/'))
            .map(|&i| &self.nodes[i])
    }

    /// Immediate children of `dir_path` ("" for the archive root),
    /// directories first, then by name ignoring case
    pub fn children(&self, dir_path: &str) -> Vec<&ArchiveEntryNode> {
        let dir_path = dir_path.trim_matches('/');
        let mut children: Vec<&ArchiveEntryNode> = self
            .nodes
            .iter()
            .filter(|n| n.parent_path().unwrap_or("") == dir_path)
            .collect();

        children.sort_by(|a, b| match (a.is_directory, b.is_directory) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        });
        children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use std::path::PathBuf;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    fn zip_bytes(entries: &[&str]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        for name in entries {
            if name.ends_with('/') {
                writer.add_directory(*name, options).unwrap();
            } else {
                writer.start_file(*name, options).unwrap();
                writer.write_all(name.as_bytes()).unwrap();
            }
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_archive_kind_from_path() {
        assert_eq!(ArchiveKind::from_path(Path::new("a/b.ZIP")), Some(ArchiveKind::Zip));
        assert_eq!(ArchiveKind::from_path(Path::new("app.apk")), Some(ArchiveKind::Zip));
        assert_eq!(ArchiveKind::from_path(Path::new("notes.txt")), None);
        assert_eq!(ArchiveKind::from_path(Path::new("zip")), None);
        assert!(is_zip_file(Path::new("photos.zip")));
    }

    #[test]
    fn test_read_zip_entries_in_order() {
        let bytes = zip_bytes(&["b/", "b/two.txt", "a.txt"]);
        let names = read_zip_entries(Cursor::new(bytes)).unwrap();
        assert_eq!(names, vec!["b/", "b/two.txt", "a.txt"]);
    }

    #[test]
    fn test_read_zip_entries_rejects_garbage() {
        let err = read_zip_entries(Cursor::new(b"definitely not a zip".to_vec())).unwrap_err();
        assert!(matches!(err, AppError::Archive(_)));
    }

    #[test]
    fn test_open_builds_tree() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bundle.zip");
        std::fs::write(&path, zip_bytes(&["src/lib.rs", "src/bin/", "README.md"])).unwrap();

        let view = ArchiveView::open(&path).unwrap();
        assert_eq!(view.display_name(), "bundle.zip [ZIP]");
        let paths: Vec<&str> = view.nodes().iter().map(|n| n.path.as_str()).collect();
        assert_eq!(paths, vec!["README.md", "src", "src/bin", "src/lib.rs"]);
        assert!(view.get("src/").unwrap().is_directory);
    }

    #[test]
    fn test_open_rejects_unknown_type() {
        let err = ArchiveView::open(&PathBuf::from("notes.txt")).unwrap_err();
        assert!(matches!(err, AppError::Archive(_)));
    }

    #[test]
    fn test_open_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = ArchiveView::open(&dir.path().join("missing.zip")).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }

    #[test]
    fn test_children_navigation() {
        let view = ArchiveView::from_entries(
            "test",
            ["docs/b.md", "docs/A.md", "docs/img/x.png", "zz.txt", "Lib/"],
        );

        let root: Vec<&str> = view.children("").iter().map(|n| n.name.as_str()).collect();
        assert_eq!(root, vec!["docs", "Lib", "zz.txt"]);

        let docs: Vec<&str> = view.children("/docs/").iter().map(|n| n.name.as_str()).collect();
        assert_eq!(docs, vec!["img", "A.md", "b.md"]);

        assert!(view.children("zz.txt").is_empty());
        assert!(view.children("nowhere").is_empty());
    }

    #[test]
    fn test_empty_archive() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.zip");
        std::fs::write(&path, zip_bytes(&[])).unwrap();

        let view = ArchiveView::open(&path).unwrap();
        assert!(view.is_empty());
        assert_eq!(view.len(), 0);
    }
}
