//! Filesystem operations

use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use regex::Regex;

use super::entry::FileEntry;
use crate::errors::{AppError, AppResult};
use crate::utils::glob_to_regex;

/// Options controlling a directory listing
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Include entries whose name starts with '.'
    pub show_hidden: bool,
    /// Optional glob (`*`, `?`) matched case-insensitively against names
    pub filter: Option<String>,
}

/// Read directory contents and return a list of FileEntry.
///
/// Directories come first, then everything is ordered by name ignoring case.
pub fn read_directory(path: &Path, options: &ListOptions) -> io::Result<Vec<FileEntry>> {
    let matcher = options
        .filter
        .as_deref()
        .map(|pattern| Regex::new(&glob_to_regex(pattern, false)))
        .transpose()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let mut entries = Vec::new();

    for entry in list_children(path)? {
        if !options.show_hidden && entry.is_hidden {
            continue;
        }
        if let Some(re) = &matcher
            && !re.is_match(&entry.name)
        {
            continue;
        }
        entries.push(entry);
    }

    entries.sort_by(compare_entries);
    Ok(entries)
}

/// Immediate children of a directory, unfiltered and unsorted
pub fn list_children(path: &Path) -> io::Result<Vec<FileEntry>> {
    let children = fs::read_dir(path)?.map(|entry| entry.map(|e| e.path()));
    Ok(collect_entries(path, children))
}

/// Stat each child, skipping any that can't be read
fn collect_entries<I>(dir: &Path, children: I) -> Vec<FileEntry>
where
    I: IntoIterator<Item = io::Result<PathBuf>>,
{
    let mut entries = Vec::new();

    for child in children {
        let child = match child {
            Ok(child) => child,
            Err(e) => {
                tracing::debug!(path = %dir.display(), error = %e, "Skipping unreadable directory entry");
                continue;
            }
        };
        match FileEntry::from_path(&child) {
            Ok(file_entry) => entries.push(file_entry),
            Err(e) => {
                // Raced with a delete, or no permission to stat
                tracing::debug!(path = %child.display(), error = %e, "Skipping unreadable entry");
            }
        }
    }

    entries
}

fn compare_entries(a: &FileEntry, b: &FileEntry) -> Ordering {
    match (a.is_dir, b.is_dir) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a
            .name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name)),
    }
}

/// Check that `name` is usable as a single path component
pub fn validate_name(name: &str) -> AppResult<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || trimmed.contains('/')
        || trimmed.contains('\\')
        || trimmed.contains('\0')
    {
        return Err(AppError::InvalidName(name.to_string()));
    }
    Ok(trimmed)
}

/// Create a new empty file. Fails if something already exists at that name.
pub fn create_file(parent: &Path, name: &str) -> AppResult<PathBuf> {
    let path = parent.join(validate_name(name)?);
    match fs::OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(_) => {
            tracing::debug!(path = %path.display(), "Created file");
            Ok(path)
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            Err(AppError::AlreadyExists(path.display().to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Create a single new directory inside `parent`
pub fn create_directory(parent: &Path, name: &str) -> AppResult<PathBuf> {
    let path = parent.join(validate_name(name)?);
    match fs::create_dir(&path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "Created directory");
            Ok(path)
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            Err(AppError::AlreadyExists(path.display().to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Rename an entry in place (same parent directory)
pub fn rename_entry(path: &Path, new_name: &str) -> AppResult<PathBuf> {
    let new_name = validate_name(new_name)?;
    let current = path.file_name().map(|n| n.to_string_lossy());
    if current.as_deref() == Some(new_name) {
        return Err(AppError::InvalidName(new_name.to_string()));
    }

    let parent = path
        .parent()
        .ok_or_else(|| AppError::Operation(format!("Cannot rename {}", path.display())))?;
    let target = parent.join(new_name);
    if fs::symlink_metadata(&target).is_ok() {
        return Err(AppError::AlreadyExists(target.display().to_string()));
    }

    fs::rename(path, &target)?;
    tracing::debug!(from = %path.display(), to = %target.display(), "Renamed entry");
    Ok(target)
}

/// Delete a file or directory (directories recursively)
pub fn delete_path(path: &Path) -> AppResult<()> {
    let metadata = fs::symlink_metadata(path)?;
    // Never follow a link into its target when deleting
    if metadata.is_dir() {
        fs::remove_dir_all(path)?;
    } else {
        fs::remove_file(path)?;
    }
    tracing::debug!(path = %path.display(), "Deleted entry");
    Ok(())
}
