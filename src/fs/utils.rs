use std::fs;
use std::io;
use std::path::Path;

use crate::errors::{AppError, AppResult};

/// Preserve file attributes (permissions, modification time) from src to dest.
/// Errors are ignored since the file data is already written.
fn preserve_attributes(src: &Path, dest: &Path) {
    if let Ok(meta) = fs::metadata(src) {
        if let Ok(mtime) = meta.modified() {
            let _ = filetime::set_file_mtime(dest, filetime::FileTime::from_system_time(mtime));
        }
        #[cfg(unix)]
        {
            let _ = fs::set_permissions(dest, meta.permissions());
        }
    }
}

/// Copy a file or directory recursively, preserving attributes.
///
/// Refuses to overwrite an existing destination or to copy a directory into
/// itself. Symbolic links are recreated, never followed. If the copy fails
/// part way, whatever was created at `dest` is removed again.
pub fn copy_path(src: &Path, dest: &Path) -> AppResult<()> {
    if fs::symlink_metadata(dest).is_ok() {
        return Err(AppError::AlreadyExists(dest.display().to_string()));
    }
    if copies_into_itself(src, dest)? {
        return Err(AppError::Operation(format!(
            "Cannot copy {} into itself",
            src.display()
        )));
    }

    if let Err(e) = copy_entry(src, dest) {
        // Clean up the partial copy
        let cleanup = match fs::symlink_metadata(dest) {
            Ok(meta) if meta.is_dir() => fs::remove_dir_all(dest),
            Ok(_) => fs::remove_file(dest),
            Err(_) => Ok(()),
        };
        if let Err(cleanup_err) = cleanup {
            tracing::warn!(path = %dest.display(), error = %cleanup_err, "Could not remove partial copy");
        }
        return Err(e.into());
    }
    Ok(())
}

/// Whether `dest` resolves to `src` or somewhere below it
fn copies_into_itself(src: &Path, dest: &Path) -> io::Result<bool> {
    let src = fs::canonicalize(src)?;
    let parent = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let dest = match dest.file_name() {
        Some(name) => fs::canonicalize(parent)?.join(name),
        None => fs::canonicalize(dest)?,
    };
    Ok(dest.starts_with(&src))
}

fn copy_entry(src: &Path, dest: &Path) -> io::Result<()> {
    let file_type = fs::symlink_metadata(src)?.file_type();
    if file_type.is_symlink() {
        copy_symlink(src, dest)
    } else if file_type.is_dir() {
        copy_dir_recursive(src, dest)
    } else {
        fs::copy(src, dest)?;
        preserve_attributes(src, dest);
        Ok(())
    }
}

/// Copy a directory recursively, preserving attributes
fn copy_dir_recursive(src: &Path, dest: &Path) -> io::Result<()> {
    fs::create_dir(dest)?;

    for entry in fs::read_dir(src)? {
        let entry = entry?;
        copy_entry(&entry.path(), &dest.join(entry.file_name()))?;
    }

    // Done last so mtime isn't changed by creating children
    preserve_attributes(src, dest);

    Ok(())
}

#[cfg(unix)]
fn copy_symlink(src: &Path, dest: &Path) -> io::Result<()> {
    let target = fs::read_link(src)?;
    std::os::unix::fs::symlink(target, dest)
}

#[cfg(windows)]
fn copy_symlink(src: &Path, dest: &Path) -> io::Result<()> {
    let target = fs::read_link(src)?;
    if fs::metadata(src).map(|m| m.is_dir()).unwrap_or(false) {
        std::os::windows::fs::symlink_dir(target, dest)
    } else {
        std::os::windows::fs::symlink_file(target, dest)
    }
}

#[cfg(not(any(unix, windows)))]
fn copy_symlink(src: &Path, dest: &Path) -> io::Result<()> {
    // No links here; copy a file target, leave directory links alone
    if fs::metadata(src)?.is_file() {
        fs::copy(src, dest)?;
    }
    Ok(())
}
