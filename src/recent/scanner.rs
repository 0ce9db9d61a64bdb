//! Bounded walk that collects recently modified files.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Instant, SystemTime};

use crate::fs::FileEntry;
use crate::providers::FileSystemProvider;

/// Cutoffs for a single walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanLimits {
    /// Files returned after sorting
    pub max_results: usize,
    /// The walk stops once more than this many candidates are collected
    pub candidate_limit: usize,
    /// Directories nested deeper than this below the root are not entered
    pub max_depth: usize,
    /// Directories whose name starts with this are not entered
    pub hidden_prefix: String,
}

impl Default for ScanLimits {
    fn default() -> Self {
        Self::with_max_results(50)
    }
}

impl ScanLimits {
    /// Limits for `max_results` files, with the candidate cap at twice that
    pub fn with_max_results(max_results: usize) -> Self {
        Self {
            max_results,
            candidate_limit: max_results.saturating_mul(2),
            max_depth: 32,
            hidden_prefix: ".".to_string(),
        }
    }

    fn is_hidden(&self, name: &str) -> bool {
        !self.hidden_prefix.is_empty() && name.starts_with(&self.hidden_prefix)
    }
}

/// A file found by the scanner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentFile {
    pub entry: FileEntry,
    pub modified: SystemTime,
}

impl RecentFile {
    pub fn path(&self) -> &Path {
        &self.entry.path
    }

    pub fn name(&self) -> &str {
        &self.entry.name
    }

    pub fn modified(&self) -> SystemTime {
        self.modified
    }
}

/// Result of a walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Sorted newest first, at most `max_results` long
    Completed(Vec<RecentFile>),
    /// The cancel flag was raised; partial results were dropped
    Cancelled,
}

/// Walk `root` and return files modified strictly after `cutoff`.
///
/// Directories that cannot be listed contribute nothing. Symlinked
/// directories are never entered, so the walk terminates without cycle
/// detection. `cancel` is polled before every directory and entry.
pub fn scan_recent_files<P>(
    provider: &P,
    root: &Path,
    cutoff: SystemTime,
    limits: &ScanLimits,
    cancel: &AtomicBool,
) -> ScanOutcome
where
    P: FileSystemProvider + ?Sized,
{
    let started = Instant::now();
    let mut candidates: Vec<RecentFile> = Vec::new();
    let mut stack: Vec<(PathBuf, usize)> = vec![(root.to_path_buf(), 0)];
    let mut visited = 0usize;

    'walk: while let Some((dir, depth)) = stack.pop() {
        if cancel.load(Ordering::Relaxed) {
            return ScanOutcome::Cancelled;
        }

        let children = match provider.list_directory(&dir) {
            Ok(children) => children,
            Err(e) => {
                tracing::debug!(path = %dir.display(), error = %e, "Skipping unreadable directory");
                continue;
            }
        };
        visited += 1;

        for child in children {
            if cancel.load(Ordering::Relaxed) {
                return ScanOutcome::Cancelled;
            }
            if candidates.len() > limits.candidate_limit {
                tracing::debug!(candidates = candidates.len(), "Candidate limit reached, stopping walk");
                break 'walk;
            }

            if child.is_dir {
                if child.is_symlink || limits.is_hidden(&child.name) || depth >= limits.max_depth {
                    continue;
                }
                stack.push((child.path.clone(), depth + 1));
            } else if child.is_file
                && let Some(modified) = child.modified
                && modified > cutoff
            {
                candidates.push(RecentFile { entry: child, modified });
            }
        }
    }

    let found = candidates.len();
    candidates.sort_by(|a, b| {
        b.modified
            .cmp(&a.modified)
            .then_with(|| a.entry.path.cmp(&b.entry.path))
    });
    candidates.truncate(limits.max_results);

    tracing::info!(
        root = %root.display(),
        directories = visited,
        candidates = found,
        kept = candidates.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Recent file scan complete"
    );

    ScanOutcome::Completed(candidates)
}
