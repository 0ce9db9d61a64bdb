//! Recently modified files
//!
//! [`scanner`] walks a directory tree for files changed inside a time
//! window; [`cache`] keeps the last result for a short while so repeated
//! requests do not rescan the disk.

pub mod cache;
pub mod scanner;

pub use cache::{
    ClearMarker, ClearSignal, ClearStamp, Clock, RecentFiles, RecentSettings, ScanCache,
    SystemClock,
};
pub use scanner::{scan_recent_files, RecentFile, ScanLimits, ScanOutcome};
