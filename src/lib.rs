//! filez - file browser core
//!
//! Directory listing and file operations, a cached recent-files scanner,
//! and zip inspection that rebuilds the archive's directory tree.

pub mod archive;
pub mod config;
pub mod errors;
pub mod fs;
pub mod providers;
pub mod recent;
pub mod utils;

pub use errors::{AppError, AppResult};
