//! Filesystem module

pub mod entry;
pub mod ops;
pub mod utils;

pub use entry::FileEntry;
pub use ops::{
    create_directory, create_file, delete_path, list_children, read_directory, rename_entry,
    ListOptions,
};
pub use utils::copy_path;
