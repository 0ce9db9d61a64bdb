//! fz - command-line front end for the filez core

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::atomic::AtomicBool;
use std::time::SystemTime;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use filez::archive::ArchiveView;
use filez::config::Config;
use filez::errors::{AppError, AppResult};
use filez::fs::{self as fsops, FileEntry, ListOptions};
use filez::providers::{FileSystemProvider, LocalProvider};
use filez::recent::{ClearStamp, RecentFiles, RecentSettings};
use filez::utils::{format_size, format_timestamp};

#[derive(Debug, Parser)]
#[command(name = "fz", version, about = "Browse files, recent changes and zip archives")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List a directory
    Ls {
        /// Directory to list (default: configured start directory)
        dir: Option<PathBuf>,
        /// Include hidden entries
        #[arg(short, long)]
        all: bool,
        /// Only show names matching a glob, e.g. "*.pdf"
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Show recently modified files
    Recent {
        /// Directory to scan (default: configured start directory)
        root: Option<PathBuf>,
        /// Look back this many days
        #[arg(long)]
        days: Option<u32>,
        /// Maximum number of files to show
        #[arg(long)]
        limit: Option<usize>,
        /// Clear the recent list instead of showing it
        #[arg(long)]
        clear: bool,
    },
    /// Inspect the contents of a zip archive
    Zip {
        archive: PathBuf,
        /// Directory inside the archive to list
        #[arg(long, default_value = "")]
        dir: String,
        /// Print the whole tree instead of one directory
        #[arg(long)]
        tree: bool,
    },
    /// Create an empty file
    Touch { dir: PathBuf, name: String },
    /// Create a directory
    Mkdir { dir: PathBuf, name: String },
    /// Rename a file or directory in place
    Rename { path: PathBuf, new_name: String },
    /// Delete a file or directory (recursively)
    Rm { path: PathBuf },
    /// Copy a file or directory
    Cp { src: PathBuf, dest: PathBuf },
    /// Print the effective configuration
    Config,
}

fn init_logging() {
    let debug_enabled = std::env::var("FILEZ_DEBUG_LOG")
        .map(|value| matches!(value.as_str(), "1" | "true" | "TRUE" | "yes" | "YES"))
        .unwrap_or(false);
    let filter = if debug_enabled {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    let config = Config::load();

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("fz: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, config: &Config) -> AppResult<()> {
    let provider = LocalProvider::new();

    match command {
        Command::Ls { dir, all, filter } => {
            let dir = dir.unwrap_or_else(|| config.start_dir(provider.home_path()));
            let options = ListOptions {
                show_hidden: all || config.general.show_hidden,
                filter,
            };
            let entries = fsops::read_directory(&dir, &options)?;
            if entries.is_empty() {
                println!("(empty)");
            }
            for entry in &entries {
                print_entry(entry, &entry.name);
            }
        }
        Command::Recent { root, days, limit, clear } => {
            let stamp = ClearStamp::default_location()
                .ok_or_else(|| AppError::Config("Could not determine config directory".into()))?;
            if clear {
                stamp.mark_cleared(SystemTime::now())?;
                println!("Recent files cleared");
                return Ok(());
            }

            let mut recent_config = config.recent.clone();
            if let Some(days) = days {
                recent_config.days_threshold = days;
            }
            if let Some(limit) = limit {
                recent_config.max_files = limit;
            }

            let root = root.unwrap_or_else(|| config.start_dir(provider.home_path()));
            let recent = RecentFiles::new(provider, RecentSettings::from(&recent_config))
                .with_clear_signal(stamp);
            let files = recent.recent_files(&root, &AtomicBool::new(false))?;
            if files.is_empty() {
                println!("No recent files");
            }
            for file in files.iter() {
                print_entry(&file.entry, &file.path().display().to_string());
            }
        }
        Command::Zip { archive, dir, tree } => {
            let view = ArchiveView::open(&archive)?;
            println!("{} ({} entries)", view.display_name(), view.len());
            if view.is_empty() {
                println!("(empty archive)");
            } else if tree {
                for node in view.nodes() {
                    let suffix = if node.is_directory { "/" } else { "" };
                    println!("{}{}{}", "  ".repeat(node.depth), node.name, suffix);
                }
            } else {
                if !dir.trim_matches('/').is_empty() && view.get(&dir).is_none() {
                    return Err(AppError::Archive(format!("No such directory in archive: {}", dir)));
                }
                for node in view.children(&dir) {
                    let kind = if node.is_directory { "<DIR>" } else { "" };
                    println!("{:>6}  {}", kind, node.name);
                }
            }
        }
        Command::Touch { dir, name } => {
            let path = fsops::create_file(&dir, &name)?;
            println!("Created {}", path.display());
        }
        Command::Mkdir { dir, name } => {
            let path = fsops::create_directory(&dir, &name)?;
            println!("Created {}", path.display());
        }
        Command::Rename { path, new_name } => {
            let target = fsops::rename_entry(&path, &new_name)?;
            println!("Renamed to {}", target.display());
        }
        Command::Rm { path } => {
            fsops::delete_path(&path)?;
            println!("Deleted {}", path.display());
        }
        Command::Cp { src, dest } => {
            copy_into(&src, &dest)?;
        }
        Command::Config => {
            let rendered = config
                .to_toml()
                .map_err(|e| AppError::Config(e.to_string()))?;
            print!("{}", rendered);
        }
    }

    Ok(())
}

/// Copy `src` to `dest`, or into `dest` when it is an existing directory
fn copy_into(src: &Path, dest: &Path) -> AppResult<()> {
    let target = if dest.is_dir() {
        let name = src
            .file_name()
            .ok_or_else(|| AppError::Operation(format!("Cannot copy {}", src.display())))?;
        dest.join(name)
    } else {
        dest.to_path_buf()
    };
    fsops::copy_path(src, &target)?;
    println!("Copied to {}", target.display());
    Ok(())
}

fn print_entry(entry: &FileEntry, label: &str) {
    let size = if entry.is_dir {
        "<DIR>".to_string()
    } else {
        format_size(entry.size)
    };
    println!(
        "{:>10}  {}  {}",
        size,
        format_timestamp(entry.modified),
        label
    );
}
