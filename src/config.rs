//! Configuration management

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,
    /// Recent files settings
    pub recent: RecentConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Show hidden files (starting with .)
    pub show_hidden: bool,
    /// Directory to browse and scan when none is given (default: home)
    pub start_dir: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecentConfig {
    /// Files modified within this many days count as recent
    pub days_threshold: u32,
    /// Maximum number of recent files to show
    pub max_files: usize,
    /// How long a scan result is reused, in seconds
    pub cache_validity_secs: u64,
    /// How many directory levels below the root are scanned
    pub max_depth: usize,
    /// Directories starting with this prefix are not scanned
    pub hidden_prefix: String,
}

impl Default for RecentConfig {
    fn default() -> Self {
        Self {
            days_threshold: 7,
            max_files: 50,
            cache_validity_secs: 120,
            max_depth: 32,
            hidden_prefix: ".".to_string(),
        }
    }
}

/// Get the config directory path for the current platform
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        // Windows: %APPDATA%\filez
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("filez"))
    }

    #[cfg(not(target_os = "windows"))]
    {
        // XDG_CONFIG_HOME first, then ~/.config
        std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|p| PathBuf::from(p).join(".config")))
            .map(|p| p.join("filez"))
    }
}

/// Get the config file path; `FILEZ_CONFIG` overrides the default location
pub fn config_file() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("FILEZ_CONFIG") {
        return Some(PathBuf::from(path));
    }
    config_dir().map(|p| p.join("config.toml"))
}

/// Default config file content with comments
fn default_config() -> String {
    r##"# filez configuration

[general]
# Show hidden files (names starting with ".") in listings
show_hidden = false
# Directory used when no path is given (defaults to the home directory)
# start_dir = "/sdcard"

[recent]
# Files modified within this many days count as recent
days_threshold = 7
# Maximum number of recent files to show
max_files = 50
# Seconds a recent-files scan is reused before rescanning
cache_validity_secs = 120
# Directory levels below the root that are scanned
max_depth = 32
# Directories starting with this prefix are skipped
hidden_prefix = "."
"##
    .to_string()
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Self {
        let Some(config_path) = config_file() else {
            tracing::warn!("Could not determine config directory");
            return Config::default();
        };
        Self::load_from(&config_path)
    }

    /// Load configuration from `path`, creating a commented default file if
    /// it doesn't exist. Problems are logged and defaults are used.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            if let Some(dir) = path.parent()
                && let Err(e) = fs::create_dir_all(dir)
            {
                tracing::warn!(path = %dir.display(), error = %e, "Could not create config directory");
                return Config::default();
            }
            if let Err(e) = fs::write(path, default_config()) {
                tracing::warn!(path = %path.display(), error = %e, "Could not create config file");
                return Config::default();
            }
        }

        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "Could not parse config file, using defaults");
                Config::default()
            }),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Could not read config file");
                Config::default()
            }
        }
    }

    /// Parse TOML content; missing keys take their defaults
    pub fn parse(content: &str) -> Result<Self, toml_edit::de::Error> {
        toml_edit::de::from_str(content)
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String, toml_edit::ser::Error> {
        toml_edit::ser::to_string_pretty(self)
    }

    /// Directory to start from: configured `start_dir`, else `fallback`
    pub fn start_dir(&self, fallback: PathBuf) -> PathBuf {
        self.general
            .start_dir
            .as_ref()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_parses_to_defaults() {
        let parsed = Config::parse(&default_config()).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let parsed = Config::parse("[recent]\nmax_files = 10\n").unwrap();
        assert_eq!(parsed.recent.max_files, 10);
        assert_eq!(parsed.recent.days_threshold, 7);
        assert!(!parsed.general.show_hidden);
    }

    #[test]
    fn test_invalid_value_is_an_error() {
        assert!(Config::parse("[recent]\nmax_files = \"lots\"\n").is_err());
    }

    #[test]
    fn test_load_from_creates_default_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path);
        assert_eq!(config, Config::default());
        assert!(fs::read_to_string(&path).unwrap().contains("days_threshold = 7"));
    }

    #[test]
    fn test_load_from_malformed_falls_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[general\nshow_hidden = ").unwrap();

        assert_eq!(Config::load_from(&path), Config::default());
    }

    #[test]
    fn test_to_toml_round_trip() {
        let mut config = Config::default();
        config.general.show_hidden = true;
        config.general.start_dir = Some("/data".into());
        config.recent.days_threshold = 3;

        let rendered = config.to_toml().unwrap();
        assert_eq!(Config::parse(&rendered).unwrap(), config);
    }

    #[test]
    fn test_start_dir_fallback() {
        let mut config = Config::default();
        assert_eq!(config.start_dir(PathBuf::from("/home/u")), PathBuf::from("/home/u"));
        config.general.start_dir = Some("/sdcard".into());
        assert_eq!(config.start_dir(PathBuf::from("/home/u")), PathBuf::from("/sdcard"));
    }
}
