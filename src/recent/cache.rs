//! Time-boxed cache in front of the recent-file scanner.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, SystemTime};

use super::scanner::{scan_recent_files, RecentFile, ScanLimits, ScanOutcome};
use crate::config::RecentConfig;
use crate::errors::{AppError, AppResult};
use crate::providers::FileSystemProvider;

/// Source of "now"
pub trait Clock: Send + Sync {
    fn now(&self) -> SystemTime;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn now(&self) -> SystemTime {
        (**self).now()
    }
}

/// When the user last asked for the recent list to be cleared
pub trait ClearSignal: Send + Sync {
    fn last_cleared(&self) -> Option<SystemTime>;
}

impl<T: ClearSignal + ?Sized> ClearSignal for Arc<T> {
    fn last_cleared(&self) -> Option<SystemTime> {
        (**self).last_cleared()
    }
}

/// In-memory clear signal
#[derive(Debug, Default)]
pub struct ClearMarker {
    cleared_at: Mutex<Option<SystemTime>>,
}

impl ClearMarker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_cleared(&self, at: SystemTime) {
        *self.cleared_at.lock().unwrap_or_else(PoisonError::into_inner) = Some(at);
    }
}

impl ClearSignal for ClearMarker {
    fn last_cleared(&self) -> Option<SystemTime> {
        *self.cleared_at.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Clear signal persisted as whole seconds since the Unix epoch in a small
/// file, so that it survives between runs of the command-line tool.
#[derive(Debug, Clone)]
pub struct ClearStamp {
    path: PathBuf,
}

impl ClearStamp {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/recent_cleared`
    pub fn default_location() -> Option<Self> {
        crate::config::config_dir().map(|dir| Self::new(dir.join("recent_cleared")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record a clear at `at`, rounded up to the next whole second so the
    /// stored time is never earlier than the real one.
    pub fn mark_cleared(&self, at: SystemTime) -> AppResult<()> {
        let since_epoch = at
            .duration_since(SystemTime::UNIX_EPOCH)
            .map_err(|e| AppError::Operation(e.to_string()))?;
        let secs = since_epoch.as_secs() + u64::from(since_epoch.subsec_nanos() > 0);
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, secs.to_string())?;
        Ok(())
    }
}

impl ClearSignal for ClearStamp {
    fn last_cleared(&self) -> Option<SystemTime> {
        let content = fs::read_to_string(&self.path).ok()?;
        match content.trim().parse::<u64>() {
            Ok(secs) => Some(SystemTime::UNIX_EPOCH + Duration::from_secs(secs)),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Ignoring malformed clear stamp");
                None
            }
        }
    }
}

/// A completed scan
#[derive(Debug, Clone)]
pub struct ScanCache {
    pub root: PathBuf,
    pub entries: Arc<Vec<RecentFile>>,
    /// When the walk finished
    pub captured_at: SystemTime,
}

impl ScanCache {
    /// Fresh for `window` after capture, unless cleared since.
    /// A clock that moved backwards counts as expired.
    pub fn is_valid(&self, now: SystemTime, last_cleared: Option<SystemTime>, window: Duration) -> bool {
        let fresh = match now.duration_since(self.captured_at) {
            Ok(age) => age < window,
            Err(_) => false,
        };
        let cleared_since = last_cleared.is_some_and(|cleared| cleared > self.captured_at);
        fresh && !cleared_since
    }
}

/// Tunables for [`RecentFiles`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentSettings {
    /// How far back a modification still counts as recent
    pub recent_window: Duration,
    pub max_results: usize,
    pub cache_validity: Duration,
    pub max_depth: usize,
    pub hidden_prefix: String,
}

impl Default for RecentSettings {
    fn default() -> Self {
        Self::from(&RecentConfig::default())
    }
}

impl From<&RecentConfig> for RecentSettings {
    fn from(config: &RecentConfig) -> Self {
        Self {
            recent_window: Duration::from_secs(u64::from(config.days_threshold) * 24 * 60 * 60),
            max_results: config.max_files,
            cache_validity: Duration::from_secs(config.cache_validity_secs),
            max_depth: config.max_depth,
            hidden_prefix: config.hidden_prefix.clone(),
        }
    }
}

impl RecentSettings {
    pub fn limits(&self) -> ScanLimits {
        ScanLimits {
            max_depth: self.max_depth,
            hidden_prefix: self.hidden_prefix.clone(),
            ..ScanLimits::with_max_results(self.max_results)
        }
    }
}

/// Recent-file lookups backed by a single cached scan.
///
/// The cache check, the rescan and the store happen under one lock, so
/// concurrent callers wait for an in-flight scan instead of starting their own.
pub struct RecentFiles<P, C = SystemClock, S = ClearMarker> {
    provider: P,
    clock: C,
    clear_signal: S,
    settings: RecentSettings,
    cache: Mutex<Option<ScanCache>>,
}

impl<P: FileSystemProvider> RecentFiles<P> {
    pub fn new(provider: P, settings: RecentSettings) -> Self {
        Self {
            provider,
            clock: SystemClock,
            clear_signal: ClearMarker::new(),
            settings,
            cache: Mutex::new(None),
        }
    }
}

impl<P, C, S> RecentFiles<P, C, S>
where
    P: FileSystemProvider,
    C: Clock,
    S: ClearSignal,
{
    pub fn with_clock<C2: Clock>(self, clock: C2) -> RecentFiles<P, C2, S> {
        RecentFiles {
            provider: self.provider,
            clock,
            clear_signal: self.clear_signal,
            settings: self.settings,
            cache: self.cache,
        }
    }

    pub fn with_clear_signal<S2: ClearSignal>(self, clear_signal: S2) -> RecentFiles<P, C, S2> {
        RecentFiles {
            provider: self.provider,
            clock: self.clock,
            clear_signal,
            settings: self.settings,
            cache: self.cache,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn clear_signal(&self) -> &S {
        &self.clear_signal
    }

    pub fn settings(&self) -> &RecentSettings {
        &self.settings
    }

    /// Recent files under `root`, from cache when still valid.
    ///
    /// A cancelled walk returns [`AppError::Cancelled`] and leaves the cache
    /// as it was.
    pub fn recent_files(&self, root: &Path, cancel: &AtomicBool) -> AppResult<Arc<Vec<RecentFile>>> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);

        let now = self.clock.now();
        if let Some(cached) = cache.as_ref()
            && cached.root == root
            && cached.is_valid(now, self.clear_signal.last_cleared(), self.settings.cache_validity)
        {
            tracing::debug!(root = %root.display(), files = cached.entries.len(), "Recent files served from cache");
            return Ok(Arc::clone(&cached.entries));
        }

        let cutoff = now
            .checked_sub(self.settings.recent_window)
            .unwrap_or(SystemTime::UNIX_EPOCH);
        tracing::debug!(root = %root.display(), "Recent file cache miss, scanning");

        match scan_recent_files(&self.provider, root, cutoff, &self.settings.limits(), cancel) {
            ScanOutcome::Completed(files) => {
                let entries = Arc::new(files);
                *cache = Some(ScanCache {
                    root: root.to_path_buf(),
                    entries: Arc::clone(&entries),
                    captured_at: self.clock.now(),
                });
                Ok(entries)
            }
            ScanOutcome::Cancelled => {
                tracing::debug!(root = %root.display(), "Recent file scan cancelled");
                Err(AppError::Cancelled)
            }
        }
    }

    /// Drop the cached scan
    pub fn invalidate(&self) {
        *self.cache.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
