//! Core config file watcher implementation.
//!
//! The `notify` callback runs on the watcher's own thread and only posts
//! into a `std::sync::mpsc` channel. The render loop drains that channel
//! at frame start through [`ConfigWatcher::poll_changed`].

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use orrery_common::ConfigError;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Quiet period after the last file event before a reload is signalled.
pub const DEBOUNCE: Duration = Duration::from_millis(500);

/// Watches a config file for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    rx: Receiver<()>,
    // Held for its Drop; dropping it stops the OS watch.
    _watcher: Option<RecommendedWatcher>,
    pending_since: Option<Instant>,
    disconnected: bool,
}

impl ConfigWatcher {
    /// Start watching `path`. The parent directory is watched so editors
    /// that save by rename are still seen.
    pub fn start(path: PathBuf) -> Result<Self, ConfigError> {
        if !path.exists() {
            warn!(
                "config file {} does not exist yet, will watch for creation",
                path.display()
            );
        }

        let watch_path = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let file_name = path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();

        let (tx, rx) = mpsc::channel();
        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| match result {
                Ok(event) => {
                    if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                        return;
                    }
                    let is_our_file = event
                        .paths
                        .iter()
                        .any(|p| p.file_name().map(|n| n == file_name).unwrap_or(false));
                    if is_our_file {
                        debug!("config file change detected");
                        let _ = tx.send(());
                    }
                }
                Err(e) => error!("file watcher error: {e}"),
            },
            notify::Config::default(),
        )
        .map_err(|e| ConfigError::WatchError(format!("failed to create watcher: {e}")))?;

        watcher
            .watch(&watch_path, RecursiveMode::NonRecursive)
            .map_err(|e| {
                ConfigError::WatchError(format!("failed to watch {}: {e}", watch_path.display()))
            })?;

        info!("watching config file {}", path.display());
        Ok(Self {
            path,
            rx,
            _watcher: Some(watcher),
            pending_since: None,
            disconnected: false,
        })
    }

    /// Build a watcher fed by an existing channel instead of the OS.
    pub fn from_channel(path: PathBuf, rx: Receiver<()>) -> Self {
        Self {
            path,
            rx,
            _watcher: None,
            pending_since: None,
            disconnected: false,
        }
    }

    /// Create a sender/watcher pair for driving reloads by hand.
    pub fn manual(path: PathBuf) -> (Sender<()>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, Self::from_channel(path, rx))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Drain pending file events. Returns `true` once the file has been
    /// quiet for [`DEBOUNCE`] after at least one change.
    pub fn poll_changed(&mut self) -> bool {
        self.poll_changed_at(Instant::now())
    }

    /// [`poll_changed`](Self::poll_changed) with an explicit clock.
    pub fn poll_changed_at(&mut self, now: Instant) -> bool {
        loop {
            match self.rx.try_recv() {
                Ok(()) => self.pending_since = Some(now),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.disconnected {
                        debug!("config watcher channel closed");
                        self.disconnected = true;
                    }
                    break;
                }
            }
        }

        match self.pending_since {
            Some(since) if now.saturating_duration_since(since) >= DEBOUNCE => {
                self.pending_since = None;
                info!("config file changed, reloading");
                true
            }
            _ => false,
        }
    }
}
