//! Core reload manager implementation.

use crate::schema::OrreryConfig;
use crate::toml_loader;
use crate::validation;
use crate::watcher::ConfigWatcher;
use orrery_common::ConfigError;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Manages live config reloading.
///
/// Polled once per frame from the render thread; there is no background
/// task beyond the `notify` callback.
pub struct ReloadManager {
    config_path: PathBuf,
    watcher: Option<ConfigWatcher>,
}

impl ReloadManager {
    /// Load the initial config from `config_path` and start watching it.
    ///
    /// A missing or unparsable file yields defaults. A watcher that fails
    /// to start disables live reload but is not fatal.
    pub fn start(config_path: PathBuf) -> (OrreryConfig, Self) {
        let initial = match toml_loader::load_from_path(&config_path) {
            Ok(config) => config,
            Err(e) => {
                warn!("failed to load config: {e}, using defaults");
                OrreryConfig::default()
            }
        };

        let watcher = match ConfigWatcher::start(config_path.clone()) {
            Ok(w) => Some(w),
            Err(e) => {
                error!("failed to create config watcher: {e}");
                None
            }
        };

        (
            initial,
            Self {
                config_path,
                watcher,
            },
        )
    }

    /// Build a manager around an existing watcher.
    pub fn with_watcher(config_path: PathBuf, watcher: ConfigWatcher) -> Self {
        Self {
            config_path,
            watcher: Some(watcher),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Whether file changes are being observed.
    pub fn is_watching(&self) -> bool {
        self.watcher.is_some()
    }

    /// Returns a freshly loaded config if the file changed and the new
    /// contents parse and validate. Invalid edits are logged and ignored.
    pub fn poll(&mut self) -> Option<OrreryConfig> {
        let changed = self.watcher.as_mut().is_some_and(ConfigWatcher::poll_changed);
        if !changed {
            return None;
        }
        self.reload()
    }

    /// Force a reload regardless of watcher state.
    pub fn reload(&self) -> Option<OrreryConfig> {
        info!("reloading config from {}", self.config_path.display());
        match self.reload_config() {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("config reload failed: {e}");
                None
            }
        }
    }

    fn reload_config(&self) -> Result<OrreryConfig, ConfigError> {
        let config = toml_loader::load_from_path(&self.config_path)?;
        validation::validate(&config)?;
        Ok(config)
    }
}
