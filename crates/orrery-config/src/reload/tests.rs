//! Tests for the reload manager.

use super::*;
use crate::watcher::ConfigWatcher;
use std::path::PathBuf;

#[test]
fn start_with_nonexistent_path_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let (config, _manager) = ReloadManager::start(dir.path().join("config.toml"));
    assert_eq!(config.bodies.len(), 8);
    assert!((config.bloom.strength - 2.0).abs() < f32::EPSILON);
}

#[test]
fn start_with_valid_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[camera]\nposition = [0.0, 20.0, 40.0]\n").unwrap();

    let (config, manager) = ReloadManager::start(path.clone());
    assert_eq!(config.camera.position, [0.0, 20.0, 40.0]);
    assert_eq!(manager.config_path(), path.as_path());
}

#[test]
fn poll_without_changes_returns_none() {
    let (_tx, watcher) = ConfigWatcher::manual(PathBuf::from("/tmp/orrery_unused.toml"));
    let mut manager = ReloadManager::with_watcher(PathBuf::from("/tmp/orrery_unused.toml"), watcher);
    assert!(manager.poll().is_none());
}

#[test]
fn reload_reads_new_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[bloom]\nstrength = 1.0\n").unwrap();
    let (_tx, watcher) = ConfigWatcher::manual(path.clone());
    let manager = ReloadManager::with_watcher(path.clone(), watcher);

    std::fs::write(&path, "[bloom]\nstrength = 3.5\n").unwrap();
    let config = manager.reload().unwrap();
    assert!((config.bloom.strength - 3.5).abs() < f32::EPSILON);
}

#[test]
fn reload_ignores_invalid_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[bloom]\nthreshold = 4.0\n").unwrap();
    let (_tx, watcher) = ConfigWatcher::manual(path.clone());
    let manager = ReloadManager::with_watcher(path, watcher);

    assert!(manager.reload().is_none());
}

#[test]
fn reload_ignores_unparsable_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[bloom\nstrength = ").unwrap();
    let (_tx, watcher) = ConfigWatcher::manual(path.clone());
    let manager = ReloadManager::with_watcher(path, watcher);

    assert!(manager.reload().is_none());
}
