//! Tests for the config file watcher.

use super::*;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[test]
fn watcher_start_with_missing_file_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let watcher = ConfigWatcher::start(dir.path().join("config.toml"));
    assert!(watcher.is_ok());
}

#[test]
fn watcher_start_with_existing_file_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "# test").unwrap();

    let watcher = ConfigWatcher::start(path.clone()).unwrap();
    assert_eq!(watcher.path(), path.as_path());
}

#[test]
fn no_events_means_no_change() {
    let (_tx, mut watcher) = ConfigWatcher::manual(PathBuf::from("config.toml"));
    assert!(!watcher.poll_changed_at(Instant::now()));
}

#[test]
fn change_is_reported_after_debounce() {
    let (tx, mut watcher) = ConfigWatcher::manual(PathBuf::from("config.toml"));
    let t0 = Instant::now();
    tx.send(()).unwrap();

    assert!(!watcher.poll_changed_at(t0));
    assert!(!watcher.poll_changed_at(t0 + Duration::from_millis(100)));
    assert!(watcher.poll_changed_at(t0 + DEBOUNCE));
    // Reported once only
    assert!(!watcher.poll_changed_at(t0 + DEBOUNCE * 2));
}

#[test]
fn burst_of_events_coalesces() {
    let (tx, mut watcher) = ConfigWatcher::manual(PathBuf::from("config.toml"));
    let t0 = Instant::now();
    tx.send(()).unwrap();
    assert!(!watcher.poll_changed_at(t0));

    let t1 = t0 + Duration::from_millis(400);
    tx.send(()).unwrap();
    tx.send(()).unwrap();
    assert!(!watcher.poll_changed_at(t1));

    // Quiet period restarts at the latest event
    assert!(!watcher.poll_changed_at(t0 + DEBOUNCE));
    assert!(watcher.poll_changed_at(t1 + DEBOUNCE));
}

#[test]
fn dropped_sender_does_not_panic() {
    let (tx, mut watcher) = ConfigWatcher::manual(PathBuf::from("config.toml"));
    drop(tx);
    assert!(!watcher.poll_changed_at(Instant::now()));
    assert!(!watcher.poll_changed_at(Instant::now()));
}
