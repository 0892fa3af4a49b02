//! Live config reload manager.
//!
//! Combines the file watcher with config loading so the render loop can
//! pick up edits to `config.toml` between frames.

mod manager;

#[cfg(test)]
mod tests;

pub use manager::ReloadManager;
