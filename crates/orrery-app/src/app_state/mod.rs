//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Owns the config, the window, and the frame driver.

mod core;
mod event_handler;
mod init;
mod polling;
mod render;

pub use core::OrreryApp;
