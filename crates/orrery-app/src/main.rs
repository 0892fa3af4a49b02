mod app_state;
mod cli;
mod snapshot;
mod solar_system;

use std::path::PathBuf;

use orrery_config::{toml_loader, ReloadManager};
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

const DEFAULT_DIRECTIVE: &str = "orrery=info";

/// Explicit `--config`, else the platform path (created on first run).
fn resolve_config_path(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }
    match toml_loader::default_config_path() {
        Ok(path) => {
            if !path.exists() {
                if let Err(e) = toml_loader::create_default_config(&path) {
                    eprintln!("orrery: could not write default config: {e}");
                }
            }
            path
        }
        Err(e) => {
            eprintln!("orrery: {e}; using ./config.toml");
            PathBuf::from("config.toml")
        }
    }
}

fn main() {
    let args = cli::parse();
    let config_path = resolve_config_path(args.config.clone());

    // The subscriber has to exist before the config is loaded so load
    // warnings are visible, so peek at the level first.
    let log_directive = args.log_level.clone().unwrap_or_else(|| {
        toml_loader::load_from_path(&config_path)
            .map(|c| c.logging.level.directive().to_string())
            .unwrap_or_else(|_| DEFAULT_DIRECTIVE.to_string())
    });
    let directive: Directive = log_directive.parse().unwrap_or_else(|_| {
        eprintln!("orrery: bad log directive `{log_directive}`, using `info`");
        Directive::from(LevelFilter::INFO)
    });
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .init();

    tracing::info!("Orrery v{} starting...", env!("CARGO_PKG_VERSION"));
    tracing::info!("Using config {}", config_path.display());

    let (config, reload) = ReloadManager::start(config_path);

    if let Some(ref path) = args.snapshot {
        if let Err(e) = snapshot::run(&config, path, args.at_ms, args.size) {
            tracing::error!("Snapshot failed: {e}");
            std::process::exit(1);
        }
        return;
    }

    let event_loop = match EventLoop::new() {
        Ok(el) => el,
        Err(e) => {
            tracing::error!("Failed to create event loop: {e}");
            std::process::exit(1);
        }
    };

    let mut app = app_state::OrreryApp::new(config, reload);
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("Event loop error: {e}");
        std::process::exit(1);
    }

    tracing::info!("Orrery exited cleanly");
}
