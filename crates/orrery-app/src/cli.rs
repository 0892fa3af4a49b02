use std::path::PathBuf;

use clap::Parser;

/// Orrery: an animated solar system with selective bloom.
#[derive(Parser, Debug)]
#[command(name = "orrery", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log filter directive override (e.g. `orrery=debug`).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Render a single frame on the CPU, write it to this PNG, and exit.
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Elapsed milliseconds for the snapshot frame.
    #[arg(long, default_value_t = 0.0, requires = "snapshot")]
    pub at_ms: f64,

    /// Snapshot size as WIDTHxHEIGHT. Defaults to the configured window size.
    #[arg(long, value_parser = parse_size, requires = "snapshot")]
    pub size: Option<(u32, u32)>,
}

pub fn parse() -> Args {
    Args::parse()
}

/// Parse `1280x800`.
pub fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got `{s}`"))?;
    let width: u32 = w.trim().parse().map_err(|e| format!("bad width `{w}`: {e}"))?;
    let height: u32 = h.trim().parse().map_err(|e| format!("bad height `{h}`: {e}"))?;
    if width == 0 || height == 0 {
        return Err(format!("size must be non-zero, got {width}x{height}"));
    }
    Ok((width, height))
}
