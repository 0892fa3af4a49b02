//! Headless single-frame rendering with the software backend.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use orrery_common::OrreryError;
use orrery_config::OrreryConfig;
use orrery_renderer::{
    Frame, FrameDriver, FrameOutcome, LiveParams, SelectiveBloomCompositor, SoftwareBackend,
};
use orrery_sim::{KinematicsUpdater, ManualClock};
use tracing::info;

use crate::solar_system;

/// Render the configured system as it looks `at_ms` milliseconds in.
pub fn render_snapshot(
    config: &OrreryConfig,
    at_ms: f64,
    width: u32,
    height: u32,
) -> Result<Frame, OrreryError> {
    let system = solar_system::build(config);
    let compositor = SelectiveBloomCompositor::with_size(SoftwareBackend::new(), width, height);
    let mut driver = FrameDriver::new(
        Box::new(ManualClock::new(at_ms)),
        system.registry,
        KinematicsUpdater::from_config(&config.orbit),
        system.scene,
        compositor,
        LiveParams::from_config(config),
    );

    match driver.tick().map_err(|e| OrreryError::Renderer(e.to_string()))? {
        FrameOutcome::Presented => Ok(driver.compositor().backend().output().clone()),
        FrameOutcome::Skipped => Err(OrreryError::Snapshot(format!(
            "frame skipped at {width}x{height}"
        ))),
    }
}

/// Encode `frame` as an 8-bit sRGB PNG.
pub fn write_png(path: &Path, frame: &Frame) -> Result<(), OrreryError> {
    let file = File::create(path)?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), frame.width(), frame.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder
        .write_header()
        .map_err(|e| OrreryError::Snapshot(e.to_string()))?;
    writer
        .write_image_data(&frame.to_srgb8())
        .map_err(|e| OrreryError::Snapshot(e.to_string()))?;
    Ok(())
}

pub fn run(
    config: &OrreryConfig,
    path: &Path,
    at_ms: f64,
    size: Option<(u32, u32)>,
) -> Result<(), OrreryError> {
    let (width, height) = size.unwrap_or((config.window.width, config.window.height));
    let frame = render_snapshot(config, at_ms, width, height)?;
    write_png(path, &frame)?;
    info!(path = %path.display(), width, height, at_ms, "snapshot written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(dir: &tempfile::TempDir) -> OrreryConfig {
        let mut config = OrreryConfig::default();
        config.assets.dir = dir.path().to_string_lossy().into_owned();
        config
    }

    #[test]
    fn snapshot_has_requested_size() {
        let dir = tempfile::tempdir().unwrap();
        let frame = render_snapshot(&config(&dir), 0.0, 96, 64).unwrap();
        assert_eq!(frame.width(), 96);
        assert_eq!(frame.height(), 64);
    }

    #[test]
    fn sun_is_visible_in_the_middle() {
        let dir = tempfile::tempdir().unwrap();
        let frame = render_snapshot(&config(&dir), 0.0, 96, 64).unwrap();
        let [r, g, _, _] = frame.get(48, 32);
        assert!(r > 0.5 && g > 0.2, "center pixel {r} {g}");
    }

    #[test]
    fn zero_size_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = render_snapshot(&config(&dir), 0.0, 0, 64).unwrap_err();
        assert!(matches!(err, OrreryError::Snapshot(_)));
    }

    #[test]
    fn png_round_trips_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        run(&config(&dir), &path, 1000.0, Some((40, 30))).unwrap();

        let decoder = png::Decoder::new(File::open(&path).unwrap());
        let reader = decoder.read_info().unwrap();
        let info = reader.info();
        assert_eq!((info.width, info.height), (40, 30));
        assert_eq!(info.color_type, png::ColorType::Rgba);
    }
}
