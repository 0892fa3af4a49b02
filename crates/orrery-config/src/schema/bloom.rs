//! Bloom post-processing configuration types.

use serde::{Deserialize, Serialize};

/// How the bloom chain is fed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BloomMode {
    /// Only bloom-layer renderables glow; everything else is blacked out
    /// for the bright pass.
    #[default]
    Selective,
    /// The whole scene feeds the bloom chain.
    Global,
    /// No bright pass; the combine adds nothing.
    Off,
}

/// Bloom settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BloomConfig {
    pub mode: BloomMode,
    /// Weight of the bloom contribution in the combine pass (valid range: 0.0-10.0).
    pub strength: f32,
    /// Blur spread (valid range: 0.0-1.0).
    pub radius: f32,
    /// Luminance cut-off applied before blurring (valid range: 0.0-1.0).
    pub threshold: f32,
    /// Number of blur iterations (valid range: 1-5).
    pub passes: u32,
}

impl Default for BloomConfig {
    fn default() -> Self {
        Self {
            mode: BloomMode::Selective,
            strength: 2.0,
            radius: 0.1,
            threshold: 0.1,
            passes: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bloom_defaults() {
        let b = BloomConfig::default();
        assert_eq!(b.mode, BloomMode::Selective);
        assert!((b.strength - 2.0).abs() < f32::EPSILON);
        assert!((b.radius - 0.1).abs() < f32::EPSILON);
        assert!((b.threshold - 0.1).abs() < f32::EPSILON);
        assert_eq!(b.passes, 2);
    }

    #[test]
    fn bloom_mode_lowercase_in_toml() {
        let b: BloomConfig = toml::from_str("mode = \"global\"").unwrap();
        assert_eq!(b.mode, BloomMode::Global);
        let b: BloomConfig = toml::from_str("mode = \"off\"").unwrap();
        assert_eq!(b.mode, BloomMode::Off);
    }

    #[test]
    fn bloom_unknown_mode_is_error() {
        assert!(toml::from_str::<BloomConfig>("mode = \"everything\"").is_err());
    }
}
