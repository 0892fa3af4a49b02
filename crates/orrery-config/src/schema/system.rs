//! System configuration types: logging and asset locations.

use serde::{Deserialize, Serialize};

/// Log level.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// `tracing` filter directive for this level.
    pub fn directive(&self) -> &'static str {
        match self {
            LogLevel::Debug => "orrery=debug",
            LogLevel::Info => "orrery=info",
            LogLevel::Warning => "orrery=warn",
            LogLevel::Error => "orrery=error",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
        }
    }
}

/// Where textures are loaded from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Directory texture paths are resolved against.
    pub dir: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dir: "assets".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_directive() {
        assert_eq!(LogLevel::Debug.directive(), "orrery=debug");
        assert_eq!(LogLevel::default().directive(), "orrery=info");
    }

    #[test]
    fn log_level_uppercase_in_toml() {
        let l: LoggingConfig = toml::from_str("level = \"WARNING\"").unwrap();
        assert_eq!(l.level, LogLevel::Warning);
    }

    #[test]
    fn assets_dir_defaults_and_overrides() {
        assert_eq!(AssetsConfig::default().dir, "assets");
        let a: AssetsConfig = toml::from_str("dir = \"/opt/orrery/textures\"").unwrap();
        assert_eq!(a.dir, "/opt/orrery/textures");
    }
}
