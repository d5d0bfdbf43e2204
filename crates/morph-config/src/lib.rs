//! Morph configuration system.
//!
//! Centralized configuration, loaded from `morph.toml` with
//! environment-variable overrides merged on top. The main consumer is the
//! motion engine's time scale, read once at process start.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading configuration from disk.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct MorphConfig {
    /// Motion engine settings
    pub motion: MotionConfig,
}

/// Motion engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MotionConfig {
    /// Slow-motion multiplier applied uniformly to animation durations and
    /// delays. 1.0 in production; debug tooling may raise it.
    pub time_scale: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self { time_scale: 1.0 }
    }
}

impl MorphConfig {
    /// Load configuration from a TOML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration from `morph.toml` in the current directory, or
    /// return defaults if the file doesn't exist.
    pub fn load_or_default() -> Self {
        Self::load_from_file("morph.toml").unwrap_or_default()
    }

    /// Merge configuration with environment variables.
    ///
    /// Environment variables take precedence over configuration file values,
    /// allowing temporary overrides without modifying the config file.
    pub fn merge_with_env(&mut self) {
        if let Ok(val) = std::env::var("MORPH_TIME_SCALE") {
            if let Ok(scale) = val.parse::<f32>() {
                if scale > 0.0 {
                    self.motion.time_scale = scale;
                }
            }
        }
    }

    /// Load configuration with environment variable overrides:
    /// 1. Load from morph.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MorphConfig::default();
        assert_eq!(config.motion.time_scale, 1.0);
    }

    #[test]
    fn test_toml_serialization() {
        let config = MorphConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: MorphConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_toml() {
        let parsed: MorphConfig = toml::from_str("[motion]\ntime_scale = 4.0\n").unwrap();
        assert_eq!(parsed.motion.time_scale, 4.0);

        let parsed: MorphConfig = toml::from_str("").unwrap();
        assert_eq!(parsed, MorphConfig::default());
    }

    #[test]
    fn test_parse_error() {
        let err = toml::from_str::<MorphConfig>("motion = 3").unwrap_err();
        assert!(err.to_string().contains("motion"));
    }

    #[test]
    fn test_merge_with_env() {
        unsafe {
            std::env::set_var("MORPH_TIME_SCALE", "8.0");
        }

        let mut config = MorphConfig::default();
        config.merge_with_env();
        assert_eq!(config.motion.time_scale, 8.0);

        // Non-positive overrides are ignored.
        unsafe {
            std::env::set_var("MORPH_TIME_SCALE", "-1.0");
        }
        config.merge_with_env();
        assert_eq!(config.motion.time_scale, 8.0);

        unsafe {
            std::env::remove_var("MORPH_TIME_SCALE");
        }
    }
}
