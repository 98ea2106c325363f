mod loader;

use serde::{Deserialize, Serialize};
use std::path::Path;

pub use loader::load_config;

/// Renderer configuration, immutable for a run
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct DonutConfig {
    /// Output grid width in characters
    #[serde(default = "default_width")]
    pub width: usize,
    /// Output grid height in lines
    #[serde(default = "default_height")]
    pub height: usize,
    /// Tube radius
    #[serde(default = "default_r1")]
    pub r1: f64,
    /// Distance from the torus center to the tube center
    #[serde(default = "default_r2")]
    pub r2: f64,
    /// Projection scale
    #[serde(default = "default_k1")]
    pub k1: f64,
    /// Camera offset along the view axis, must exceed `r1 + r2`
    #[serde(default = "default_k2")]
    pub k2: f64,
    /// Per-frame increment of rotation angle A
    #[serde(default = "default_a_step")]
    pub a_step: f64,
    /// Per-frame increment of rotation angle B
    #[serde(default = "default_b_step")]
    pub b_step: f64,
    /// Sampling increment around the tube cross-section
    #[serde(default = "default_theta_step")]
    pub theta_step: f64,
    /// Sampling increment around the torus axis
    #[serde(default = "default_phi_step")]
    pub phi_step: f64,
    /// Character ramp, dimmest first
    #[serde(default = "default_shading")]
    pub shading: String,
    #[serde(default)]
    pub mode: RenderMode,
}

fn default_width() -> usize {
    80
}

fn default_height() -> usize {
    22
}

fn default_r1() -> f64 {
    1.0
}

fn default_r2() -> f64 {
    2.0
}

fn default_k1() -> f64 {
    30.0
}

fn default_k2() -> f64 {
    5.0
}

fn default_a_step() -> f64 {
    0.04
}

fn default_b_step() -> f64 {
    0.02
}

fn default_theta_step() -> f64 {
    0.07
}

fn default_phi_step() -> f64 {
    0.02
}

fn default_shading() -> String {
    crate::DEFAULT_SHADING.to_string()
}

impl Default for DonutConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            r1: default_r1(),
            r2: default_r2(),
            k1: default_k1(),
            k2: default_k2(),
            a_step: default_a_step(),
            b_step: default_b_step(),
            theta_step: default_theta_step(),
            phi_step: default_phi_step(),
            shading: default_shading(),
            mode: RenderMode::default(),
        }
    }
}

/// How the renderer obtains sin/cos of the sweep angles
///
/// - `Baseline`: evaluates sin/cos for every sample
/// - `Optimized`: looks them up in tables built once per renderer
///
/// Both modes walk the same accumulated angle sequence and produce identical frames.
#[derive(
    Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    #[default]
    Baseline,
    Optimized,
}

impl RenderMode {
    /// Returns true if sweep trig values are precomputed
    pub fn is_optimized(&self) -> bool {
        matches!(self, RenderMode::Optimized)
    }
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderMode::Baseline => write!(f, "baseline"),
            RenderMode::Optimized => write!(f, "optimized"),
        }
    }
}

impl DonutConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        load_config(path)
    }

    /// Load configuration from `path`, or fall back to defaults when no path is given
    pub fn load_or_default(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        match config_path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Shading ramp as characters; the ramp may hold multi-byte glyphs
    pub fn shading_chars(&self) -> Vec<char> {
        self.shading.chars().collect()
    }

    /// Check the invariants the renderer relies on.
    ///
    /// The renderer never checks these itself: a config with `k2 <= r1 + r2`
    /// lets the projection denominator reach zero, and an empty ramp leaves
    /// nothing to index.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Validation(format!(
                "width and height must be positive (got {}x{})",
                self.width, self.height
            )));
        }

        for (name, value) in [
            ("r1", self.r1),
            ("r2", self.r2),
            ("k1", self.k1),
            ("k2", self.k2),
            ("a_step", self.a_step),
            ("b_step", self.b_step),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::Validation(format!(
                    "{} must be finite (got {})",
                    name, value
                )));
            }
        }

        // r1 + r2 bounds |z| only for non-negative radii
        if self.r1 <= 0.0 || self.r2 < 0.0 {
            return Err(ConfigError::Validation(format!(
                "r1 must be positive and r2 non-negative (got r1={}, r2={})",
                self.r1, self.r2
            )));
        }

        if self.k2 <= self.r1 + self.r2 {
            return Err(ConfigError::Validation(format!(
                "k2 ({}) must be greater than r1 + r2 ({})",
                self.k2,
                self.r1 + self.r2
            )));
        }

        for (name, value) in [("theta_step", self.theta_step), ("phi_step", self.phi_step)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Validation(format!(
                    "{} must be a positive number (got {})",
                    name, value
                )));
            }
        }

        if self.shading.is_empty() {
            return Err(ConfigError::Validation(
                "shading ramp must contain at least one character".to_string(),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = DonutConfig::default();
        assert_eq!(config.width, 80);
        assert_eq!(config.height, 22);
        assert_eq!(config.shading, ".,-~:;=!*#$@");
        assert_eq!(config.mode, RenderMode::Baseline);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_camera_inside_torus() {
        let config = DonutConfig {
            k2: 3.0,
            ..DonutConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("k2"));
    }

    #[test]
    fn test_validate_rejects_negative_radii() {
        // The sum check alone would pass: -3 + 2 < 0.5
        let negative_tube = DonutConfig {
            r1: -3.0,
            r2: 2.0,
            k2: 0.5,
            ..DonutConfig::default()
        };
        let err = negative_tube.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("r1"));

        let negative_center = DonutConfig {
            r2: -2.0,
            k2: 0.5,
            ..DonutConfig::default()
        };
        assert!(negative_center.validate().is_err());

        let zero_tube = DonutConfig {
            r1: 0.0,
            ..DonutConfig::default()
        };
        assert!(zero_tube.validate().is_err());

        // A torus whose tube sits on the axis is still a valid shape
        let zero_center = DonutConfig {
            r2: 0.0,
            ..DonutConfig::default()
        };
        assert!(zero_center.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_shading() {
        let config = DonutConfig {
            shading: String::new(),
            ..DonutConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_rejects_non_positive_steps() {
        let zero_theta = DonutConfig {
            theta_step: 0.0,
            ..DonutConfig::default()
        };
        assert!(zero_theta.validate().is_err());

        let negative_phi = DonutConfig {
            phi_step: -0.02,
            ..DonutConfig::default()
        };
        assert!(negative_phi.validate().is_err());

        let nan_phi = DonutConfig {
            phi_step: f64::NAN,
            ..DonutConfig::default()
        };
        assert!(nan_phi.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_grid() {
        let config = DonutConfig {
            width: 0,
            ..DonutConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_shading_chars_counts_glyphs() {
        let config = DonutConfig {
            shading: "░▒▓█".to_string(),
            ..DonutConfig::default()
        };
        assert_eq!(config.shading_chars().len(), 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_render_mode_display() {
        assert_eq!(RenderMode::Baseline.to_string(), "baseline");
        assert_eq!(RenderMode::Optimized.to_string(), "optimized");
        assert!(RenderMode::Optimized.is_optimized());
        assert!(!RenderMode::Baseline.is_optimized());
    }

    #[test]
    fn test_load_or_default_without_path() {
        let config = DonutConfig::load_or_default(None).unwrap();
        assert_eq!(config, DonutConfig::default());
    }
}
