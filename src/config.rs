//! Configuration management for the pose estimator

use crate::constants::{
    DEFAULT_EXPONENTIAL_ALPHA, DEFAULT_FOV_DEGREES, DEFAULT_MEASUREMENT_NOISE,
    DEFAULT_PROCESS_NOISE,
};
use crate::error::{Error, Result};
use crate::filters::{exponential::ExponentialFilter, kalman::KalmanFilter, NoFilter, ScalarFilter};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Camera intrinsics configuration
    pub camera: CameraConfig,

    /// Estimation strategy configuration
    pub estimator: EstimatorConfig,

    /// Smoothing filter configuration
    pub filter: FilterConfig,
}

/// Camera parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f64,
}

/// Estimation strategy switches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Full P3P solve, or scale-only depth fallback when false
    pub use_p3p: bool,

    /// Smooth output channels with the configured filter
    pub use_kalman_filter: bool,
}

/// Smoothing filter parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Filter type: "kalman", "exponential" or "none"
    pub filter_type: String,

    /// Kalman process noise Q
    pub process_noise: f64,

    /// Kalman measurement noise R
    pub measurement_noise: f64,

    /// Exponential filter alpha
    pub exponential_alpha: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            estimator: EstimatorConfig::default(),
            filter: FilterConfig::default(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: DEFAULT_FOV_DEGREES,
        }
    }
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            use_p3p: true,
            use_kalman_filter: true,
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            filter_type: "kalman".to_string(),
            process_noise: DEFAULT_PROCESS_NOISE,
            measurement_noise: DEFAULT_MEASUREMENT_NOISE,
            exponential_alpha: DEFAULT_EXPONENTIAL_ALPHA,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error when serialization or the write fails.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Create one scalar filter instance from the filter section
    ///
    /// # Errors
    ///
    /// Returns `FilterError` for an unknown type or unusable parameters.
    pub fn create_filter(&self) -> Result<Box<dyn ScalarFilter>> {
        match self.filter.filter_type.as_str() {
            "kalman" => Ok(Box::new(KalmanFilter::new(
                self.filter.process_noise,
                self.filter.measurement_noise,
            )?)),
            "exponential" => Ok(Box::new(ExponentialFilter::new(
                self.filter.exponential_alpha,
            )?)),
            "none" => Ok(Box::new(NoFilter)),
            name => Err(Error::FilterError(format!("Unknown filter type: {name}"))),
        }
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if !(0.0 < self.camera.fov_degrees && self.camera.fov_degrees < 180.0) {
            return Err(Error::ConfigError(
                "Vertical FOV must be between 0 and 180 degrees".to_string(),
            ));
        }
        if self.filter.process_noise <= 0.0 {
            return Err(Error::ConfigError(
                "Process noise must be greater than 0".to_string(),
            ));
        }
        if self.filter.measurement_noise <= 0.0 {
            return Err(Error::ConfigError(
                "Measurement noise must be greater than 0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.filter.exponential_alpha)
            || self.filter.exponential_alpha == 0.0
        {
            return Err(Error::ConfigError(
                "Exponential alpha must be in (0, 1]".to_string(),
            ));
        }
        if !matches!(self.filter.filter_type.as_str(), "kalman" | "exponential" | "none") {
            return Err(Error::ConfigError(format!(
                "Unknown filter type: {}",
                self.filter.filter_type
            )));
        }
        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Face pose estimation configuration

# Camera intrinsics
camera:
  fov_degrees: 78.0

# Estimation strategy
estimator:
  use_p3p: true
  use_kalman_filter: true

# Smoothing filter
filter:
  filter_type: "kalman"
  process_noise: 0.01
  measurement_noise: 0.1
  exponential_alpha: 0.5
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_example_config_parses_and_validates() {
        let config: Config = serde_yaml::from_str(EXAMPLE_CONFIG).unwrap();
        assert!(config.validate().is_ok());
        assert!(config.estimator.use_p3p);
        assert_eq!(config.filter.filter_type, "kalman");
    }

    #[test]
    fn test_invalid_fov_rejected() {
        let mut config = Config::default();
        config.camera.fov_degrees = 200.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_noise_rejected() {
        let mut config = Config::default();
        config.filter.process_noise = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_filter_type_rejected() {
        let mut config = Config::default();
        config.filter.filter_type = "hampel".to_string();
        assert!(config.validate().is_err());
        assert!(config.create_filter().is_err());
    }

    #[test]
    fn test_create_filter_matches_type() {
        let mut config = Config::default();
        assert_eq!(config.create_filter().unwrap().name(), "KalmanFilter");
        config.filter.filter_type = "none".to_string();
        assert_eq!(config.create_filter().unwrap().name(), "NoFilter");
    }
}
