//! Signal filtering algorithms for smoothing pose estimates.
//!
//! Each smoothed channel (x, y, z position, fallback depth) owns one
//! independent scalar filter instance. Filters are never shared between
//! channels or between estimator instances.

/// Scalar Kalman filter for optimal state estimation
pub mod kalman;

/// Exponential filter for responsive smoothing
pub mod exponential;

use crate::error::{Error, Result};

/// Trait for scalar channel filters
pub trait ScalarFilter: Send {
    /// Feed one measurement, get the smoothed value
    fn filter(&mut self, measurement: f64) -> f64;

    /// Reset filter state
    fn reset(&mut self);

    /// Get filter name
    fn name(&self) -> &str;
}

/// No-op filter that passes measurements through unchanged
pub struct NoFilter;

impl ScalarFilter for NoFilter {
    fn filter(&mut self, measurement: f64) -> f64 {
        measurement
    }

    fn reset(&mut self) {}

    fn name(&self) -> &str {
        "NoFilter"
    }
}

/// Create a scalar filter by type name
pub fn create_filter(filter_type: &str) -> Result<Box<dyn ScalarFilter>> {
    match filter_type.to_lowercase().as_str() {
        "none" | "nofilter" => Ok(Box::new(NoFilter)),
        "kalman" => Ok(Box::new(kalman::KalmanFilter::default())),
        "exponential" => Ok(Box::new(exponential::ExponentialFilter::new(
            crate::constants::DEFAULT_EXPONENTIAL_ALPHA,
        )?)),
        _ => Err(Error::FilterError(format!(
            "Unknown filter type: {filter_type}"
        ))),
    }
}
