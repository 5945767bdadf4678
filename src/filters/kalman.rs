use super::ScalarFilter;
use crate::constants::{DEFAULT_MEASUREMENT_NOISE, DEFAULT_PROCESS_NOISE};
use crate::error::{Error, Result};

/// Scalar Kalman filter with a constant-state model.
///
/// The first measurement initializes the state; every later call runs one
/// predict/update step. Output is deterministic given the measurement
/// history and the (Q, R) noise parameters.
pub struct KalmanFilter {
    /// Process noise Q
    process_noise: f64,
    /// Measurement noise R
    measurement_noise: f64,
    /// State estimate; None until the first measurement
    state: Option<f64>,
    /// Estimate covariance
    covariance: f64,
}

impl KalmanFilter {
    /// Create a filter with the given process noise Q and measurement
    /// noise R.
    ///
    /// # Errors
    ///
    /// Returns `FilterError` unless both noise parameters are positive.
    pub fn new(process_noise: f64, measurement_noise: f64) -> Result<Self> {
        if process_noise <= 0.0 {
            return Err(Error::FilterError(
                "Process noise must be positive".to_string(),
            ));
        }
        if measurement_noise <= 0.0 {
            return Err(Error::FilterError(
                "Measurement noise must be positive".to_string(),
            ));
        }
        Ok(Self {
            process_noise,
            measurement_noise,
            state: None,
            covariance: 1.0,
        })
    }
}

impl Default for KalmanFilter {
    fn default() -> Self {
        Self {
            process_noise: DEFAULT_PROCESS_NOISE,
            measurement_noise: DEFAULT_MEASUREMENT_NOISE,
            state: None,
            covariance: 1.0,
        }
    }
}

impl ScalarFilter for KalmanFilter {
    fn filter(&mut self, measurement: f64) -> f64 {
        match self.state {
            None => {
                self.state = Some(measurement);
                self.covariance = self.measurement_noise;
                measurement
            }
            Some(state) => {
                // Predict: constant-state model, covariance grows by Q
                let predicted_covariance = self.covariance + self.process_noise;

                // Update
                let gain = predicted_covariance / (predicted_covariance + self.measurement_noise);
                let updated = state + gain * (measurement - state);
                self.state = Some(updated);
                self.covariance = (1.0 - gain) * predicted_covariance;
                updated
            }
        }
    }

    fn reset(&mut self) {
        self.state = None;
        self.covariance = 1.0;
    }

    fn name(&self) -> &str {
        "KalmanFilter"
    }
}
