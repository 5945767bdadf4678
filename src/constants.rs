//! Constants used throughout the library

use nalgebra::Vector3;

/// Interpupillary distance in meters (anthropometric average)
pub const IPD_M: f64 = 0.063;

/// Shoulder width in meters (anthropometric average, fallback mode)
pub const SHOULDERS_M: f64 = 0.3;

/// Reference depth in meters used for one-time focal length calibration
pub const REF_Z_M: f64 = 0.5;

/// Minimum keypoint confidence for a frame to be processed
pub const MIN_KEYPOINT_SCORE: f64 = 0.5;

/// Default vertical field of view in degrees (typical webcam)
pub const DEFAULT_FOV_DEGREES: f64 = 78.0;

/// Default Kalman process noise
pub const DEFAULT_PROCESS_NOISE: f64 = 0.01;

/// Default Kalman measurement noise
pub const DEFAULT_MEASUREMENT_NOISE: f64 = 0.1;

/// Default exponential filter alpha
pub const DEFAULT_EXPONENTIAL_ALPHA: f64 = 0.5;

/// Numeric precision epsilon
pub const EPSILON: f64 = 1e-10;

/// A quartic root is treated as real when its imaginary part is below this
pub const REAL_ROOT_EPSILON: f64 = 1e-8;

/// Left eye center in the face-local frame (meters)
pub const LEFT_EYE_WORLD: Vector3<f64> = Vector3::new(-IPD_M / 2.0, 0.03175, -0.0254);

/// Right eye center in the face-local frame (meters)
pub const RIGHT_EYE_WORLD: Vector3<f64> = Vector3::new(IPD_M / 2.0, 0.03175, -0.0254);

/// Nose tip, origin of the face-local frame
pub const NOSE_WORLD: Vector3<f64> = Vector3::new(0.0, 0.0, 0.0);
