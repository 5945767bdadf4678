//! Face pose estimation library for real-time head tracking.
//!
//! This library recovers the 3D camera-relative position and orientation of
//! a face from 2D facial landmark detections using:
//! - An analytic closed-form solution to the Perspective-Three-Point (P3P)
//!   problem
//! - Distance-based disambiguation among the up-to-four candidate solutions
//! - Per-axis Kalman smoothing of the accepted position
//!
//! The landmark detector itself is an external collaborator: any source of
//! named keypoints with confidence scores works (the part names follow the
//! PoseNet convention).
//!
//! # Examples
//!
//! ## Basic usage
//!
//! ```
//! use face_pose::estimator::{EstimatorOptions, PoseEstimator, UpdateOutcome};
//! use face_pose::landmarks::{BodyPart, Keypoint, Pose};
//!
//! # fn main() -> face_pose::Result<()> {
//! let mut estimator = PoseEstimator::new(EstimatorOptions::default());
//! estimator.set_resolution(768.0, 1024.0)?;
//!
//! // One frame of detections from the landmark detector
//! let mut pose = Pose::new();
//! pose.insert(BodyPart::Nose, Keypoint::new(384.0, 420.0, 0.95));
//! pose.insert(BodyPart::LeftEye, Keypoint::new(300.0, 400.0, 0.9));
//! pose.insert(BodyPart::RightEye, Keypoint::new(468.0, 400.0, 0.9));
//!
//! let outcome = estimator.update(&pose)?;
//! if outcome == UpdateOutcome::Updated {
//!     let position = estimator.position();
//!     println!("Head at ({:.3}, {:.3}, {:.3}) m", position.x, position.y, position.z);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Fallback mode
//!
//! With `use_p3p: false` the estimator skips the geometric solve and derives
//! a scale-only depth from the eye (and shoulder) pixel separation, with
//! one-time focal-length self-calibration:
//!
//! ```
//! use face_pose::estimator::{EstimatorOptions, PoseEstimator};
//!
//! let options = EstimatorOptions { use_p3p: false, use_kalman_filter: true };
//! let mut estimator = PoseEstimator::new(options);
//! ```

/// Pinhole camera model and pixel-to-ray projection
pub mod camera;

/// Configuration management
pub mod config;

/// Constants used throughout the library
pub mod constants;

/// Scale-only fallback depth estimation
pub mod depth;

/// Error types and result handling
pub mod error;

/// Per-subject pose estimation orchestrator
pub mod estimator;

/// Signal filtering algorithms for smoothing pose estimates
pub mod filters;

/// Input data model: named keypoints and per-frame poses
pub mod landmarks;

/// Closed-form Perspective-Three-Point solver
pub mod p3p;

/// Quartic polynomial root extraction
pub mod quartic;

/// Disambiguation among P3P candidate solutions
pub mod selector;

pub use error::{Error, Result};
