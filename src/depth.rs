//! Scale-only depth estimation, the fallback when the full P3P path is
//! disabled.
//!
//! Depth follows from similar triangles: a known real-world distance
//! (interpupillary or shoulder width) observed at a pixel distance `d`
//! gives `z = f * real / d`. The focal length `f` is self-calibrated once
//! from the first frame, assuming the subject starts at a reference depth.

use crate::constants::{EPSILON, IPD_M, MIN_KEYPOINT_SCORE, REF_Z_M, SHOULDERS_M};
use crate::landmarks::Keypoint;
use nalgebra::Vector2;

/// Monocular depth-from-scale estimator with one-time focal calibration
#[derive(Debug, Clone, Default)]
pub struct SimplifiedDepthEstimator {
    calibrated: bool,
    focal_px: f64,
}

impl SimplifiedDepthEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the focal length has been calibrated
    pub fn is_calibrated(&self) -> bool {
        self.calibrated
    }

    /// Calibrated focal length in pixels, zero before calibration
    pub fn focal_px(&self) -> f64 {
        self.focal_px
    }

    /// Drop the calibration, forcing recalibration on the next frame
    pub fn reset(&mut self) {
        self.calibrated = false;
        self.focal_px = 0.0;
    }

    /// Estimate depth in meters from eye (and optionally shoulder)
    /// keypoints. `previous_depth` is the last smoothed depth; it drives
    /// the eye/shoulder blend, which favors shoulders as the subject moves
    /// away and eye separation loses pixel resolution.
    ///
    /// Returns `None` when the eye separation is too small to divide by.
    pub fn estimate(
        &mut self,
        left_eye: &Keypoint,
        right_eye: &Keypoint,
        left_shoulder: Option<&Keypoint>,
        right_shoulder: Option<&Keypoint>,
        previous_depth: f64,
    ) -> Option<f64> {
        let left = Vector2::new(left_eye.x, left_eye.y);
        let right = Vector2::new(right_eye.x, right_eye.y);
        let mid = (left + right) / 2.0;
        let ipd_px = (left - mid).norm() + (right - mid).norm();

        if ipd_px < EPSILON {
            log::debug!("Eye separation {ipd_px} px too small for depth estimation");
            return None;
        }

        if !self.calibrated {
            self.focal_px = REF_Z_M * ipd_px / IPD_M;
            self.calibrated = true;
            log::info!("Calibrated focal length: {:.1} px", self.focal_px);
        }

        let mut depth = self.focal_px * IPD_M / ipd_px;

        if let (Some(ls), Some(rs)) = (left_shoulder, right_shoulder) {
            if ls.score >= MIN_KEYPOINT_SCORE && rs.score >= MIN_KEYPOINT_SCORE {
                let shoulders_px = Vector2::new(ls.x - rs.x, ls.y - rs.y).norm();
                if shoulders_px > EPSILON {
                    let shoulder_depth = self.focal_px * SHOULDERS_M / shoulders_px;
                    let ratio = (previous_depth / 2.0).min(1.0);
                    depth = (1.0 - ratio) * depth + ratio * shoulder_depth;
                }
            }
        }

        Some(depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kp(x: f64, y: f64, score: f64) -> Keypoint {
        Keypoint::new(x, y, score)
    }

    #[test]
    fn test_first_frame_calibrates_to_reference_depth() {
        let mut estimator = SimplifiedDepthEstimator::new();
        let depth = estimator
            .estimate(&kp(300.0, 400.0, 0.9), &kp(468.0, 400.0, 0.9), None, None, 0.0)
            .unwrap();
        assert!(estimator.is_calibrated());
        // Calibration makes the first frame's depth exactly the reference
        assert!((depth - REF_Z_M).abs() < 1e-12);
    }

    #[test]
    fn test_halved_separation_doubles_depth() {
        let mut estimator = SimplifiedDepthEstimator::new();
        estimator
            .estimate(&kp(300.0, 400.0, 0.9), &kp(468.0, 400.0, 0.9), None, None, 0.0)
            .unwrap();
        let depth = estimator
            .estimate(&kp(342.0, 400.0, 0.9), &kp(426.0, 400.0, 0.9), None, None, REF_Z_M)
            .unwrap();
        assert!((depth - 2.0 * REF_Z_M).abs() < 1e-9);
    }

    #[test]
    fn test_shoulder_blend_pulls_toward_shoulder_estimate() {
        let mut estimator = SimplifiedDepthEstimator::new();
        estimator
            .estimate(&kp(300.0, 400.0, 0.9), &kp(468.0, 400.0, 0.9), None, None, 0.0)
            .unwrap();

        let eyes_only = estimator
            .estimate(&kp(300.0, 400.0, 0.9), &kp(468.0, 400.0, 0.9), None, None, 1.0)
            .unwrap();
        // 168 px eyes calibrate f to ~1333 px, so the shoulder and eye
        // depths agree at f * 0.3 / 0.5 = 800 px of shoulder separation.
        // Wider shoulders read closer and must pull the blend down
        let blended = estimator
            .estimate(
                &kp(300.0, 400.0, 0.9),
                &kp(468.0, 400.0, 0.9),
                Some(&kp(850.0, 600.0, 0.9)),
                Some(&kp(0.0, 600.0, 0.9)),
                1.0,
            )
            .unwrap();
        assert!(blended < eyes_only);

        // Narrower than 800 px reads farther and pulls the blend up
        let pulled_up = estimator
            .estimate(
                &kp(300.0, 400.0, 0.9),
                &kp(468.0, 400.0, 0.9),
                Some(&kp(700.0, 600.0, 0.9)),
                Some(&kp(100.0, 600.0, 0.9)),
                1.0,
            )
            .unwrap();
        assert!(pulled_up > eyes_only);
    }

    #[test]
    fn test_low_confidence_shoulders_are_ignored() {
        let mut estimator = SimplifiedDepthEstimator::new();
        estimator
            .estimate(&kp(300.0, 400.0, 0.9), &kp(468.0, 400.0, 0.9), None, None, 0.0)
            .unwrap();
        let without = estimator
            .estimate(&kp(300.0, 400.0, 0.9), &kp(468.0, 400.0, 0.9), None, None, 1.0)
            .unwrap();
        let with_weak = estimator
            .estimate(
                &kp(300.0, 400.0, 0.9),
                &kp(468.0, 400.0, 0.9),
                Some(&kp(700.0, 600.0, 0.3)),
                Some(&kp(100.0, 600.0, 0.9)),
                1.0,
            )
            .unwrap();
        assert_eq!(without, with_weak);
    }

    #[test]
    fn test_coincident_eyes_yield_none() {
        let mut estimator = SimplifiedDepthEstimator::new();
        let result = estimator.estimate(
            &kp(400.0, 400.0, 0.9),
            &kp(400.0, 400.0, 0.9),
            None,
            None,
            0.0,
        );
        assert!(result.is_none());
        assert!(!estimator.is_calibrated());
    }
}
