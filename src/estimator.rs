//! Per-subject pose estimation orchestrator.
//!
//! `PoseEstimator` consumes one landmark frame per call, drives projection,
//! the P3P solve, candidate selection and temporal smoothing, and exposes
//! the current pose. Each tracked subject gets its own instance; filter
//! state is owned per instance and never shared.

use crate::camera::{CameraModel, RayProjector};
use crate::config::Config;
use crate::constants::{LEFT_EYE_WORLD, MIN_KEYPOINT_SCORE, NOSE_WORLD, RIGHT_EYE_WORLD};
use crate::depth::SimplifiedDepthEstimator;
use crate::error::Result;
use crate::filters::{kalman::KalmanFilter, NoFilter, ScalarFilter};
use crate::landmarks::{BodyPart, Pose};
use crate::p3p;
use crate::selector::SolutionSelector;
use nalgebra::{Matrix3, Rotation3, UnitQuaternion, Vector2, Vector3};

/// Estimation strategy switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstimatorOptions {
    /// Full P3P solve when true, scale-only depth fallback when false
    pub use_p3p: bool,
    /// Kalman smoothing of the output channels
    pub use_kalman_filter: bool,
}

impl Default for EstimatorOptions {
    fn default() -> Self {
        Self {
            use_p3p: true,
            use_kalman_filter: true,
        }
    }
}

/// Lifecycle of an estimator instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingState {
    /// No resolution known yet; updates are ignored
    Uninitialized,
    /// Resolution known, no pose accepted yet
    Ready,
    /// At least one update has produced a pose
    Tracking,
}

/// What a single `update` call did with its frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The exposed pose was refreshed from this frame
    Updated,
    /// Resolution not set yet; frame ignored
    NotReady,
    /// Nose or an eye below the confidence threshold; frame ignored
    LowConfidence,
    /// No numerically valid candidate; prior pose held
    NoValidSolution,
}

/// One smoothing filter per output channel, owned by the estimator
struct ChannelFilters {
    x: Box<dyn ScalarFilter>,
    y: Box<dyn ScalarFilter>,
    z: Box<dyn ScalarFilter>,
    depth: Box<dyn ScalarFilter>,
}

impl ChannelFilters {
    fn kalman() -> Self {
        Self {
            x: Box::new(KalmanFilter::default()),
            y: Box::new(KalmanFilter::default()),
            z: Box::new(KalmanFilter::default()),
            depth: Box::new(KalmanFilter::default()),
        }
    }

    fn passthrough() -> Self {
        Self {
            x: Box::new(NoFilter),
            y: Box::new(NoFilter),
            z: Box::new(NoFilter),
            depth: Box::new(NoFilter),
        }
    }

    fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
        self.z.reset();
        self.depth.reset();
    }
}

/// Head pose estimator for a single tracked subject
pub struct PoseEstimator {
    options: EstimatorOptions,
    camera: CameraModel,
    state: TrackingState,
    filters: ChannelFilters,
    depth_estimator: SimplifiedDepthEstimator,
    position: Vector3<f64>,
    orientation: Matrix3<f64>,
    midpoint: Vector2<f64>,
    nose_ndc: Vector2<f64>,
    depth: f64,
    has_pose: bool,
}

impl PoseEstimator {
    /// Create an estimator with the default camera FOV and Kalman
    /// parameters. The instance stays `Uninitialized` until
    /// [`set_resolution`](Self::set_resolution) is called.
    pub fn new(options: EstimatorOptions) -> Self {
        let filters = if options.use_kalman_filter {
            ChannelFilters::kalman()
        } else {
            ChannelFilters::passthrough()
        };
        Self::with_parts(options, CameraModel::default(), filters)
    }

    /// Create an estimator from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the configuration fails validation, or a
    /// filter/camera error when a section holds unusable parameters.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let options = EstimatorOptions {
            use_p3p: config.estimator.use_p3p,
            use_kalman_filter: config.estimator.use_kalman_filter,
        };
        let filters = if options.use_kalman_filter {
            ChannelFilters {
                x: config.create_filter()?,
                y: config.create_filter()?,
                z: config.create_filter()?,
                depth: config.create_filter()?,
            }
        } else {
            ChannelFilters::passthrough()
        };
        Ok(Self {
            options,
            camera: CameraModel::new(768.0, 1024.0, config.camera.fov_degrees)?,
            state: TrackingState::Uninitialized,
            filters,
            depth_estimator: SimplifiedDepthEstimator::new(),
            position: Vector3::zeros(),
            orientation: Matrix3::identity(),
            midpoint: Vector2::zeros(),
            nose_ndc: Vector2::zeros(),
            depth: 0.0,
            has_pose: false,
        })
    }

    fn with_parts(options: EstimatorOptions, camera: CameraModel, filters: ChannelFilters) -> Self {
        Self {
            options,
            camera,
            state: TrackingState::Uninitialized,
            filters,
            depth_estimator: SimplifiedDepthEstimator::new(),
            position: Vector3::zeros(),
            orientation: Matrix3::identity(),
            midpoint: Vector2::zeros(),
            nose_ndc: Vector2::zeros(),
            depth: 0.0,
            has_pose: false,
        }
    }

    /// Set or change the image resolution. Must be called once before
    /// frames are accepted; later calls handle source resolution changes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a non-positive resolution.
    pub fn set_resolution(&mut self, width: f64, height: f64) -> Result<()> {
        self.camera.set_resolution(width, height)?;
        if self.state == TrackingState::Uninitialized {
            self.state = TrackingState::Ready;
        }
        Ok(())
    }

    /// Consume one frame of landmark detections.
    ///
    /// Frames with nose or either eye below the confidence threshold are
    /// ignored and leave every exposed value untouched. A frame with no
    /// numerically valid P3P candidate holds the prior pose.
    ///
    /// # Errors
    ///
    /// Propagates `DegenerateGeometry` from the solver; internal state is
    /// unchanged in that case, so the caller can log and keep feeding
    /// frames.
    pub fn update(&mut self, pose: &Pose) -> Result<UpdateOutcome> {
        if self.state == TrackingState::Uninitialized {
            log::debug!("Frame dropped: resolution not set");
            return Ok(UpdateOutcome::NotReady);
        }

        // A missing keypoint counts as zero confidence
        let (Some(nose), Some(left), Some(right)) = (
            pose.part(BodyPart::Nose).copied(),
            pose.part(BodyPart::LeftEye).copied(),
            pose.part(BodyPart::RightEye).copied(),
        ) else {
            log::debug!("Frame dropped: nose or eye keypoint missing");
            return Ok(UpdateOutcome::LowConfidence);
        };
        if nose.score < MIN_KEYPOINT_SCORE
            || left.score < MIN_KEYPOINT_SCORE
            || right.score < MIN_KEYPOINT_SCORE
        {
            log::debug!(
                "Frame dropped: confidence below threshold (nose {:.2}, \
                 left eye {:.2}, right eye {:.2})",
                nose.score,
                left.score,
                right.score,
            );
            return Ok(UpdateOutcome::LowConfidence);
        }

        let outcome = if self.options.use_p3p {
            let f_left = RayProjector::project(left.x, left.y, &self.camera);
            let f_right = RayProjector::project(right.x, right.y, &self.camera);
            let f_nose = RayProjector::project(nose.x, nose.y, &self.camera);

            let candidates = p3p::solve(
                &f_left,
                &f_right,
                &f_nose,
                &LEFT_EYE_WORLD,
                &RIGHT_EYE_WORLD,
                &NOSE_WORLD,
            )?;

            let previous = self.has_pose.then_some(&self.position);
            match SolutionSelector::select(&candidates, previous) {
                Some(index) => {
                    let solution = &candidates[index];
                    self.position = Vector3::new(
                        self.filters.x.filter(solution.position.x),
                        self.filters.y.filter(solution.position.y),
                        self.filters.z.filter(solution.position.z),
                    );
                    // Rotation passes through unfiltered
                    self.orientation = solution.rotation;
                    self.has_pose = true;
                    UpdateOutcome::Updated
                }
                None => {
                    log::debug!("No valid P3P candidate this frame, holding prior pose");
                    UpdateOutcome::NoValidSolution
                }
            }
        } else {
            let measured = self.depth_estimator.estimate(
                &left,
                &right,
                pose.part(BodyPart::LeftShoulder),
                pose.part(BodyPart::RightShoulder),
                self.depth,
            );
            match measured {
                Some(depth) => {
                    self.depth = self.filters.depth.filter(depth);
                    self.has_pose = true;
                    UpdateOutcome::Updated
                }
                None => UpdateOutcome::NoValidSolution,
            }
        };

        if outcome == UpdateOutcome::Updated {
            self.midpoint = Vector2::new(
                (left.x + right.x) / self.camera.width() - 1.0,
                (left.y + right.y) / self.camera.height() - 1.0,
            );
            let (nx, ny) = self.camera.to_ndc(nose.x, nose.y);
            self.nose_ndc = Vector2::new(nx, ny);
            self.state = TrackingState::Tracking;
        }

        Ok(outcome)
    }

    /// Forget all per-subject state, keeping options and resolution
    pub fn reset(&mut self) {
        self.filters.reset();
        self.depth_estimator.reset();
        self.position = Vector3::zeros();
        self.orientation = Matrix3::identity();
        self.midpoint = Vector2::zeros();
        self.nose_ndc = Vector2::zeros();
        self.depth = 0.0;
        self.has_pose = false;
        if self.state == TrackingState::Tracking {
            self.state = TrackingState::Ready;
        }
    }

    /// Smoothed camera-relative position, meters
    pub fn position(&self) -> &Vector3<f64> {
        &self.position
    }

    /// Head orientation as a rotation matrix
    pub fn orientation(&self) -> &Matrix3<f64> {
        &self.orientation
    }

    /// Head orientation as a unit quaternion
    pub fn orientation_quaternion(&self) -> UnitQuaternion<f64> {
        UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(self.orientation))
    }

    /// Eye midpoint in normalized device coordinates
    pub fn midpoint(&self) -> &Vector2<f64> {
        &self.midpoint
    }

    /// Nose position in normalized device coordinates
    pub fn nose_ndc(&self) -> &Vector2<f64> {
        &self.nose_ndc
    }

    /// Smoothed depth in meters (fallback mode)
    pub fn depth(&self) -> f64 {
        self.depth
    }

    pub fn state(&self) -> TrackingState {
        self.state
    }

    pub fn options(&self) -> EstimatorOptions {
        self.options
    }

    pub fn camera(&self) -> &CameraModel {
        &self.camera
    }
}

impl Default for PoseEstimator {
    fn default() -> Self {
        Self::new(EstimatorOptions::default())
    }
}
