//! Input data model: named 2D keypoints produced by an external landmark
//! detector, grouped into per-frame poses.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Body parts named after the detector convention. The estimator only uses
/// the face and shoulder parts; the rest exist so full 17-point detector
/// frames deserialize without filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BodyPart {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

/// A single detected landmark: pixel position plus detector confidence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    /// Horizontal pixel coordinate
    pub x: f64,
    /// Vertical pixel coordinate
    pub y: f64,
    /// Detector confidence in [0, 1]
    pub score: f64,
}

impl Keypoint {
    pub fn new(x: f64, y: f64, score: f64) -> Self {
        Self { x, y, score }
    }
}

/// One frame of landmark detections, keyed by body part.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pose {
    keypoints: HashMap<BodyPart, Keypoint>,
}

impl Pose {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a keypoint
    pub fn insert(&mut self, part: BodyPart, keypoint: Keypoint) {
        self.keypoints.insert(part, keypoint);
    }

    /// Look up a keypoint by body part
    pub fn part(&self, part: BodyPart) -> Option<&Keypoint> {
        self.keypoints.get(&part)
    }

    /// Confidence of a part, treating a missing detection as zero
    pub fn score(&self, part: BodyPart) -> f64 {
        self.keypoints.get(&part).map_or(0.0, |k| k.score)
    }

    pub fn len(&self) -> usize {
        self.keypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keypoints.is_empty()
    }
}
