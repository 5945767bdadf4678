//! Pinhole camera model and pixel-to-ray projection.
//!
//! The camera sits at the origin of camera space looking down the negative
//! Z axis, with a vertical field of view and an aspect ratio derived from
//! the current image resolution. Pixel coordinates follow the detector
//! convention: origin top-left, y growing downward.

use crate::constants::DEFAULT_FOV_DEGREES;
use crate::error::{Error, Result};
use nalgebra::Vector3;

/// A unit direction vector in camera space
pub type Ray = Vector3<f64>;

/// Perspective camera intrinsics: resolution and vertical field of view
#[derive(Debug, Clone, PartialEq)]
pub struct CameraModel {
    width: f64,
    height: f64,
    fov_degrees: f64,
}

impl CameraModel {
    /// Create a camera model for the given resolution and vertical FOV
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the resolution is not positive or the FOV
    /// is outside (0, 180) degrees.
    pub fn new(width: f64, height: f64, fov_degrees: f64) -> Result<Self> {
        if !(width > 0.0 && height > 0.0) {
            return Err(Error::InvalidInput(format!(
                "Resolution must be positive, got {width}x{height}"
            )));
        }
        if !(0.0 < fov_degrees && fov_degrees < 180.0) {
            return Err(Error::InvalidInput(format!(
                "Vertical FOV must be in (0, 180) degrees, got {fov_degrees}"
            )));
        }
        Ok(Self {
            width,
            height,
            fov_degrees,
        })
    }

    /// Update the image resolution; the aspect ratio follows immediately
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the resolution is not positive.
    pub fn set_resolution(&mut self, width: f64, height: f64) -> Result<()> {
        if !(width > 0.0 && height > 0.0) {
            return Err(Error::InvalidInput(format!(
                "Resolution must be positive, got {width}x{height}"
            )));
        }
        self.width = width;
        self.height = height;
        Ok(())
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Width over height
    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }

    pub fn fov_degrees(&self) -> f64 {
        self.fov_degrees
    }

    /// Map a pixel coordinate to normalized device coordinates in [-1, 1]
    pub fn to_ndc(&self, px: f64, py: f64) -> (f64, f64) {
        (2.0 * px / self.width - 1.0, 2.0 * py / self.height - 1.0)
    }
}

impl Default for CameraModel {
    fn default() -> Self {
        Self {
            width: 768.0,
            height: 1024.0,
            fov_degrees: DEFAULT_FOV_DEGREES,
        }
    }
}

/// Projects 2D pixel coordinates into unit viewing rays in camera space
#[derive(Debug, Clone, Copy, Default)]
pub struct RayProjector;

impl RayProjector {
    /// Project a pixel through the inverse perspective projection and
    /// normalize, yielding a unit ray from the camera origin.
    ///
    /// Pure function: NDC mapping, then the inverse of the vertical-FOV
    /// perspective projection, then normalization.
    pub fn project(px: f64, py: f64, camera: &CameraModel) -> Ray {
        let (ndc_x, ndc_y) = camera.to_ndc(px, py);
        let tan_half = (camera.fov_degrees().to_radians() / 2.0).tan();
        Vector3::new(ndc_x * tan_half * camera.aspect(), ndc_y * tan_half, -1.0).normalize()
    }
}
