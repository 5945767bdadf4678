//! Closed-form Perspective-Three-Point solver (Kneip parametrization).
//!
//! Given three unit viewing rays in camera space and the three matching
//! reference points in the face-local frame, recovers up to four candidate
//! camera poses. The parametrization reduces the problem to a quartic in
//! cos(θ); each real root yields one candidate via back-substitution.
//!
//! Reference: Kneip, Scaramuzza, Siegwart, "A Novel Parametrization of the
//! Perspective-Three-Point Problem for a Direct Computation of Absolute
//! Camera Position and Orientation", CVPR 2011.

use crate::constants::{EPSILON, REAL_ROOT_EPSILON};
use crate::error::{Error, Result};
use crate::quartic::solve_quartic;
use nalgebra::{Matrix3, Vector3};

/// One candidate pose: camera center in the reference-point frame plus the
/// rotation from camera space into that frame
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Camera center, meters
    pub position: Vector3<f64>,
    /// 3x3 orthonormal rotation matrix
    pub rotation: Matrix3<f64>,
}

impl Solution {
    /// True when every coordinate of the position is finite
    pub fn is_valid(&self) -> bool {
        self.position.iter().all(|v| v.is_finite())
    }
}

/// Orthonormal frame with rows (e1, e2, e3) built from two rays:
/// e1 along f1, e3 along f1 x f2, e2 completing the right-handed triad.
fn camera_frame(f1: &Vector3<f64>, f2: &Vector3<f64>) -> Matrix3<f64> {
    let e1 = *f1;
    let e3 = f1.cross(f2).normalize();
    let e2 = e3.cross(&e1);
    Matrix3::new(
        e1.x, e1.y, e1.z, //
        e2.x, e2.y, e2.z, //
        e3.x, e3.y, e3.z,
    )
}

/// Solve the P3P problem for rays `f1, f2, f3` and reference points
/// `p1, p2, p3`. Rays must be unit length.
///
/// Returns up to four candidates, one per real root of the quartic.
/// Candidates with non-finite coordinates are possible near singular
/// configurations and are the caller's responsibility to filter.
///
/// # Errors
///
/// Returns `DegenerateGeometry` when the reference points are colinear or
/// the two anchor rays are parallel; either makes the intermediate frames
/// unconstructible.
pub fn solve(
    f1: &Vector3<f64>,
    f2: &Vector3<f64>,
    f3: &Vector3<f64>,
    p1: &Vector3<f64>,
    p2: &Vector3<f64>,
    p3: &Vector3<f64>,
) -> Result<Vec<Solution>> {
    if (p2 - p1).cross(&(p3 - p1)).norm() < EPSILON {
        return Err(Error::DegenerateGeometry(
            "reference points are colinear".to_string(),
        ));
    }

    let mut f1 = *f1;
    let mut f2 = *f2;
    let mut p1 = *p1;
    let mut p2 = *p2;

    let cos_beta = f1.dot(&f2);
    let sin_beta_sq = 1.0 - cos_beta * cos_beta;
    if sin_beta_sq < EPSILON {
        return Err(Error::DegenerateGeometry(
            "anchor rays are parallel".to_string(),
        ));
    }

    let mut t = camera_frame(&f1, &f2);
    let mut f3_t = t * f3;

    // Sign convention: theta in [0, pi] requires f3 below the e1-e2 plane.
    // Swapping the first two correspondences flips the frame.
    if f3_t.z > 0.0 {
        std::mem::swap(&mut f1, &mut f2);
        std::mem::swap(&mut p1, &mut p2);
        t = camera_frame(&f1, &f2);
        f3_t = t * f3;
    }

    // World intermediate frame from the reference points
    let n1 = (p2 - p1).normalize();
    let n3 = n1.cross(&(p3 - p1)).normalize();
    let n2 = n3.cross(&n1);
    let n = Matrix3::new(
        n1.x, n1.y, n1.z, //
        n2.x, n2.y, n2.z, //
        n3.x, n3.y, n3.z,
    );
    let p3_n = n * (p3 - p1);

    let d_12 = (p2 - p1).norm();
    let f_1 = f3_t.x / f3_t.z;
    let f_2 = f3_t.y / f3_t.z;
    let p_1 = p3_n.x;
    let p_2 = p3_n.y;

    let b = (1.0 / sin_beta_sq - 1.0).sqrt() * cos_beta.signum();

    let f_1_pw2 = f_1 * f_1;
    let f_2_pw2 = f_2 * f_2;
    let p_1_pw2 = p_1 * p_1;
    let p_1_pw3 = p_1_pw2 * p_1;
    let p_1_pw4 = p_1_pw3 * p_1;
    let p_2_pw2 = p_2 * p_2;
    let p_2_pw3 = p_2_pw2 * p_2;
    let p_2_pw4 = p_2_pw3 * p_2;
    let d_12_pw2 = d_12 * d_12;
    let b_pw2 = b * b;

    // Quartic coefficients in cos(theta), highest degree first
    let factor_4 = -f_2_pw2 * p_2_pw4 - p_2_pw4 * f_1_pw2 - p_2_pw4;

    let factor_3 = 2.0 * p_2_pw3 * d_12 * b + 2.0 * f_2_pw2 * p_2_pw3 * d_12 * b
        - 2.0 * f_2 * p_2_pw3 * f_1 * d_12;

    let factor_2 = -f_2_pw2 * p_2_pw2 * p_1_pw2
        - f_2_pw2 * p_2_pw2 * d_12_pw2 * b_pw2
        - f_2_pw2 * p_2_pw2 * d_12_pw2
        + f_2_pw2 * p_2_pw4
        + p_2_pw4 * f_1_pw2
        + 2.0 * p_1 * p_2_pw2 * d_12
        + 2.0 * f_1 * f_2 * p_1 * p_2_pw2 * d_12 * b
        - p_2_pw2 * p_1_pw2 * f_1_pw2
        + 2.0 * p_1 * p_2_pw2 * f_2_pw2 * d_12
        - p_2_pw2 * d_12_pw2 * b_pw2
        - 2.0 * p_1_pw2 * p_2_pw2;

    let factor_1 = 2.0 * p_1_pw2 * p_2 * d_12 * b + 2.0 * f_2 * p_2_pw3 * f_1 * d_12
        - 2.0 * f_2_pw2 * p_2_pw3 * d_12 * b
        - 2.0 * p_1 * p_2 * d_12_pw2 * b;

    let factor_0 = -2.0 * f_2 * p_2_pw2 * f_1 * p_1 * d_12 * b
        + f_2_pw2 * p_2_pw2 * d_12_pw2
        + 2.0 * p_1_pw3 * d_12
        - p_1_pw2 * d_12_pw2
        + f_2_pw2 * p_2_pw2 * p_1_pw2
        - p_1_pw4
        - 2.0 * f_2_pw2 * p_2_pw2 * p_1 * d_12
        + p_2_pw2 * f_1_pw2 * p_1_pw2
        + f_2_pw2 * p_2_pw2 * d_12_pw2 * b_pw2;

    if ![factor_4, factor_3, factor_2, factor_1, factor_0]
        .iter()
        .all(|c| c.is_finite())
    {
        return Ok(Vec::new());
    }

    let roots = solve_quartic(factor_4, factor_3, factor_2, factor_1, factor_0);

    let n_t = n.transpose();
    let mut solutions = Vec::with_capacity(4);

    for (re, im) in roots {
        // Only real roots of the quartic correspond to geometric solutions;
        // complex-conjugate pairs are discarded outright rather than
        // projected onto the real axis.
        if im.abs() >= REAL_ROOT_EPSILON {
            continue;
        }
        let cos_theta = re;

        let cot_alpha = (-f_1 * p_1 / f_2 - cos_theta * p_2 + d_12 * b)
            / (-f_1 * cos_theta * p_2 / f_2 + p_1 - d_12);

        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();
        let sin_alpha = (1.0 / (cot_alpha * cot_alpha + 1.0)).sqrt();
        let mut cos_alpha = (1.0 - sin_alpha * sin_alpha).sqrt();
        if cot_alpha < 0.0 {
            cos_alpha = -cos_alpha;
        }

        let scale = sin_alpha * b + cos_alpha;
        let center_n = Vector3::new(
            d_12 * cos_alpha * scale,
            cos_theta * d_12 * sin_alpha * scale,
            sin_theta * d_12 * sin_alpha * scale,
        );
        let position = p1 + n_t * center_n;

        let r_n = Matrix3::new(
            -cos_alpha,
            -sin_alpha * cos_theta,
            -sin_alpha * sin_theta,
            sin_alpha,
            -cos_alpha * cos_theta,
            -cos_alpha * sin_theta,
            0.0,
            -sin_theta,
            cos_theta,
        );
        let rotation = n_t * r_n.transpose() * t;

        solutions.push(Solution { position, rotation });
    }

    Ok(solutions)
}
