//! Polynomial root extraction for the P3P quartic.
//!
//! Roots are found as eigenvalues of the companion matrix, which is robust
//! near repeated roots where closed-form resolvents lose precision. The
//! full complex spectrum is returned; callers decide which roots to treat
//! as real.

use nalgebra::{DMatrix, Schur};

/// A complex root as a `(re, im)` pair
pub type ComplexRoot = (f64, f64);

/// Solve `a·x⁴ + b·x³ + c·x² + d·x + e = 0`.
///
/// Returns the complex eigenvalue spectrum of the companion matrix, up to
/// four entries. Degenerates to the cubic when the leading coefficient
/// vanishes; an identically zero polynomial yields no roots.
pub fn solve_quartic(a: f64, b: f64, c: f64, d: f64, e: f64) -> Vec<ComplexRoot> {
    let eps = 1e-12;
    if a.abs() < eps {
        return solve_companion(&[b, c, d, e]);
    }
    solve_companion(&[a, b, c, d, e])
}

/// Eigenvalues of the companion matrix of the monic form of `coeffs`
/// (highest degree first). `coeffs[0]` must be nonzero.
fn solve_companion(coeffs: &[f64]) -> Vec<ComplexRoot> {
    let eps = 1e-12;
    let lead = coeffs[0];
    if lead.abs() < eps {
        if coeffs.len() <= 2 {
            return Vec::new();
        }
        return solve_companion(&coeffs[1..]);
    }

    let n = coeffs.len() - 1;
    let mut comp = DMatrix::<f64>::zeros(n, n);
    for (j, &coeff) in coeffs[1..].iter().enumerate() {
        comp[(0, j)] = -coeff / lead;
    }
    for i in 1..n {
        comp[(i, i - 1)] = 1.0;
    }

    let schur = Schur::new(comp);
    let eigvals = schur.complex_eigenvalues();

    eigvals.iter().map(|val| (val.re, val.im)).collect()
}
