//! Disambiguation among P3P candidate solutions.
//!
//! All four quartic roots are algebraically valid; only one matches the
//! physical camera pose. Temporal continuity picks it: the candidate
//! closest to the previously accepted position wins.

use crate::p3p::Solution;
use nalgebra::Vector3;

/// Selects the physically plausible candidate from a P3P solve
#[derive(Debug, Clone, Copy, Default)]
pub struct SolutionSelector;

impl SolutionSelector {
    /// Pick the candidate with minimum Euclidean distance to `previous`.
    ///
    /// Candidates with non-finite coordinates are never selected. Ties
    /// resolve to the lowest index. Without a previous position the first
    /// valid candidate wins. Returns `None` when no candidate is valid;
    /// the caller holds its prior pose in that case.
    pub fn select(candidates: &[Solution], previous: Option<&Vector3<f64>>) -> Option<usize> {
        match previous {
            Some(prev) => {
                let mut best: Option<(usize, f64)> = None;
                for (i, candidate) in candidates.iter().enumerate() {
                    if !candidate.is_valid() {
                        continue;
                    }
                    let distance = (candidate.position - prev).norm();
                    if best.map_or(true, |(_, d)| distance < d) {
                        best = Some((i, distance));
                    }
                }
                best.map(|(i, _)| i)
            }
            None => candidates.iter().position(Solution::is_valid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Matrix3;

    fn candidate(x: f64, y: f64, z: f64) -> Solution {
        Solution {
            position: Vector3::new(x, y, z),
            rotation: Matrix3::identity(),
        }
    }

    #[test]
    fn test_selects_minimum_distance() {
        let candidates = vec![
            candidate(1.0, 0.0, 0.0),
            candidate(0.1, 0.0, 0.0),
            candidate(5.0, 0.0, 0.0),
        ];
        let prev = Vector3::zeros();
        assert_eq!(SolutionSelector::select(&candidates, Some(&prev)), Some(1));
    }

    #[test]
    fn test_ties_resolve_to_lowest_index() {
        let candidates = vec![
            candidate(1.0, 0.0, 0.0),
            candidate(-1.0, 0.0, 0.0),
            candidate(0.0, 1.0, 0.0),
        ];
        let prev = Vector3::zeros();
        assert_eq!(SolutionSelector::select(&candidates, Some(&prev)), Some(0));
    }

    #[test]
    fn test_nan_candidates_never_selected() {
        let candidates = vec![
            candidate(f64::NAN, 0.0, 0.0),
            candidate(f64::INFINITY, 0.0, 0.0),
            candidate(10.0, 10.0, 10.0),
        ];
        let prev = Vector3::zeros();
        assert_eq!(SolutionSelector::select(&candidates, Some(&prev)), Some(2));
    }

    #[test]
    fn test_no_previous_picks_first_valid() {
        let candidates = vec![candidate(f64::NAN, 0.0, 0.0), candidate(3.0, 0.0, 0.0)];
        assert_eq!(SolutionSelector::select(&candidates, None), Some(1));
    }

    #[test]
    fn test_all_invalid_returns_none() {
        let candidates = vec![candidate(f64::NAN, 0.0, 0.0)];
        let prev = Vector3::zeros();
        assert_eq!(SolutionSelector::select(&candidates, Some(&prev)), None);
        assert_eq!(SolutionSelector::select(&[], None), None);
    }
}
