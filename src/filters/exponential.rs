use super::ScalarFilter;
use crate::error::{Error, Result};

/// Exponential smoothing filter
pub struct ExponentialFilter {
    alpha: f64,
    last: Option<f64>,
}

impl ExponentialFilter {
    /// # Errors
    ///
    /// Returns `FilterError` unless alpha is in (0, 1].
    pub fn new(alpha: f64) -> Result<Self> {
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(Error::FilterError("Alpha must be in (0, 1]".to_string()));
        }
        Ok(Self { alpha, last: None })
    }
}

impl ScalarFilter for ExponentialFilter {
    fn filter(&mut self, measurement: f64) -> f64 {
        let filtered = match self.last {
            Some(last) => self.alpha * measurement + (1.0 - self.alpha) * last,
            None => measurement,
        };
        self.last = Some(filtered);
        filtered
    }

    fn reset(&mut self) {
        self.last = None;
    }

    fn name(&self) -> &str {
        "ExponentialFilter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_filter() {
        let mut filter = ExponentialFilter::new(0.5).unwrap();

        // First value passes through
        assert_eq!(filter.filter(10.0), 10.0);

        // Second value is smoothed
        assert_eq!(filter.filter(20.0), 15.0); // 0.5 * 20 + 0.5 * 10
    }

    #[test]
    fn test_alpha_bounds() {
        // High alpha = less smoothing
        let mut filter1 = ExponentialFilter::new(0.9).unwrap();
        filter1.filter(10.0);
        assert!((filter1.filter(20.0) - 19.0).abs() < 0.001);

        // Low alpha = more smoothing
        let mut filter2 = ExponentialFilter::new(0.1).unwrap();
        filter2.filter(10.0);
        assert!((filter2.filter(20.0) - 11.0).abs() < 0.001);
    }

    #[test]
    fn test_invalid_alpha() {
        assert!(ExponentialFilter::new(0.0).is_err());
        assert!(ExponentialFilter::new(1.5).is_err());
    }
}
