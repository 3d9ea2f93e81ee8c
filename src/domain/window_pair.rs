use std::fmt;

use crate::analysis::AnalysisError;
use crate::config::SEARCH;

/// A (fast, slow) look-back pair. Always `fast < slow` and inside the
/// configured fast/slow ratio band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowPair {
    fast: usize,
    slow: usize,
}

impl WindowPair {
    pub fn new(fast: usize, slow: usize) -> Result<Self, AnalysisError> {
        if Self::satisfies_rule(fast, slow) {
            Ok(WindowPair { fast, slow })
        } else {
            Err(AnalysisError::InvalidPair { fast, slow })
        }
    }

    /// The 50/200 golden-cross pair every search is compared against.
    pub fn benchmark() -> Self {
        WindowPair {
            fast: SEARCH.benchmark_fast,
            slow: SEARCH.benchmark_slow,
        }
    }

    // Rule of thumb: 0.25 <= fast/slow <= 0.50 (e.g. 10 vs 40, 25 vs 50)
    pub fn satisfies_rule(fast: usize, slow: usize) -> bool {
        if fast == 0 || fast >= slow {
            return false;
        }
        let ratio = fast as f64 / slow as f64;
        ratio >= SEARCH.ratio.min && ratio <= SEARCH.ratio.max
    }

    pub fn fast(&self) -> usize {
        self.fast
    }

    pub fn slow(&self) -> usize {
        self.slow
    }

    pub fn ratio(&self) -> f64 {
        self.fast as f64 / self.slow as f64
    }
}

impl fmt::Display for WindowPair {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.fast, self.slow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_band_is_inclusive() {
        assert!(WindowPair::new(10, 40).is_ok()); // 0.25
        assert!(WindowPair::new(25, 50).is_ok()); // 0.50
        assert!(WindowPair::new(13, 50).is_ok());
    }

    #[test]
    fn rejects_pairs_outside_rule() {
        assert_eq!(
            WindowPair::new(10, 50),
            Err(AnalysisError::InvalidPair { fast: 10, slow: 50 })
        );
        assert!(WindowPair::new(26, 50).is_err());
        assert!(WindowPair::new(50, 50).is_err());
        assert!(WindowPair::new(0, 10).is_err());
    }

    #[test]
    fn benchmark_is_golden_cross() {
        let pair = WindowPair::benchmark();
        assert_eq!((pair.fast(), pair.slow()), (50, 200));
        assert!(WindowPair::satisfies_rule(pair.fast(), pair.slow()));
        assert_eq!(pair.to_string(), "50-200");
    }
}
