use std::fmt;

use crate::domain::AverageKind;

/// Everything that can abort a search or backtest run.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Window is zero, or a simple average window is longer than the series.
    InvalidWindow {
        window: usize,
        series_len: usize,
        kind: AverageKind,
    },
    /// No (fast, slow) pair in the requested ranges satisfies the ratio rule.
    EmptySearchSpace {
        fast: (usize, usize),
        slow: (usize, usize),
    },
    /// A requested fast or slow range reaches outside the configured bounds.
    RangeOutOfBounds {
        axis: &'static str,
        range: (usize, usize),
        bounds: (usize, usize),
    },
    /// Series too short for the warm-up the search needs (zero rows on fetch failure).
    InsufficientData { required: usize, available: usize },
    /// A (fast, slow) pair that breaks the ordering or ratio rule.
    InvalidPair { fast: usize, slow: usize },
    /// Rows handed to a price series were not strictly ascending by timestamp.
    UnsortedSeries { index: usize, timestamp_ms: i64 },
    /// Two sequences that must line up index-for-index did not.
    LengthMismatch { left: usize, right: usize },
}

impl std::error::Error for AnalysisError {}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AnalysisError::InvalidWindow {
                window,
                series_len,
                kind,
            } => write!(
                f,
                "Invalid {} window {} for a series of {} observations",
                kind, window, series_len
            ),
            AnalysisError::EmptySearchSpace { fast, slow } => write!(
                f,
                "No window pair in fast {}..={} x slow {}..={} satisfies the ratio rule",
                fast.0, fast.1, slow.0, slow.1
            ),
            AnalysisError::RangeOutOfBounds { axis, range, bounds } => write!(
                f,
                "{} window range {}..={} is outside {}..={}",
                axis, range.0, range.1, bounds.0, bounds.1
            ),
            AnalysisError::InsufficientData {
                required,
                available,
            } => write!(
                f,
                "Insufficient data: need at least {} observations, have {}",
                required, available
            ),
            AnalysisError::InvalidPair { fast, slow } => {
                write!(f, "Invalid window pair ({}, {})", fast, slow)
            }
            AnalysisError::UnsortedSeries {
                index,
                timestamp_ms,
            } => write!(
                f,
                "Price rows not strictly ascending at index {} (timestamp {} ms)",
                index, timestamp_ms
            ),
            AnalysisError::LengthMismatch { left, right } => {
                write!(f, "Sequences are not aligned: {} vs {}", left, right)
            }
        }
    }
}
