use crate::analysis::AnalysisError;

/// Position held over one period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    Flat = 0,
    Long = 1,
}

impl Position {
    /// Shares held: 0 when flat, 1 when long.
    pub fn shares(self) -> f64 {
        match self {
            Position::Flat => 0.0,
            Position::Long => 1.0,
        }
    }

    pub fn is_long(self) -> bool {
        self == Position::Long
    }
}

/// Crossover signal: long where the fast average is strictly above the slow one.
/// Ties, and indices where either average is still warming up, stay flat.
pub fn generate_signal(
    fast_avg: &[Option<f64>],
    slow_avg: &[Option<f64>],
) -> Result<Vec<Position>, AnalysisError> {
    if fast_avg.len() != slow_avg.len() {
        return Err(AnalysisError::LengthMismatch {
            left: fast_avg.len(),
            right: slow_avg.len(),
        });
    }

    Ok(fast_avg
        .iter()
        .zip(slow_avg)
        .map(|pair| match pair {
            (Some(fast), Some(slow)) if fast > slow => Position::Long,
            _ => Position::Flat,
        })
        .collect())
}

/// Close-to-close change: output[i] = close[i] - close[i-1]; no value at index 0.
pub fn price_delta(close: &[f64]) -> Vec<Option<f64>> {
    std::iter::once(None)
        .chain(close.windows(2).map(|w| Some(w[1] - w[0])))
        .take(close.len())
        .collect()
}
