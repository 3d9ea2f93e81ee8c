//! Simple and exponential moving averages over a price column.
//!
//! Every call builds a fresh output vector from its arguments alone, so two
//! candidates in a search can never see each other's intermediate values.

use crate::analysis::AnalysisError;
use crate::domain::AverageKind;

/// Moving average of `series` with the given look-back.
///
/// The output is index-aligned with the input. `Simple` averages are `None`
/// until `window` observations are available; `Exponential` averages are
/// seeded with the first observation and defined everywhere.
pub fn compute_average(
    series: &[f64],
    window: usize,
    kind: AverageKind,
) -> Result<Vec<Option<f64>>, AnalysisError> {
    let invalid = AnalysisError::InvalidWindow {
        window,
        series_len: series.len(),
        kind,
    };
    if window == 0 {
        return Err(invalid);
    }

    match kind {
        AverageKind::Simple => {
            if window > series.len() {
                return Err(invalid);
            }
            Ok(simple_moving_average(series, window))
        }
        AverageKind::Exponential => Ok(exponential_moving_average(series, window)
            .into_iter()
            .map(Some)
            .collect()),
    }
}

// Rolling sum; caller guarantees 1 <= window <= series.len()
fn simple_moving_average(series: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut sma = vec![None; window - 1];
    sma.reserve(series.len() + 1 - window);

    let mut sum: f64 = series[..window].iter().sum();
    sma.push(Some(sum / window as f64));

    for i in window..series.len() {
        sum += series[i] - series[i - window];
        sma.push(Some(sum / window as f64));
    }
    sma
}

/// Recursive (non-adjusted) exponential average:
///   bar 0  → value = price
///   bar 1+ → value = α·price + (1−α)·prev, α = 2/(window+1)
fn exponential_moving_average(series: &[f64], window: usize) -> Vec<f64> {
    let alpha = 2.0 / (window as f64 + 1.0);
    let mut ema = Vec::with_capacity(series.len());
    let mut prev: Option<f64> = None;
    for &price in series {
        let value = match prev {
            None => price,
            Some(p) => alpha * price + (1.0 - alpha) * p,
        };
        ema.push(value);
        prev = Some(value);
    }
    ema
}
