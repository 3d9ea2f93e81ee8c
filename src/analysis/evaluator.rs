use crate::analysis::AnalysisError;
use crate::analysis::moving_average::compute_average;
use crate::analysis::signal::{Position, generate_signal};
use crate::domain::{AverageKind, WindowPair};
use crate::utils::maths_utils;

/// Profit and loss of one signal applied to one price-delta column.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyOutcome {
    pub period_profit: Vec<f64>,
    pub cumulative_profit: Vec<f64>,
    pub total_return: f64,
    /// Number of periods the signal was long. Zero means no trade ever
    /// triggered, which `total_return == 0.0` alone cannot tell apart from
    /// breaking even.
    pub long_periods: usize,
}

impl StrategyOutcome {
    pub fn traded(&self) -> bool {
        self.long_periods > 0
    }
}

/// One share held whenever the signal is long, nothing otherwise.
///
/// This is the only place profit is computed: the grid search scores
/// candidates with it and the backtest builds wealth curves with it.
pub fn evaluate(
    signal: &[Position],
    price_delta: &[Option<f64>],
) -> Result<StrategyOutcome, AnalysisError> {
    if signal.len() != price_delta.len() {
        return Err(AnalysisError::LengthMismatch {
            left: signal.len(),
            right: price_delta.len(),
        });
    }

    let period_profit: Vec<f64> = signal
        .iter()
        .zip(price_delta)
        .map(|(position, delta)| delta.map_or(0.0, |d| position.shares() * d))
        .collect();
    let cumulative_profit = maths_utils::cumulative_sum(&period_profit);
    let long_periods = signal.iter().filter(|p| p.is_long()).count();

    // Never long: explicit zero rather than "no value"
    let total_return = if long_periods == 0 {
        0.0
    } else {
        cumulative_profit.last().copied().unwrap_or(0.0)
    };

    Ok(StrategyOutcome {
        period_profit,
        cumulative_profit,
        total_return,
        long_periods,
    })
}

/// Full crossover pipeline for one pair: both averages, the signal, then `evaluate`.
///
/// `price_delta` is the close-to-close column of `close` (it does not depend
/// on the pair, so callers compute it once).
pub fn run_crossover(
    close: &[f64],
    price_delta: &[Option<f64>],
    pair: WindowPair,
    kind: AverageKind,
) -> Result<StrategyOutcome, AnalysisError> {
    let fast_avg = compute_average(close, pair.fast(), kind)?;
    let slow_avg = compute_average(close, pair.slow(), kind)?;
    let signal = generate_signal(&fast_avg, &slow_avg)?;
    evaluate(&signal, price_delta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::signal::price_delta;
    use Position::{Flat, Long};

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-10
    }

    #[test]
    fn profit_only_accrues_while_long() {
        let close = [10.0, 11.0, 13.0, 12.0, 15.0];
        let signal = [Long, Long, Flat, Long, Flat];
        let outcome = evaluate(&signal, &price_delta(&close)).unwrap();

        // index 0 has no prior close so contributes nothing even when long
        assert_eq!(outcome.period_profit, vec![0.0, 1.0, 0.0, -1.0, 0.0]);
        assert_eq!(outcome.cumulative_profit, vec![0.0, 1.0, 1.0, 0.0, 0.0]);
        assert!(approx_eq(outcome.total_return, 0.0));
        assert_eq!(outcome.long_periods, 3);
        assert!(outcome.traded());
    }

    #[test]
    fn never_long_returns_explicit_zero() {
        let close = [10.0, 20.0, 5.0];
        let outcome = evaluate(&[Flat, Flat, Flat], &price_delta(&close)).unwrap();
        assert_eq!(outcome.total_return, 0.0);
        assert!(!outcome.traded());
    }

    #[test]
    fn cumulative_never_falls_when_long_in_a_rising_market() {
        let close: Vec<f64> = (0..30).map(|i| 100.0 + (i * i) as f64 * 0.1).collect();
        let signal = vec![Long; close.len()];
        let outcome = evaluate(&signal, &price_delta(&close)).unwrap();
        assert!(
            outcome
                .cumulative_profit
                .windows(2)
                .all(|w| w[1] >= w[0])
        );
        assert!(approx_eq(outcome.total_return, close[29] - close[0]));
    }

    #[test]
    fn crossover_on_a_steady_uptrend_is_long_from_the_second_bar() {
        // Fast EMA reacts quicker, so it sits above the slow one as soon as prices move
        let close: Vec<f64> = (0..60).map(|i| 50.0 + i as f64).collect();
        let pair = WindowPair::new(13, 50).unwrap();
        let outcome =
            run_crossover(&close, &price_delta(&close), pair, AverageKind::Exponential).unwrap();
        assert_eq!(outcome.long_periods, 59);
        assert!(approx_eq(outcome.total_return, 59.0));
    }

    #[test]
    fn crossover_propagates_window_errors() {
        let close = [1.0, 2.0, 3.0];
        let pair = WindowPair::new(13, 50).unwrap();
        assert!(matches!(
            run_crossover(&close, &price_delta(&close), pair, AverageKind::Simple),
            Err(AnalysisError::InvalidWindow { window: 13, .. })
        ));
    }

    #[test]
    fn misaligned_inputs_are_rejected() {
        assert!(matches!(
            evaluate(&[Long], &[None, Some(1.0)]),
            Err(AnalysisError::LengthMismatch { left: 1, right: 2 })
        ));
    }
}
