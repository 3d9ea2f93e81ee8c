use crate::analysis::AnalysisError;
use crate::analysis::evaluator::run_crossover;
use crate::analysis::signal::price_delta;
use crate::domain::{AverageKind, PriceSeries, WindowPair};
use crate::utils::maths_utils;

/// Cumulative profit of one strategy, one value per price observation.
#[derive(Debug, Clone, PartialEq)]
pub struct WealthSeries {
    pub label: String,
    pub values: Vec<f64>,
}

impl WealthSeries {
    pub fn final_value(&self) -> f64 {
        self.values.last().copied().unwrap_or(0.0)
    }
}

/// The three curves handed to the chart: winning pair, benchmark pair, buy-and-hold.
#[derive(Debug, Clone)]
pub struct BacktestReport {
    pub symbol: String,
    pub kind: AverageKind,
    pub best_pair: WindowPair,
    pub benchmark_pair: WindowPair,
    pub timestamps_ms: Vec<i64>,
    pub best_wealth: WealthSeries,
    pub benchmark_wealth: WealthSeries,
    pub buy_hold_wealth: WealthSeries,
}

impl BacktestReport {
    /// Re-run the crossover for `best_pair` and `benchmark_pair` over the whole
    /// series and add a one-share buy-and-hold curve built from open prices.
    pub fn build(
        series: &PriceSeries,
        best_pair: WindowPair,
        benchmark_pair: WindowPair,
        kind: AverageKind,
    ) -> Result<Self, AnalysisError> {
        if series.is_empty() {
            return Err(AnalysisError::InsufficientData {
                required: 1,
                available: 0,
            });
        }

        let close = series.close_prices();
        let delta = price_delta(close);

        let best = run_crossover(close, &delta, best_pair, kind)?;
        let benchmark = run_crossover(close, &delta, benchmark_pair, kind)?;

        Ok(BacktestReport {
            symbol: series.symbol().to_string(),
            kind,
            best_pair,
            benchmark_pair,
            timestamps_ms: series.timestamps_ms().to_vec(),
            best_wealth: WealthSeries {
                label: strategy_label(kind, best_pair),
                values: best.cumulative_profit,
            },
            benchmark_wealth: WealthSeries {
                label: strategy_label(kind, benchmark_pair),
                values: benchmark.cumulative_profit,
            },
            buy_hold_wealth: WealthSeries {
                label: "Buy and Hold Strategy".to_string(),
                values: buy_and_hold(series.open_prices()),
            },
        })
    }

    pub fn title(&self) -> String {
        format!("Trading Strategy Comparison of {}", self.symbol)
    }

    /// Curves in drawing order.
    pub fn wealth_series(&self) -> [&WealthSeries; 3] {
        [
            &self.best_wealth,
            &self.benchmark_wealth,
            &self.buy_hold_wealth,
        ]
    }
}

pub fn strategy_label(kind: AverageKind, pair: WindowPair) -> String {
    format!("{}{} Strategy", kind, pair)
}

/// growth[i] = open[i+1] - open[i]; the last bar has no successor and adds nothing.
fn buy_and_hold(open: &[f64]) -> Vec<f64> {
    let growth: Vec<f64> = open
        .windows(2)
        .map(|w| w[1] - w[0])
        .chain(std::iter::once(0.0))
        .take(open.len())
        .collect();
    maths_utils::cumulative_sum(&growth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::grid_search::{SearchSpace, search};
    use crate::domain::PriceBar;
    use crate::utils::TimeUtils;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // Wavy uptrend, enough bars for the 50/200 benchmark with simple averages
    fn wavy_series(len: usize) -> PriceSeries {
        let bars = (0..len)
            .map(|i| {
                let t = i as f64;
                let close = 100.0 + 0.2 * t + 8.0 * (t / 9.0).sin() + 3.0 * (t / 23.0).cos();
                let open = close - 0.5 * (t / 4.0).sin();
                PriceBar::new(i as i64 * TimeUtils::MS_IN_D, open, close)
            })
            .collect();
        PriceSeries::new("WAVEUSDT", bars).unwrap()
    }

    #[test]
    fn buy_and_hold_tracks_open_prices() {
        let wealth = buy_and_hold(&[10.0, 12.0, 11.0, 15.0]);
        assert_eq!(wealth, vec![2.0, 1.0, 5.0, 5.0]);
        assert_eq!(buy_and_hold(&[7.0]), vec![0.0]);
        assert!(buy_and_hold(&[]).is_empty());
    }

    #[test]
    fn all_curves_align_with_the_series() {
        let series = wavy_series(260);
        let report = BacktestReport::build(
            &series,
            WindowPair::new(20, 60).unwrap(),
            WindowPair::benchmark(),
            AverageKind::Simple,
        )
        .unwrap();

        for wealth in report.wealth_series() {
            assert_eq!(wealth.values.len(), series.len());
        }
        assert_eq!(report.timestamps_ms, series.timestamps_ms());
        assert_eq!(report.best_wealth.label, "SMA20-60 Strategy");
        assert_eq!(report.benchmark_wealth.label, "SMA50-200 Strategy");
        assert_eq!(report.buy_hold_wealth.label, "Buy and Hold Strategy");
        assert_eq!(report.title(), "Trading Strategy Comparison of WAVEUSDT");

        let opens = series.open_prices();
        assert!(approx_eq(
            report.buy_hold_wealth.final_value(),
            opens[opens.len() - 1] - opens[0]
        ));
    }

    #[test]
    fn backtest_reproduces_search_scores() {
        let series = wavy_series(260);
        for kind in [AverageKind::Simple, AverageKind::Exponential] {
            let outcome = search(&series, &SearchSpace::default(), kind).unwrap();
            let report =
                BacktestReport::build(&series, outcome.best_pair(), WindowPair::benchmark(), kind)
                    .unwrap();

            assert!(approx_eq(
                report.best_wealth.final_value(),
                outcome.best.total_return
            ));

            let benchmark_score = outcome
                .candidates
                .iter()
                .find(|c| c.pair == WindowPair::benchmark())
                .unwrap();
            assert!(approx_eq(
                report.benchmark_wealth.final_value(),
                benchmark_score.total_return
            ));
        }
    }

    #[test]
    fn short_series_cannot_host_simple_benchmark() {
        let series = wavy_series(120);
        let err = BacktestReport::build(
            &series,
            WindowPair::new(13, 50).unwrap(),
            WindowPair::benchmark(),
            AverageKind::Simple,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::InvalidWindow { window: 200, .. }
        ));
    }

    #[test]
    fn empty_series_is_rejected() {
        let series = PriceSeries::empty("NONE");
        assert!(
            BacktestReport::build(
                &series,
                WindowPair::benchmark(),
                WindowPair::benchmark(),
                AverageKind::Exponential
            )
            .is_err()
        );
    }
}
