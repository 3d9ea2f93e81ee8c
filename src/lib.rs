#![allow(clippy::collapsible_if)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod ui;
pub mod utils;

use std::io::{self, BufRead, Write};

use anyhow::{Result, bail};

// Re-export commonly used types
pub use analysis::{AnalysisError, BacktestReport, SearchOutcome, SearchSpace, search};
pub use data::{fetch_price_series, require_benchmark_warm_up, require_rows};
pub use domain::{AverageKind, PriceSeries, WindowPair};
pub use ui::ComparisonChartApp;

use crate::config::SEARCH;

// CLI argument parsing
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Ticker to analyse (e.g. BTCUSDT). Prompted for on stdin when omitted
    #[arg(long)]
    pub ticker: Option<String>,

    /// Moving average the crossover is built from
    #[arg(long, value_enum, default_value_t = AverageKind::Exponential)]
    pub kind: AverageKind,

    #[arg(long, default_value_t = SEARCH.fast.min as u32,
        value_parser = clap::value_parser!(u32).range(SEARCH.fast.min as i64..=SEARCH.fast.max as i64))]
    pub fast_min: u32,

    #[arg(long, default_value_t = SEARCH.fast.max as u32,
        value_parser = clap::value_parser!(u32).range(SEARCH.fast.min as i64..=SEARCH.fast.max as i64))]
    pub fast_max: u32,

    #[arg(long, default_value_t = SEARCH.slow.min as u32,
        value_parser = clap::value_parser!(u32).range(SEARCH.slow.min as i64..=SEARCH.slow.max as i64))]
    pub slow_min: u32,

    #[arg(long, default_value_t = SEARCH.slow.max as u32,
        value_parser = clap::value_parser!(u32).range(SEARCH.slow.min as i64..=SEARCH.slow.max as i64))]
    pub slow_max: u32,

    /// Days of daily candles to fetch, counting back from now
    #[arg(long, default_value_t = SEARCH.lookback_days,
        value_parser = clap::value_parser!(i64).range(1..=SEARCH.max_lookback_days))]
    pub lookback_days: i64,

    /// Also print the N best candidates
    #[arg(long, default_value_t = 0)]
    pub top: usize,

    /// Use the offline synthetic series instead of Binance
    #[arg(long, default_value_t = false)]
    pub demo: bool,

    /// Print results only; skip the comparison chart
    #[arg(long, default_value_t = false)]
    pub no_chart: bool,
}

impl Cli {
    pub fn search_space(&self) -> Result<SearchSpace, AnalysisError> {
        SearchSpace::new(
            self.fast_min as usize..=self.fast_max as usize,
            self.slow_min as usize..=self.slow_max as usize,
        )
    }

    /// `--ticker` if given, otherwise one line read from stdin.
    pub fn resolve_ticker(&self) -> Result<String> {
        let raw = match &self.ticker {
            Some(ticker) => ticker.clone(),
            None => prompt_ticker()?,
        };
        match normalize_ticker(&raw) {
            Some(ticker) => Ok(ticker),
            None => bail!("No ticker given"),
        }
    }
}

fn prompt_ticker() -> Result<String> {
    print!("Assets' Ticker: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

/// Trimmed and upper-cased; `None` when nothing is left.
pub fn normalize_ticker(raw: &str) -> Option<String> {
    let ticker = raw.trim().to_uppercase();
    if ticker.is_empty() { None } else { Some(ticker) }
}

/// Creates the chart window for a finished backtest.
/// This is the public API for the binary to call
pub fn run_app(cc: &eframe::CreationContext, report: BacktestReport) -> Box<dyn eframe::App> {
    let app = ui::ComparisonChartApp::new(cc, report);
    Box::new(app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_search_config() {
        let args = Cli::parse_from(["crossover-scout"]);
        assert_eq!(args.kind, AverageKind::Exponential);
        assert_eq!(args.search_space().unwrap(), SearchSpace::default());
        assert_eq!(args.lookback_days, 1825);
        assert_eq!(args.top, 0);
        assert!(!args.demo && !args.no_chart);
    }

    #[test]
    fn ranges_outside_bounds_are_rejected() {
        assert!(Cli::try_parse_from(["crossover-scout", "--fast-min", "5"]).is_err());
        assert!(Cli::try_parse_from(["crossover-scout", "--slow-max", "250"]).is_err());
        assert!(Cli::try_parse_from(["crossover-scout", "--lookback-days", "10000000000"]).is_err());
        assert!(Cli::try_parse_from(["crossover-scout", "--lookback-days", "0"]).is_err());
        assert!(Cli::try_parse_from(["crossover-scout", "--lookback-days", "36500"]).is_ok());
        let args =
            Cli::try_parse_from(["crossover-scout", "--kind", "sma", "--slow-max", "120"]).unwrap();
        assert_eq!(args.kind, AverageKind::Simple);
        assert_eq!(
            args.search_space().unwrap(),
            SearchSpace::new(10..=50, 50..=120).unwrap()
        );
    }

    #[test]
    fn tickers_are_trimmed_and_uppercased() {
        assert_eq!(normalize_ticker("  btcusdt\n"), Some("BTCUSDT".to_string()));
        assert_eq!(normalize_ticker(" \n"), None);

        let args = Cli::parse_from(["crossover-scout", "--ticker", "ethusdt"]);
        assert_eq!(args.resolve_ticker().unwrap(), "ETHUSDT");
    }
}
