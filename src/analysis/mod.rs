// Moving-average crossover search and backtest
pub mod backtest;
pub mod error;
pub mod evaluator;
pub mod grid_search;
pub mod moving_average;
pub mod signal;

// Re-export commonly used types
pub use backtest::{BacktestReport, WealthSeries};
pub use error::AnalysisError;
pub use evaluator::{StrategyOutcome, evaluate, run_crossover};
pub use grid_search::{CandidateResult, SearchOutcome, SearchSpace, search};
pub use moving_average::compute_average;
pub use signal::{Position, generate_signal, price_delta};
