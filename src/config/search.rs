//! Search space and backtest configuration

/// Bounds for one axis of the window grid (inclusive on both ends)
pub struct WindowBounds {
    pub min: usize,
    pub max: usize,
}

/// Rule of thumb for trend-following pairs: fast/slow must sit in this band
pub struct RatioBounds {
    pub min: f64,
    pub max: f64,
}

/// The Master Search Configuration
pub struct SearchConfig {
    // 10 days filters out short-term noise
    pub fast: WindowBounds,
    // 200 days is the usual ceiling for a long-term average
    pub slow: WindowBounds,
    pub ratio: RatioBounds,
    // Classic golden-cross pair used as the comparison strategy
    pub benchmark_fast: usize,
    pub benchmark_slow: usize,
    // How far back the price fetch reaches (5 years)
    pub lookback_days: i64,
    // Upper limit accepted for a custom lookback (100 years)
    pub max_lookback_days: i64,
}

pub const SEARCH: SearchConfig = SearchConfig {
    fast: WindowBounds { min: 10, max: 50 },
    slow: WindowBounds { min: 50, max: 200 },
    ratio: RatioBounds {
        min: 0.25,
        max: 0.50,
    },
    benchmark_fast: 50,
    benchmark_slow: 200,
    lookback_days: 1825,
    max_lookback_days: 36_500,
};
