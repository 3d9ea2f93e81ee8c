//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so release
//! builds remain quiet.

pub struct DebugFlags {
    /// Emit one log line per evaluated (fast, slow) candidate.
    pub print_candidates: bool,
    /// Emit per-request kline paging details while fetching from Binance.
    pub print_kline_paging: bool,
    /// Emit which price provider produced the series.
    pub print_provider: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_candidates: false,
    print_kline_paging: false,
    print_provider: true,
};
