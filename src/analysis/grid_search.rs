use std::ops::RangeInclusive;

use itertools::{Itertools, iproduct};

use crate::analysis::AnalysisError;
use crate::analysis::evaluator::run_crossover;
use crate::analysis::signal::price_delta;
use crate::config::search::WindowBounds;
use crate::config::{DEBUG_FLAGS, SEARCH};
use crate::domain::{AverageKind, PriceSeries, WindowPair};

// ============================================================================
// SearchSpace: the (fast, slow) grid before and after the ratio filter
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSpace {
    pub fast: RangeInclusive<usize>,
    pub slow: RangeInclusive<usize>,
}

impl Default for SearchSpace {
    fn default() -> Self {
        SearchSpace {
            fast: SEARCH.fast.min..=SEARCH.fast.max,
            slow: SEARCH.slow.min..=SEARCH.slow.max,
        }
    }
}

impl SearchSpace {
    /// Both ranges must sit inside the configured fast/slow bounds.
    pub fn new(
        fast: RangeInclusive<usize>,
        slow: RangeInclusive<usize>,
    ) -> Result<Self, AnalysisError> {
        check_bounds("fast", &fast, &SEARCH.fast)?;
        check_bounds("slow", &slow, &SEARCH.slow)?;
        Ok(SearchSpace { fast, slow })
    }

    /// Pairs that pass the ratio rule, fast-major then slow-minor.
    /// This order decides ties in `search`.
    pub fn pairs(&self) -> Vec<WindowPair> {
        iproduct!(self.fast.clone(), self.slow.clone())
            .filter_map(|(fast, slow)| WindowPair::new(fast, slow).ok())
            .collect()
    }

    fn empty_error(&self) -> AnalysisError {
        AnalysisError::EmptySearchSpace {
            fast: (*self.fast.start(), *self.fast.end()),
            slow: (*self.slow.start(), *self.slow.end()),
        }
    }
}

fn check_bounds(
    axis: &'static str,
    range: &RangeInclusive<usize>,
    bounds: &WindowBounds,
) -> Result<(), AnalysisError> {
    if *range.start() < bounds.min || *range.end() > bounds.max {
        return Err(AnalysisError::RangeOutOfBounds {
            axis,
            range: (*range.start(), *range.end()),
            bounds: (bounds.min, bounds.max),
        });
    }
    Ok(())
}

// ============================================================================
// Results
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateResult {
    pub pair: WindowPair,
    pub total_return: f64,
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub symbol: String,
    pub kind: AverageKind,
    pub best: CandidateResult,
    /// Every evaluated pair in enumeration order.
    pub candidates: Vec<CandidateResult>,
}

impl SearchOutcome {
    pub fn best_pair(&self) -> WindowPair {
        self.best.pair
    }

    /// The `n` highest returns, best first. Equal returns keep enumeration order.
    pub fn leaderboard(&self, n: usize) -> Vec<CandidateResult> {
        self.candidates
            .iter()
            .copied()
            .sorted_by(|a, b| b.total_return.total_cmp(&a.total_return))
            .take(n)
            .collect()
    }

    /// The one line printed once the search has finished.
    pub fn summary_line(&self) -> String {
        format!(
            "Best {} pair for {}: short {}-day, long {}-day, total return ${:.2}",
            self.kind.long_name(),
            self.symbol,
            self.best.pair.fast(),
            self.best.pair.slow(),
            self.best.total_return
        )
    }
}

// ============================================================================
// The search
// ============================================================================

/// Score every pair in `space` on the close column of `series` and keep the best.
///
/// The best candidate is the first one (in enumeration order) holding the
/// maximum total return, so flat or degenerate series give a stable answer.
pub fn search(
    series: &PriceSeries,
    space: &SearchSpace,
    kind: AverageKind,
) -> Result<SearchOutcome, AnalysisError> {
    let pairs = space.pairs();
    let largest_slow = match pairs.iter().map(WindowPair::slow).max() {
        Some(slow) => slow,
        None => return Err(space.empty_error()),
    };

    let required = if kind.needs_full_warm_up() {
        largest_slow
    } else {
        1
    };
    if series.len() < required {
        return Err(AnalysisError::InsufficientData {
            required,
            available: series.len(),
        });
    }

    log::info!(
        "Searching {} {} window pairs over {} observations of {}",
        pairs.len(),
        kind,
        series.len(),
        series.symbol()
    );

    let close = series.close_prices();
    let delta = price_delta(close);

    let mut candidates = Vec::with_capacity(pairs.len());
    let mut best: Option<CandidateResult> = None;
    for pair in pairs {
        let outcome = run_crossover(close, &delta, pair, kind)?;
        let candidate = CandidateResult {
            pair,
            total_return: outcome.total_return,
        };

        if DEBUG_FLAGS.print_candidates {
            if outcome.traded() {
                log::debug!(
                    "{}{}: total return {:.4} ({} long periods)",
                    kind,
                    pair,
                    outcome.total_return,
                    outcome.long_periods
                );
            } else {
                log::debug!("{}{}: never long", kind, pair);
            }
        }

        // Strictly greater: the earliest of equal returns stays best
        match best {
            Some(current) if candidate.total_return <= current.total_return => {}
            _ => best = Some(candidate),
        }
        candidates.push(candidate);
    }

    let best = best.ok_or_else(|| space.empty_error())?;
    Ok(SearchOutcome {
        symbol: series.symbol().to_string(),
        kind,
        best,
        candidates,
    })
}
