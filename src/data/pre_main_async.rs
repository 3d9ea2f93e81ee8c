// Async code to run in main before the search and chart start

use anyhow::Result;

use crate::Cli;
use crate::analysis::AnalysisError;
use crate::config::{BINANCE, DEBUG_FLAGS};
use crate::data::prices::bnapi_version::BNAPIVersion;
use crate::data::prices::demo_version::DemoVersion;
use crate::data::prices::{CreatePriceSeries, PriceRequest, get_price_series_async};
use crate::domain::{AverageKind, PriceSeries, WindowPair};
use crate::utils::time_utils;

/// Daily candles for `symbol` covering the last `lookback_days`.
pub fn price_request(symbol: &str, lookback_days: i64) -> Result<PriceRequest> {
    let (start_ms, end_ms) = time_utils::lookback_window_ms(lookback_days)?;
    Ok(PriceRequest {
        symbol: symbol.to_string(),
        interval_ms: BINANCE.interval_ms,
        start_ms,
        end_ms,
    })
}

fn providers(args: &Cli) -> Vec<Box<dyn CreatePriceSeries>> {
    if args.demo {
        vec![Box::new(DemoVersion)]
    } else {
        vec![Box::new(BNAPIVersion)]
    }
}

// Runs before anything else, so a failed fetch is logged and handed on as an
// empty series; `require_rows` then reports it as insufficient data.
// Only a lookback that cannot be turned into dates is an error here.
pub async fn fetch_price_series(symbol: &str, args: &Cli) -> Result<PriceSeries> {
    let request = price_request(symbol, args.lookback_days)?;
    let providers = providers(args);

    match get_price_series_async(&providers, &request).await {
        Ok((series, signature)) => {
            if DEBUG_FLAGS.print_provider {
                log::info!(
                    "Retrieved {} observations of {} using: {}.",
                    series.len(),
                    symbol,
                    signature
                );
            }
            Ok(series)
        }
        Err(e) => {
            log::error!("Price fetch failed for {}: {:#}", symbol, e);
            Ok(PriceSeries::empty(symbol))
        }
    }
}

/// A failed fetch arrives as an empty series; stop here rather than search nothing.
pub fn require_rows(series: &PriceSeries) -> Result<(), AnalysisError> {
    if series.is_empty() {
        return Err(AnalysisError::InsufficientData {
            required: 1,
            available: 0,
        });
    }
    Ok(())
}

/// Simple averages cannot host the benchmark pair until its slow window is
/// filled, whatever range the search itself was narrowed to.
pub fn require_benchmark_warm_up(
    series: &PriceSeries,
    kind: AverageKind,
) -> Result<(), AnalysisError> {
    let required = WindowPair::benchmark().slow();
    if kind.needs_full_warm_up() && series.len() < required {
        return Err(AnalysisError::InsufficientData {
            required,
            available: series.len(),
        });
    }
    Ok(())
}
