//! Offline price source: a deterministic synthetic daily series.
//!
//! Lets the whole search, backtest and chart run without network access.

use anyhow::{Result, bail};
use async_trait::async_trait;

use crate::config::SEARCH;
use crate::data::prices::{CreatePriceSeries, PriceRequest};
use crate::domain::{PriceBar, PriceSeries};
use crate::utils::TimeUtils;

pub struct DemoVersion;

#[async_trait]
impl CreatePriceSeries for DemoVersion {
    fn signature(&self) -> &'static str {
        "Synthetic Demo Series"
    }

    async fn create_price_series(&self, request: &PriceRequest) -> Result<PriceSeries> {
        if request.interval_ms <= 0 || request.end_ms <= request.start_ms {
            bail!("Demo series needs a positive interval and a non-empty window");
        }
        // At most one bar per hour across the longest accepted lookback
        let max_bars = SEARCH.max_lookback_days * (TimeUtils::MS_IN_D / TimeUtils::MS_IN_H);
        if (request.end_ms - request.start_ms) / request.interval_ms > max_bars {
            bail!("Demo series is limited to {} bars", max_bars);
        }
        Ok(PriceSeries::new(
            request.symbol.clone(),
            demo_bars(request),
        )?)
    }
}

// Slow exponential drift with two overlapping cycles, so crossovers actually happen.
fn demo_close(t: f64) -> f64 {
    100.0 * (0.0004 * t).exp() + 12.0 * (t / 37.0).sin() + 5.0 * (t / 11.0).sin()
}

fn demo_bars(request: &PriceRequest) -> Vec<PriceBar> {
    let count = ((request.end_ms - request.start_ms) / request.interval_ms) as usize;
    let mut bars = Vec::with_capacity(count);
    let mut prev_close: Option<f64> = None;
    for i in 0..count {
        let close = demo_close(i as f64);
        // Opens at the previous close, like an exchange with no overnight gap
        let open = prev_close.unwrap_or(close);
        bars.push(PriceBar::new(
            request.start_ms + i as i64 * request.interval_ms,
            open,
            close,
        ));
        prev_close = Some(close);
    }
    bars
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(days: i64) -> PriceRequest {
        PriceRequest {
            symbol: "DEMO".to_string(),
            interval_ms: TimeUtils::MS_IN_D,
            start_ms: 0,
            end_ms: days * TimeUtils::MS_IN_D,
        }
    }

    #[tokio::test]
    async fn one_bar_per_interval_and_repeatable() {
        let first = DemoVersion.create_price_series(&request(1825)).await.unwrap();
        let second = DemoVersion.create_price_series(&request(1825)).await.unwrap();

        assert_eq!(first.len(), 1825);
        assert_eq!(first.close_prices(), second.close_prices());
        assert_eq!(first.timestamps_ms()[1], TimeUtils::MS_IN_D);
        assert_eq!(first.open_prices()[1], first.close_prices()[0]);
    }

    #[tokio::test]
    async fn oversized_window_is_rejected_before_allocating() {
        let request = PriceRequest {
            symbol: "DEMO".to_string(),
            interval_ms: 1,
            start_ms: 0,
            end_ms: i64::MAX,
        };
        assert!(DemoVersion.create_price_series(&request).await.is_err());
    }

    #[tokio::test]
    async fn empty_window_is_rejected() {
        assert!(DemoVersion.create_price_series(&request(0)).await.is_err());
    }
}
