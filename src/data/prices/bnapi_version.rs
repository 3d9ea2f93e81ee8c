pub mod bn_kline;

use anyhow::Result;
use async_trait::async_trait;
use tokio::time::Instant;

use crate::data::prices::{CreatePriceSeries, PriceRequest};
use crate::domain::{PriceBar, PriceSeries};
use crate::utils::TimeUtils;
#[cfg(debug_assertions)]
use crate::utils::time_utils;
use bn_kline::BNKline;

pub struct BNAPIVersion;

#[async_trait]
impl CreatePriceSeries for BNAPIVersion {
    fn signature(&self) -> &'static str {
        "Binance API"
    }

    async fn create_price_series(&self, request: &PriceRequest) -> Result<PriceSeries> {
        log::info!(
            "Fetching {} {} klines from Binance",
            request.symbol,
            TimeUtils::interval_to_string(request.interval_ms)
        );
        let start_time = Instant::now();

        let klines = bn_kline::load_klines(request).await?;
        let series = PriceSeries::new(request.symbol.clone(), klines_to_bars(klines))?;

        #[cfg(debug_assertions)]
        if let (Some(first), Some(last)) = (series.first_timestamp_ms(), series.last_timestamp_ms())
        {
            log::info!(
                "{} (started on {}, ended on {}) with {} klines",
                series.symbol(),
                time_utils::epoch_ms_to_utc(first),
                time_utils::epoch_ms_to_utc(last),
                series.len(),
            );
        }
        log::info!("Binance fetch completed in: {:?}", start_time.elapsed());

        Ok(series)
    }
}

/// Keep klines that carry both an open and a close; anything else is logged and dropped.
pub fn klines_to_bars(klines: Vec<BNKline>) -> Vec<PriceBar> {
    klines
        .into_iter()
        .filter_map(|kline| match (kline.open_price, kline.close_price) {
            (Some(open), Some(close)) => Some(PriceBar::new(kline.open_timestamp_ms, open, close)),
            _ => {
                log::warn!(
                    "Dropping kline at {} with missing open/close",
                    kline.open_timestamp_ms
                );
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kline(ts: i64, open: Option<f64>, close: Option<f64>) -> BNKline {
        BNKline {
            open_timestamp_ms: ts,
            open_price: open,
            close_price: close,
        }
    }

    #[test]
    fn klines_missing_prices_are_dropped() {
        let bars = klines_to_bars(vec![
            kline(1, Some(10.0), Some(11.0)),
            kline(2, None, Some(12.0)),
            kline(3, Some(12.0), None),
            kline(4, Some(12.0), Some(13.0)),
        ]);
        assert_eq!(
            bars,
            vec![PriceBar::new(1, 10.0, 11.0), PriceBar::new(4, 12.0, 13.0)]
        );
    }
}
