pub mod bnapi_version;
pub mod demo_version;

use anyhow::{Result, anyhow};
use async_trait::async_trait;

use crate::domain::PriceSeries;

/// What to fetch: one symbol, one candle width, one time window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRequest {
    pub symbol: String,
    pub interval_ms: i64,
    pub start_ms: i64,
    pub end_ms: i64,
}

#[async_trait]
pub trait CreatePriceSeries {
    // Either create a price series OR return an anyhow::error
    async fn create_price_series(&self, request: &PriceRequest) -> Result<PriceSeries>;

    /// A unique identifier for this implementation (so that afterwards we know which one we used).
    fn signature(&self) -> &'static str;
}

/// Try each provider in turn; the first non-empty series wins.
pub async fn get_price_series_async(
    implementations: &[Box<dyn CreatePriceSeries>],
    request: &PriceRequest,
) -> Result<(PriceSeries, &'static str)> {
    for imp in implementations {
        match imp.create_price_series(request).await {
            Ok(series) if !series.is_empty() => {
                let signature = imp.signature();
                return Ok((series, signature));
            }
            Ok(_) => {
                log::info!("{} returned no rows for {}", imp.signature(), request.symbol);
            }
            Err(e) => {
                log::info!("Error with an async implementation ({}): {:#}", imp.signature(), e);
                // Continue to the next implementation
            }
        }
    }
    Err(anyhow!(
        "All price providers failed to create data for {}",
        request.symbol
    ))
}
