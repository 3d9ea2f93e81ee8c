use itertools::Itertools;

use crate::analysis::AnalysisError;

/// One observation as delivered by a price provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBar {
    pub timestamp_ms: i64,
    pub open: f64,
    pub close: f64,
}

impl PriceBar {
    pub fn new(timestamp_ms: i64, open: f64, close: f64) -> Self {
        PriceBar {
            timestamp_ms,
            open,
            close,
        }
    }
}

// ============================================================================
// PriceSeries: chronologically sorted prices for one asset, stored by column
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct PriceSeries {
    symbol: String,
    timestamps_ms: Vec<i64>,
    open_prices: Vec<f64>,
    close_prices: Vec<f64>,
}

impl PriceSeries {
    /// Rows must be strictly ascending by timestamp (sorted, no duplicates).
    pub fn new(symbol: impl Into<String>, bars: Vec<PriceBar>) -> Result<Self, AnalysisError> {
        if let Some((index, (_, bar))) = bars
            .iter()
            .tuple_windows()
            .find_position(|(prev, next)| next.timestamp_ms <= prev.timestamp_ms)
        {
            return Err(AnalysisError::UnsortedSeries {
                index: index + 1,
                timestamp_ms: bar.timestamp_ms,
            });
        }

        Ok(PriceSeries {
            symbol: symbol.into(),
            timestamps_ms: bars.iter().map(|b| b.timestamp_ms).collect(),
            open_prices: bars.iter().map(|b| b.open).collect(),
            close_prices: bars.iter().map(|b| b.close).collect(),
        })
    }

    /// What a failed fetch hands on: a named series with zero rows.
    pub fn empty(symbol: impl Into<String>) -> Self {
        PriceSeries {
            symbol: symbol.into(),
            ..Default::default()
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn len(&self) -> usize {
        self.close_prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close_prices.is_empty()
    }

    pub fn timestamps_ms(&self) -> &[i64] {
        &self.timestamps_ms
    }

    pub fn open_prices(&self) -> &[f64] {
        &self.open_prices
    }

    pub fn close_prices(&self) -> &[f64] {
        &self.close_prices
    }

    pub fn first_timestamp_ms(&self) -> Option<i64> {
        self.timestamps_ms.first().copied()
    }

    pub fn last_timestamp_ms(&self) -> Option<i64> {
        self.timestamps_ms.last().copied()
    }
}
