// Std library crates
use std::collections::HashSet;
use std::convert::TryFrom;
use std::error::Error;
use std::fmt;
use std::time::SystemTime;

// External crates
use anyhow::{Result, anyhow, bail};
use binance_sdk::common::models::Interval as binance_interval;
use binance_sdk::config::ConfigurationRestApi;
use binance_sdk::models::RestApiRateLimit;
use binance_sdk::spot::{
    SpotRestApi,
    rest_api::{KlinesIntervalEnum, KlinesItemInner, KlinesParams, RestApi},
};
use binance_sdk::{errors, errors::ConnectorError as connection_error};
use tokio::time::{Duration, sleep};

// Local crates
use crate::config::DEBUG_FLAGS;
use crate::config::binance::{BINANCE, BinanceApiConfig};
use crate::data::prices::PriceRequest;
use crate::utils::TimeUtils;

/// MS -> Binance interval; only the candle widths this tool can be pointed at.
pub fn try_interval_from_ms(ms: i64) -> Result<KlinesIntervalEnum, String> {
    match ms {
        TimeUtils::MS_IN_H => Ok(KlinesIntervalEnum::Interval1h),
        TimeUtils::MS_IN_4_H => Ok(KlinesIntervalEnum::Interval4h),
        TimeUtils::MS_IN_12_H => Ok(KlinesIntervalEnum::Interval12h),
        TimeUtils::MS_IN_D => Ok(KlinesIntervalEnum::Interval1d),
        TimeUtils::MS_IN_W => Ok(KlinesIntervalEnum::Interval1w),
        _ => Err(format!("Unsupported interval: {}ms", ms)),
    }
}

#[derive(Debug, PartialEq)]
pub struct BNKline {
    pub open_timestamp_ms: i64, // only necessary field. Prices may fail to parse
    pub open_price: Option<f64>,
    pub close_price: Option<f64>,
}

// Custom error type for BNKline for better error messages.
#[derive(Debug)]
pub enum KlineFetchError {
    InvalidLength,
    InvalidType(String),
    ConnectionFailed(String),
}

impl fmt::Display for KlineFetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            KlineFetchError::InvalidLength => write!(f, "Invalid length"),
            KlineFetchError::InvalidType(string) => write!(f, "Invalid type: {}", string),
            KlineFetchError::ConnectionFailed(msg) => {
                write!(f, "Binance API connection failed: {}.", msg)
            }
        }
    }
}

impl Error for KlineFetchError {}

// Binance sends prices as strings; anything else (or an unparsable string) becomes None
fn kline_item_to_float(item: Option<KlinesItemInner>) -> Option<f64> {
    item.and_then(|inner| {
        if let KlinesItemInner::String(s) = inner {
            s.parse::<f64>().ok()
        } else {
            None
        }
    })
}

impl TryFrom<Vec<KlinesItemInner>> for BNKline {
    type Error = KlineFetchError;

    fn try_from(vec_inner_klines: Vec<KlinesItemInner>) -> Result<Self, Self::Error> {
        // [open_time, open, high, low, close, volume, close_time, ...]
        let mut items = vec_inner_klines.into_iter();
        let open_timestamp_ms = match items.next().ok_or(KlineFetchError::InvalidLength)? {
            KlinesItemInner::Integer(a) => a,
            _ => return Err(KlineFetchError::InvalidType("open_time".to_string())),
        };

        let open_price = kline_item_to_float(items.next());
        let _high = items.next();
        let _low = items.next();
        let close_price = kline_item_to_float(items.next());

        Ok(BNKline {
            open_timestamp_ms,
            open_price,
            close_price,
        })
    }
}

fn convert_klines(data: Vec<Vec<KlinesItemInner>>) -> Result<Vec<BNKline>, KlineFetchError> {
    data.into_iter().map(Vec::try_into).collect()
}

async fn configure_binance_client() -> Result<RestApi, anyhow::Error> {
    let config = BinanceApiConfig::default();
    let rest_conf = ConfigurationRestApi::builder()
        .timeout(config.timeout_ms)
        .retries(config.retries)
        .backoff(config.backoff_ms)
        .build()?;
    // Create the Spot REST API client
    let rest_client = SpotRestApi::production(rest_conf);
    Ok(rest_client)
}

// Sleeps to the top of the next minute when the used weight leaves no room for another call
async fn handle_rate_limits(
    rate_limits: &Option<Vec<RestApiRateLimit>>,
    symbol: &str,
) -> Result<(), anyhow::Error> {
    let Some(value) = rate_limits else {
        return Ok(());
    };
    let required_headroom = BINANCE
        .limits
        .weight_limit_minute
        .saturating_sub(BINANCE.limits.kline_call_weight);

    for rate_limit in value {
        if rate_limit.interval_num == 1 && rate_limit.interval == binance_interval::Minute {
            let current_weight = rate_limit.count;
            if current_weight > required_headroom {
                let secs_into_min = SystemTime::now()
                    .duration_since(SystemTime::UNIX_EPOCH)
                    .map(|d| d.as_secs() % 60)
                    .unwrap_or(0);
                let sleep_duration = Duration::from_secs(60 - secs_into_min);
                log::info!(
                    "{} Current weight ({}) > required headroom ({}), sleeping {:?}",
                    symbol,
                    current_weight,
                    required_headroom,
                    sleep_duration
                );
                sleep(sleep_duration).await;
            }
        }
    }
    Ok(())
}

async fn fetch_binance_klines_with_limits(
    rest_client: &RestApi,
    params: KlinesParams,
    symbol: &str,
) -> Result<(Option<Vec<RestApiRateLimit>>, Vec<Vec<KlinesItemInner>>), anyhow::Error> {
    let response_result = rest_client.klines(params).await;

    match response_result {
        Ok(r) => {
            // Take the rate_limits (Option<Vec<...>>) from the response, then get the inner data
            let rate_limits = r.rate_limits.clone();
            let data = r.data().await?;
            Ok((rate_limits, data))
        }
        Err(e) => {
            if let Some(conn_err) = e.downcast_ref::<errors::ConnectorError>() {
                match conn_err {
                    connection_error::ConnectorClientError(msg) => {
                        log::error!(
                            "{} Client error: Check your request parameters. {}",
                            symbol,
                            msg
                        );
                    }
                    connection_error::TooManyRequestsError(msg) => {
                        log::error!(
                            "{} Rate limit exceeded. Please wait and try again. {}",
                            symbol,
                            msg
                        );
                    }
                    connection_error::RateLimitBanError(msg) => {
                        log::error!(
                            "{} IP address banned due to excessive rate limits. {}",
                            symbol,
                            msg
                        );
                    }
                    errors::ConnectorError::ServerError { msg, status_code } => {
                        log::error!(
                            "{} Server error: {} (status code: {:?})",
                            symbol,
                            msg,
                            status_code
                        );
                    }
                    errors::ConnectorError::NetworkError(msg) => {
                        log::error!(
                            "{} Network error: Check your internet connection. {}",
                            symbol,
                            msg
                        );
                    }
                    errors::ConnectorError::NotFoundError(msg) => {
                        log::error!("{} Resource not found. {}", symbol, msg);
                    }
                    connection_error::BadRequestError(msg) => {
                        // Unknown tickers land here ("Invalid symbol.")
                        log::error!(
                            "{} Bad request: Verify the ticker symbol. {}",
                            symbol,
                            msg
                        );
                    }
                    other => {
                        log::error!("Unexpected ConnectionError variant: {:?}", other);
                    }
                }
                Err(
                    anyhow::Error::new(KlineFetchError::ConnectionFailed(conn_err.to_string()))
                        .context(format!("Binance API call failed for {}", symbol)),
                )
            } else {
                log::error!("An unexpected error occurred for {}: {:#}", symbol, e);
                Err(
                    anyhow::Error::new(KlineFetchError::ConnectionFailed(e.to_string()))
                        .context(format!("Unexpected error during API call for {}", symbol)),
                )
            }
        }
    }
}

// One page of at most `klines_limit` candles starting at `start_time`
fn page_params(request: &PriceRequest, start_time: i64) -> Result<KlinesParams, anyhow::Error> {
    let params = KlinesParams::builder(
        request.symbol.clone(),
        try_interval_from_ms(request.interval_ms).map_err(|e| anyhow!(e))?,
    )
    .limit(BINANCE.limits.klines_limit)
    .start_time(Some(start_time))
    .end_time(Some(request.end_ms))
    .build()?;
    Ok(params)
}

/// All klines for `request`, oldest first, paging forward from `start_ms`.
pub async fn load_klines(request: &PriceRequest) -> Result<Vec<BNKline>, anyhow::Error> {
    let rest_client = configure_binance_client().await?;
    let limit = BINANCE.limits.klines_limit;

    let mut start_time = request.start_ms;
    let mut all_klines: Vec<BNKline> = Vec::new();

    while start_time < request.end_ms {
        let params = page_params(request, start_time)?;

        let (rate_limits, new_klines) =
            fetch_binance_klines_with_limits(&rest_client, params, &request.symbol).await?;
        handle_rate_limits(&rate_limits, &request.symbol).await?;

        let batch = convert_klines(new_klines).map_err(|e| {
            anyhow::Error::new(e).context(format!("{} convert_klines failed", request.symbol))
        })?;
        let received = batch.len();
        if DEBUG_FLAGS.print_kline_paging {
            log::info!(
                "{} page from {} returned {} klines",
                request.symbol,
                start_time,
                received
            );
        }

        match batch.last() {
            // startTime is inclusive on Binance, so step past the last candle we hold
            Some(last) => start_time = last.open_timestamp_ms + request.interval_ms,
            None => break,
        }
        all_klines.extend(batch);

        if received < limit as usize {
            break;
        }
    }

    if has_duplicate_kline_open_time(&all_klines) {
        bail!(
            "has_duplicate_kline_open_time() failed for {} so bailing load_klines()!",
            request.symbol
        );
    }
    Ok(all_klines)
}

fn has_duplicate_kline_open_time(klines: &[BNKline]) -> bool {
    let mut seen_ids = HashSet::new();
    klines
        .iter()
        .any(|kline| !seen_ids.insert(kline.open_timestamp_ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_kline(ts: i64, open: &str, close: &str) -> Vec<KlinesItemInner> {
        vec![
            KlinesItemInner::Integer(ts),
            KlinesItemInner::String(open.to_string()),
            KlinesItemInner::String("0".to_string()),
            KlinesItemInner::String("0".to_string()),
            KlinesItemInner::String(close.to_string()),
        ]
    }

    #[test]
    fn parses_open_time_open_and_close() {
        let kline = BNKline::try_from(raw_kline(1_700_000_000_000, "42.5", "43.25")).unwrap();
        assert_eq!(
            kline,
            BNKline {
                open_timestamp_ms: 1_700_000_000_000,
                open_price: Some(42.5),
                close_price: Some(43.25),
            }
        );
    }

    #[test]
    fn unparsable_price_becomes_none() {
        let kline = BNKline::try_from(raw_kline(1, "n/a", "1.0")).unwrap();
        assert_eq!(kline.open_price, None);
        assert_eq!(kline.close_price, Some(1.0));
    }

    #[test]
    fn empty_row_is_invalid() {
        assert!(matches!(
            BNKline::try_from(Vec::new()),
            Err(KlineFetchError::InvalidLength)
        ));
    }

    #[test]
    fn duplicate_open_times_are_detected() {
        let make = |ts| BNKline {
            open_timestamp_ms: ts,
            open_price: Some(1.0),
            close_price: Some(1.0),
        };
        assert!(!has_duplicate_kline_open_time(&[make(1), make(2)]));
        assert!(has_duplicate_kline_open_time(&[make(1), make(2), make(1)]));
    }

    #[test]
    fn every_page_gets_its_own_params() {
        let request = PriceRequest {
            symbol: "BTCUSDT".to_string(),
            interval_ms: TimeUtils::MS_IN_D,
            start_ms: 0,
            end_ms: 3000 * TimeUtils::MS_IN_D,
        };
        let mut start_time = request.start_ms;
        while start_time < request.end_ms {
            assert!(page_params(&request, start_time).is_ok());
            start_time += 1000 * TimeUtils::MS_IN_D;
        }

        let odd_interval = PriceRequest {
            interval_ms: 1234,
            ..request
        };
        assert!(page_params(&odd_interval, 0).is_err());
    }

    #[test]
    fn daily_interval_maps_to_binance_enum() {
        assert!(matches!(
            try_interval_from_ms(TimeUtils::MS_IN_D),
            Ok(KlinesIntervalEnum::Interval1d)
        ));
        assert!(try_interval_from_ms(1234).is_err());
    }
}
