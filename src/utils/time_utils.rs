use anyhow::{Result, anyhow};
use chrono::{DateTime, Duration, Utc};

pub struct TimeUtils;

impl TimeUtils {
    pub const MS_IN_S: i64 = 1000;
    pub const MS_IN_MIN: i64 = Self::MS_IN_S * 60;
    pub const MS_IN_H: i64 = Self::MS_IN_MIN * 60;
    pub const MS_IN_4_H: i64 = Self::MS_IN_MIN * 60 * 4;
    pub const MS_IN_12_H: i64 = Self::MS_IN_MIN * 60 * 12;
    pub const MS_IN_D: i64 = Self::MS_IN_H * 24;
    pub const MS_IN_W: i64 = Self::MS_IN_D * 7;
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d";

    /// Convert interval in milliseconds to a Binance-style shorthand (e.g. `4h`, `1d`).
    pub fn interval_to_string(interval_ms: i64) -> &'static str {
        match interval_ms {
            Self::MS_IN_H => "1h",
            Self::MS_IN_4_H => "4h",
            Self::MS_IN_12_H => "12h",
            Self::MS_IN_D => "1d",
            Self::MS_IN_W => "1w",
            _ => "unknown",
        }
    }
}

/// (start_ms, end_ms) covering the last `lookback_days` up to now.
pub fn lookback_window_ms(lookback_days: i64) -> Result<(i64, i64)> {
    let end = Utc::now();
    let start = Duration::try_days(lookback_days)
        .and_then(|span| end.checked_sub_signed(span))
        .ok_or_else(|| anyhow!("Lookback of {} days is out of range", lookback_days))?;
    Ok((start.timestamp_millis(), end.timestamp_millis()))
}

pub fn epoch_ms_to_utc(epoch_ms: i64) -> String {
    // Used for display purposes
    epoch_sec_to_utc(epoch_ms / 1000)
}

pub fn epoch_sec_to_utc(epoch_sec: i64) -> String {
    // Out-of-range timestamps render as an empty label
    match DateTime::from_timestamp(epoch_sec, 0) {
        Some(dt) => dt.format(TimeUtils::STANDARD_TIME_FORMAT).to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_epoch_as_date() {
        assert_eq!(epoch_ms_to_utc(0), "1970-01-01");
        assert_eq!(epoch_ms_to_utc(TimeUtils::MS_IN_D * 31), "1970-02-01");
    }

    #[test]
    fn lookback_window_spans_requested_days() {
        let (start, end) = lookback_window_ms(1825).unwrap();
        assert_eq!(end - start, 1825 * TimeUtils::MS_IN_D);
    }

    #[test]
    fn absurd_lookback_is_an_error_not_a_panic() {
        assert!(lookback_window_ms(10_000_000_000).is_err());
        assert!(lookback_window_ms(i64::MAX).is_err());
    }

    #[test]
    fn daily_interval_has_binance_shorthand() {
        assert_eq!(TimeUtils::interval_to_string(TimeUtils::MS_IN_D), "1d");
        assert_eq!(TimeUtils::interval_to_string(123), "unknown");
    }
}
