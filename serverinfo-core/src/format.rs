//! Display formatting shared by the screens
//!
//! Numeric fields arrive as strings with units attached. Progress values are
//! recovered by cutting the string at a separator and parsing what is left;
//! anything unparseable renders as zero instead of failing the tick.

use crate::error::ShapeError;
use chrono::{DateTime, Utc};

const MILLIS_PER_SECOND: i64 = 1_000;
const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// Integer before the first `separator`, or 0
pub fn leading_int(value: &str, separator: char) -> i32 {
    value
        .split(separator)
        .next()
        .and_then(|head| head.parse().ok())
        .unwrap_or(0)
}

/// `"73.482931"` -> 73 (CPU usage and temperature)
pub fn decimal_progress(value: &str) -> i32 {
    leading_int(value, '.')
}

/// `"5%"` -> 5 (RAM usage percent)
pub fn percent_progress(value: &str) -> i32 {
    leading_int(value, '%')
}

/// `"42.7%"` -> 42 (storage usage). Every `%` is dropped, the rest is read
/// as a float and truncated.
pub fn storage_progress(value: &str) -> i32 {
    value
        .replace('%', "")
        .trim()
        .parse::<f32>()
        .map(|percent| percent as i32)
        .unwrap_or(0)
}

/// Boot timestamp in milliseconds from `<seconds>.<fraction>`.
///
/// Only the first two fraction digits are kept and they are taken as a
/// millisecond count, so `"1700000000.123456"` gives `1700000000012`.
pub fn boot_timestamp_ms(raw: &str) -> Result<i64, ShapeError> {
    let invalid = || ShapeError::InvalidNumber {
        key: "uptime".to_string(),
        value: raw.to_string(),
    };

    let mut parts = raw.split('.');
    let seconds: i64 = parts
        .next()
        .and_then(|s| s.parse().ok())
        .ok_or_else(invalid)?;

    let fraction_millis: i64 = match parts.next() {
        Some(fraction) => {
            // "7" is 7 ms, not 700; an empty fraction is 0
            let head: String = fraction.chars().take(2).collect();
            if head.is_empty() {
                0
            } else {
                head.parse().map_err(|_| invalid())?
            }
        }
        None => 0,
    };

    seconds
        .checked_mul(MILLIS_PER_SECOND)
        .and_then(|ms| ms.checked_add(fraction_millis))
        .ok_or_else(invalid)
}

/// Milliseconds elapsed between the boot timestamp and `now`, 0 if the
/// timestamp lies in the future (clock skew between hosts)
pub fn uptime_millis(boot_ms: i64, now: DateTime<Utc>) -> i64 {
    now.timestamp_millis().saturating_sub(boot_ms).max(0)
}

/// `D:HH:MM:SS`, days unpadded
pub fn format_uptime(millis: i64) -> String {
    let days = millis / MILLIS_PER_DAY;
    let hours = millis / MILLIS_PER_HOUR % 24;
    let minutes = millis / MILLIS_PER_MINUTE % 60;
    let seconds = millis / MILLIS_PER_SECOND % 60;
    format!("{days}:{hours:02}:{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_progress_parsing() {
        assert_eq!(decimal_progress("73.482931"), 73);
        assert_eq!(decimal_progress("48"), 48);
        assert_eq!(decimal_progress("n/a"), 0);
        assert_eq!(decimal_progress(""), 0);
        assert_eq!(percent_progress("5%"), 5);
        assert_eq!(percent_progress("37.5%"), 0);
        assert_eq!(percent_progress("high"), 0);
    }

    #[test]
    fn test_storage_progress() {
        assert_eq!(storage_progress("42.7%"), 42);
        assert_eq!(storage_progress("100%"), 100);
        assert_eq!(storage_progress("9"), 9);
        assert_eq!(storage_progress("full"), 0);
    }

    #[test]
    fn test_boot_timestamp() {
        assert_eq!(boot_timestamp_ms("1700000000.123456").unwrap(), 1_700_000_000_012);
        assert_eq!(boot_timestamp_ms("1700000000").unwrap(), 1_700_000_000_000);
        assert_eq!(boot_timestamp_ms("1700000000.").unwrap(), 1_700_000_000_000);
        assert_eq!(boot_timestamp_ms("1700000000.7").unwrap(), 1_700_000_000_007);
        assert!(boot_timestamp_ms("yesterday").is_err());
        assert!(boot_timestamp_ms("1700000000.ab").is_err());
    }

    #[test]
    fn test_uptime_against_fixed_clock() {
        let boot = boot_timestamp_ms("1700000000.123456").unwrap();
        let elapsed = 3 * MILLIS_PER_DAY + 4 * MILLIS_PER_HOUR + 5 * MILLIS_PER_MINUTE + 6 * MILLIS_PER_SECOND + 789;
        let now = Utc.timestamp_millis_opt(1_700_000_000_012 + elapsed).unwrap();
        assert_eq!(uptime_millis(boot, now), elapsed);
        assert_eq!(format_uptime(uptime_millis(boot, now)), "3:04:05:06");

        let before_boot = Utc.timestamp_millis_opt(1_699_999_999_000).unwrap();
        assert_eq!(uptime_millis(boot, before_boot), 0);
    }

    #[test]
    fn test_format_uptime_padding() {
        assert_eq!(format_uptime(0), "0:00:00:00");
        assert_eq!(format_uptime(59_999), "0:00:00:59");
        assert_eq!(format_uptime(123 * MILLIS_PER_DAY + MILLIS_PER_HOUR), "123:01:00:00");
    }
}
