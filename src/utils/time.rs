//! Time utilities: HH:MM <-> minutes since midnight, validation at the CLI
//! boundary, driving duration parsing and minutes formatting.

use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;

pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Minutes since midnight for an `HH:mm` string.
///
/// Splits on `:` and parses both halves as integers, with no range check:
/// `"25:00"` yields 1500. Anything that does not have two numeric parts,
/// or does not fit in an `i64` once converted, yields `None`.
pub fn to_minutes(hhmm: &str) -> Option<i64> {
    let (h, m) = hhmm.split_once(':')?;
    let m = m.split(':').next().unwrap_or(m);
    let hours: i64 = h.trim().parse().ok()?;
    let minutes: i64 = m.trim().parse().ok()?;
    hours.checked_mul(60)?.checked_add(minutes)
}

/// Formats minutes on a 24h clock, wrapping around midnight in both directions.
pub fn from_minutes(total_minutes: i64) -> String {
    let m = total_minutes.rem_euclid(MINUTES_PER_DAY);
    format!("{:02}:{:02}", m / 60, m % 60)
}

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M").ok()
}

/// Validates a user supplied `HH:MM` and returns it normalised (zero padded).
pub fn normalize_time(t: &str) -> AppResult<String> {
    parse_time(t.trim())
        .map(|nt| nt.format("%H:%M").to_string())
        .ok_or_else(|| AppError::InvalidTime(t.to_string()))
}

pub fn normalize_optional_time(input: Option<&String>) -> AppResult<Option<String>> {
    input.map(|s| normalize_time(s)).transpose()
}

/// Parses a driving duration into `(hours, minutes)`.
///
/// Accepted forms: `1h15m`, `1h`, `75m`, `75` (minutes) and `1:15`.
/// Minutes above 59 are carried into hours.
pub fn parse_duration(input: &str) -> AppResult<(i64, i64)> {
    let s = input.trim().to_lowercase();
    let err = || AppError::InvalidDuration(input.to_string());

    if s.is_empty() {
        return Err(err());
    }

    let total = if let Some((h, m)) = s.split_once(':') {
        let h = duration_part(h).ok_or_else(err)?;
        let m = duration_part(m).ok_or_else(err)?;
        h.checked_mul(60).and_then(|h| h.checked_add(m))
    } else if s.contains('h') || s.ends_with('m') {
        let mut total = Some(0i64);
        let mut rest = s.as_str();

        if let Some((h, after)) = rest.split_once('h') {
            total = duration_part(h).ok_or_else(err)?.checked_mul(60);
            rest = after;
        }

        let rest = rest.trim();
        if !rest.is_empty() {
            let m = rest.strip_suffix('m').ok_or_else(err)?;
            let m = duration_part(m).ok_or_else(err)?;
            total = total.and_then(|t| t.checked_add(m));
        }
        total
    } else {
        Some(duration_part(&s).ok_or_else(err)?)
    };
    let total = total.ok_or_else(err)?;

    Ok((total / 60, total % 60))
}

/// Unsigned decimal part of a duration; signs are not accepted.
fn duration_part(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn to_minutes_parses_padded_and_unpadded() {
        assert_eq!(to_minutes("00:00"), Some(0));
        assert_eq!(to_minutes("09:05"), Some(545));
        assert_eq!(to_minutes("9:5"), Some(545));
        assert_eq!(to_minutes("23:59"), Some(1439));
    }

    #[test]
    fn to_minutes_does_not_range_check() {
        assert_eq!(to_minutes("25:00"), Some(1500));
        assert_eq!(to_minutes("10:75"), Some(675));
    }

    // Malformed values have no numeric meaning; callers must only pass HH:mm.
    #[test]
    fn to_minutes_malformed_is_none() {
        assert_eq!(to_minutes("0900"), None);
        assert_eq!(to_minutes("ab:cd"), None);
        assert_eq!(to_minutes(""), None);
        assert_eq!(to_minutes("10:"), None);
    }

    #[test]
    fn from_minutes_wraps_midnight() {
        assert_eq!(from_minutes(1440), "00:00");
        assert_eq!(from_minutes(1500), "01:00");
        assert_eq!(from_minutes(2 * 1440 + 61), "01:01");
        assert_eq!(from_minutes(-15), "23:45");
    }

    #[test]
    fn parse_duration_forms() {
        assert_eq!(parse_duration("1h15m").unwrap(), (1, 15));
        assert_eq!(parse_duration("2h").unwrap(), (2, 0));
        assert_eq!(parse_duration("75m").unwrap(), (1, 15));
        assert_eq!(parse_duration("45").unwrap(), (0, 45));
        assert_eq!(parse_duration("1:30").unwrap(), (1, 30));
        assert_eq!(parse_duration(" 1H 5M ").unwrap(), (1, 5));
        assert!(parse_duration("soon").is_err());
        assert!(parse_duration("").is_err());
        assert!(parse_duration("1h15x").is_err());
        assert!(parse_duration("1:-30").is_err());
        assert!(parse_duration("2h-30m").is_err());
        assert!(parse_duration("+45").is_err());
    }

    #[test]
    fn oversized_values_do_not_overflow() {
        assert_eq!(to_minutes("999999999999999999:00"), None);
        assert_eq!(to_minutes("0:9223372036854775807"), Some(i64::MAX));
        assert!(parse_duration("999999999999999999h").is_err());
        assert!(parse_duration("153722867280912931:0").is_err());
        assert!(parse_duration("99999999999999999999").is_err());
    }

    #[test]
    fn normalize_time_pads() {
        assert_eq!(normalize_time("9:05").unwrap(), "09:05");
        assert!(normalize_time("24:00").is_err());
    }

    proptest! {
        #[test]
        fn hhmm_round_trip(h in 0i64..24, m in 0i64..60) {
            let s = format!("{:02}:{:02}", h, m);
            prop_assert_eq!(from_minutes(to_minutes(&s).unwrap()), s);
        }

        #[test]
        fn from_minutes_is_periodic(total in -10_000i64..10_000) {
            prop_assert_eq!(from_minutes(total), from_minutes(total + MINUTES_PER_DAY));
        }
    }
}
