use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate, Weekday};

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

pub fn require_date(s: &str) -> AppResult<NaiveDate> {
    parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

/// Expands day arguments: single dates (`2025-06-18`) and inclusive ranges
/// (`2025-06-18..2025-06-20`). Order is preserved, duplicates removed.
pub fn expand_dates(args: &[String]) -> AppResult<Vec<NaiveDate>> {
    let mut out: Vec<NaiveDate> = Vec::new();

    for arg in args {
        if let Some((from, to)) = arg.split_once("..") {
            let start = require_date(from)?;
            let end = require_date(to)?;
            if end < start {
                return Err(AppError::InvalidDate(arg.clone()));
            }
            for d in start.iter_days().take_while(|d| *d <= end) {
                if !out.contains(&d) {
                    out.push(d);
                }
            }
        } else {
            let d = require_date(arg)?;
            if !out.contains(&d) {
                out.push(d);
            }
        }
    }

    Ok(out)
}

fn weekday_long(w: Weekday) -> &'static str {
    match w {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Weekday label according to the `show_weekday` setting
/// (`None`, `Short`, `Medium`, `Long`).
pub fn weekday_label(date: NaiveDate, mode: &str) -> Option<String> {
    let long = weekday_long(date.weekday());
    match mode.to_lowercase().as_str() {
        "short" => Some(long.chars().take(2).collect()),
        "medium" => Some(long.chars().take(3).collect()),
        "long" => Some(long.to_string()),
        _ => None,
    }
}

/// `2025-06-18` or `2025-06-18 (Wed)` depending on the weekday mode.
pub fn display_date(date: NaiveDate, mode: &str) -> String {
    match weekday_label(date, mode) {
        Some(w) => format!("{} ({})", date.format("%Y-%m-%d"), w),
        None => date.format("%Y-%m-%d").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_ranges_and_deduplicates() {
        let args = vec![
            "2025-06-18..2025-06-20".to_string(),
            "2025-06-19".to_string(),
            "2025-06-25".to_string(),
        ];
        let dates = expand_dates(&args).unwrap();
        assert_eq!(dates.len(), 4);
        assert_eq!(dates[3], NaiveDate::from_ymd_opt(2025, 6, 25).unwrap());
    }

    #[test]
    fn rejects_reversed_range() {
        assert!(expand_dates(&["2025-06-20..2025-06-18".to_string()]).is_err());
    }

    #[test]
    fn weekday_modes() {
        let d = NaiveDate::from_ymd_opt(2025, 6, 18).unwrap();
        assert_eq!(display_date(d, "None"), "2025-06-18");
        assert_eq!(display_date(d, "Short"), "2025-06-18 (We)");
        assert_eq!(display_date(d, "medium"), "2025-06-18 (Wed)");
        assert_eq!(weekday_label(d, "Long").as_deref(), Some("Wednesday"));
    }
}
