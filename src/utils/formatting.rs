//! Formatting utilities used for CLI and export outputs.

use crate::models::{DrivingTime, Movement, ToTimeType};

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// `75` → `1h 15m`, `40` → `40m`, `120` → `2h`.
pub fn mins2readable(mins: i64) -> String {
    let d = DrivingTime::from_total_minutes(mins.max(0));
    match (d.hours, d.minutes) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {:02}m", h, m),
    }
}

/// Placeholder for times that cannot be derived.
pub const NO_TIME: &str = "--:--";

pub fn time_or_placeholder(t: Option<&str>) -> String {
    match t {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        _ => NO_TIME.to_string(),
    }
}

/// Short description of how a movement's arrival is determined.
pub fn describe_arrival(m: &Movement) -> String {
    match m.to_time_type {
        ToTimeType::Fixed => "fixed".to_string(),
        ToTimeType::Driving => format!("drive {}", mins2readable(m.driving_time().total_minutes())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readable_minutes() {
        assert_eq!(mins2readable(75), "1h 15m");
        assert_eq!(mins2readable(40), "40m");
        assert_eq!(mins2readable(120), "2h");
        assert_eq!(time_or_placeholder(None), "--:--");
        assert_eq!(time_or_placeholder(Some("")), "--:--");
    }
}
