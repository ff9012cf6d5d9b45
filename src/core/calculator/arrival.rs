//! Arrival time of a movement.

use crate::models::{Movement, ToTimeType};
use crate::utils::time::{from_minutes, to_minutes};

/// Resolves the arrival time of a movement.
///
/// Fixed arrivals return `to_time` verbatim. Driving arrivals add the
/// hours/minutes pair (missing parts count as zero) to the departure and wrap
/// past midnight without flagging the day change. `None` when the departure
/// is not an `HH:mm` value or the sum does not fit in an `i64`.
pub fn resolve_movement_arrival(movement: &Movement) -> Option<String> {
    match movement.to_time_type {
        ToTimeType::Fixed => Some(movement.to_time.clone()),
        ToTimeType::Driving => {
            let departure = to_minutes(&movement.from_time)?;
            let driving = movement.driving_time().checked_total_minutes()?;
            departure.checked_add(driving).map(from_minutes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driving(from: &str, hours: Option<i64>, minutes: Option<i64>) -> Movement {
        Movement {
            from_time: from.into(),
            to_time_type: ToTimeType::Driving,
            driving_time_hours: hours,
            driving_time_minutes: minutes,
            ..Default::default()
        }
    }

    #[test]
    fn fixed_arrival_is_verbatim() {
        let m = Movement {
            from_time: "09:00".into(),
            to_time_type: ToTimeType::Fixed,
            to_time: "10:15".into(),
            ..Default::default()
        };
        assert_eq!(resolve_movement_arrival(&m).as_deref(), Some("10:15"));
    }

    #[test]
    fn driving_adds_duration() {
        let m = driving("09:40", Some(1), Some(35));
        assert_eq!(resolve_movement_arrival(&m).as_deref(), Some("11:15"));
    }

    #[test]
    fn driving_wraps_past_midnight() {
        let m = driving("23:30", Some(1), Some(15));
        assert_eq!(resolve_movement_arrival(&m).as_deref(), Some("00:45"));
    }

    #[test]
    fn missing_components_count_as_zero() {
        assert_eq!(
            resolve_movement_arrival(&driving("08:00", None, Some(45))).as_deref(),
            Some("08:45")
        );
        assert_eq!(
            resolve_movement_arrival(&driving("08:00", Some(2), None)).as_deref(),
            Some("10:00")
        );
        assert_eq!(
            resolve_movement_arrival(&driving("08:00", None, None)).as_deref(),
            Some("08:00")
        );
    }

    #[test]
    fn driving_ignores_stale_to_time() {
        let mut m = driving("10:00", Some(0), Some(30));
        m.to_time = "600".into();
        assert_eq!(resolve_movement_arrival(&m).as_deref(), Some("10:30"));
    }

    #[test]
    fn malformed_departure_has_no_arrival() {
        let m = driving("soon", Some(1), Some(0));
        assert_eq!(resolve_movement_arrival(&m), None);
    }

    #[test]
    fn oversized_driving_time_has_no_arrival() {
        let m = driving("09:00", Some(i64::MAX / 2), Some(0));
        assert_eq!(resolve_movement_arrival(&m), None);

        let m = driving("09:00", Some(0), Some(i64::MAX));
        assert_eq!(resolve_movement_arrival(&m), None);
    }
}
