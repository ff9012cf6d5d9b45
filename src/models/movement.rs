use super::null_as_default;
use crate::core::calculator::arrival::resolve_movement_arrival;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToTimeType {
    #[default]
    Fixed,
    Driving,
}

impl ToTimeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToTimeType::Fixed => "fixed",
            ToTimeType::Driving => "driving",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "fixed" => Some(ToTimeType::Fixed),
            "driving" => Some(ToTimeType::Driving),
            _ => None,
        }
    }
}

/// Driving duration split in hours and minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrivingTime {
    pub hours: i64,
    pub minutes: i64,
}

impl DrivingTime {
    pub fn new(hours: i64, minutes: i64) -> Self {
        Self { hours, minutes }
    }

    pub fn from_total_minutes(total: i64) -> Self {
        Self {
            hours: total.div_euclid(60),
            minutes: total.rem_euclid(60),
        }
    }

    /// Saturates instead of overflowing; see `checked_total_minutes`.
    pub fn total_minutes(&self) -> i64 {
        self.hours.saturating_mul(60).saturating_add(self.minutes)
    }

    /// `None` when the pair does not fit in an `i64` of minutes.
    pub fn checked_total_minutes(&self) -> Option<i64> {
        self.hours.checked_mul(60)?.checked_add(self.minutes)
    }

    /// Persisted form of a driving `toTime`: the total minutes as a string.
    pub fn encode(&self) -> String {
        self.total_minutes().to_string()
    }

    /// Reads a persisted minutes string; unparsable values count as zero.
    pub fn decode(to_time: &str) -> Self {
        Self::from_total_minutes(to_time.trim().parse().unwrap_or(0))
    }
}

/// Vehicle, driver and passengers for one movement leg.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleAssignment {
    pub vehicle_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub participant_ids: Vec<String>,
}

impl VehicleAssignment {
    pub fn involves(&self, participant_id: &str) -> bool {
        self.driver_id.as_deref() == Some(participant_id)
            || self.participant_ids.iter().any(|p| p == participant_id)
    }

    pub fn passenger_count(&self) -> usize {
        self.participant_ids.len()
    }
}

/// Transit between two locations.
///
/// `to_time` holds `HH:mm` for fixed arrivals and the total driving minutes
/// (as a string) for driving arrivals; in the latter case the hours/minutes
/// pair is authoritative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub from_location_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub to_location_id: String,
    pub from_time: String, // HH:mm
    #[serde(default)]
    pub to_time_type: ToTimeType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub to_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driving_time_hours: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driving_time_minutes: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vehicle_assignments: Vec<VehicleAssignment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Movement {
    /// Driving duration with missing components counted as zero.
    pub fn driving_time(&self) -> DrivingTime {
        DrivingTime::new(
            self.driving_time_hours.unwrap_or(0),
            self.driving_time_minutes.unwrap_or(0),
        )
    }

    pub fn set_driving_time(&mut self, driving: DrivingTime) {
        self.to_time_type = ToTimeType::Driving;
        self.driving_time_hours = Some(driving.hours);
        self.driving_time_minutes = Some(driving.minutes);
        self.to_time = driving.encode();
    }

    pub fn set_fixed_arrival(&mut self, arrival: String) {
        self.to_time_type = ToTimeType::Fixed;
        self.to_time = arrival;
        self.driving_time_hours = None;
        self.driving_time_minutes = None;
    }

    /// Load boundary: a driving movement that only carries the minutes
    /// string gets its hours/minutes pair derived from it.
    pub fn normalize_driving_fields(&mut self) {
        if self.to_time_type == ToTimeType::Driving
            && self.driving_time_hours.is_none()
            && self.driving_time_minutes.is_none()
        {
            let d = DrivingTime::decode(&self.to_time);
            self.driving_time_hours = Some(d.hours);
            self.driving_time_minutes = Some(d.minutes);
        }
    }

    /// Save boundary: re-encode `to_time` from the hours/minutes pair.
    pub fn sync_to_time(&mut self) {
        if self.to_time_type == ToTimeType::Driving {
            self.to_time = self.driving_time().encode();
        }
    }

    pub fn arrival_time(&self) -> Option<String> {
        resolve_movement_arrival(self)
    }

    /// Driver or passenger in any assignment.
    pub fn involves(&self, participant_id: &str) -> bool {
        self.vehicle_assignments
            .iter()
            .any(|va| va.involves(participant_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_derives_hours_and_minutes_from_minutes_string() {
        let mut m = Movement {
            from_time: "08:00".into(),
            to_time_type: ToTimeType::Driving,
            to_time: "135".into(),
            ..Default::default()
        };
        m.normalize_driving_fields();
        assert_eq!(m.driving_time_hours, Some(2));
        assert_eq!(m.driving_time_minutes, Some(15));
    }

    #[test]
    fn oversized_pair_saturates_when_encoded() {
        let d = DrivingTime::new(400_000_000_000_000_000, 0);
        assert_eq!(d.checked_total_minutes(), None);
        assert_eq!(d.total_minutes(), i64::MAX);
        assert_eq!(DrivingTime::new(1, 15).checked_total_minutes(), Some(75));
    }

    #[test]
    fn load_keeps_existing_pair() {
        let mut m = Movement {
            to_time_type: ToTimeType::Driving,
            to_time: "999".into(),
            driving_time_minutes: Some(40),
            ..Default::default()
        };
        m.normalize_driving_fields();
        assert_eq!(m.driving_time_hours, None);
        assert_eq!(m.driving_time(), DrivingTime::new(0, 40));
    }

    #[test]
    fn save_reencodes_to_time_from_pair() {
        let mut m = Movement {
            to_time_type: ToTimeType::Driving,
            to_time: "stale".into(),
            driving_time_hours: Some(1),
            driving_time_minutes: Some(15),
            ..Default::default()
        };
        m.sync_to_time();
        assert_eq!(m.to_time, "75");
    }

    #[test]
    fn fixed_arrival_clears_driving_pair() {
        let mut m = Movement::default();
        m.set_driving_time(DrivingTime::new(0, 50));
        assert_eq!(m.to_time, "50");
        m.set_fixed_arrival("11:00".into());
        assert_eq!(m.to_time_type, ToTimeType::Fixed);
        assert_eq!(m.driving_time_hours, None);
        assert_eq!(m.to_time, "11:00");
    }

    #[test]
    fn assignment_involvement() {
        let va = VehicleAssignment {
            vehicle_id: "v1".into(),
            driver_id: Some("d".into()),
            participant_ids: vec!["p".into()],
        };
        assert!(va.involves("d"));
        assert!(va.involves("p"));
        assert!(!va.involves("x"));
    }

    #[test]
    fn deserializes_null_assignments() {
        let json = r#"{"id":"m1","title":"Transfer","fromTime":"09:00",
                       "toTimeType":"driving","toTime":"30","vehicleAssignments":null}"#;
        let m: Movement = serde_json::from_str(json).unwrap();
        assert!(m.vehicle_assignments.is_empty());
        assert_eq!(m.to_time_type, ToTimeType::Driving);
    }
}
