//! Participant-side views: which days, blocks and movements a participant
//! is involved in, and their personal agenda across all days.

use crate::models::{Block, Day};
use crate::utils::time::to_minutes;
use chrono::NaiveDate;
use serde::Serialize;

/// One block of a participant's personal agenda.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgendaItem {
    pub day_id: String,
    pub date: NaiveDate,
    pub block: Block,
}

/// Involved through any block list or as driver/passenger of any movement.
pub fn is_involved_in_day(day: &Day, participant_id: &str) -> bool {
    day.blocks.iter().any(|b| b.involves(participant_id))
        || day.movements.iter().any(|m| m.involves(participant_id))
}

/// The participant's copy of a day, or `None` when they take no part in it.
///
/// Keeps only the blocks and movements the participant is involved in, and
/// on those movements only the vehicle assignments they drive or ride in.
pub fn participant_view(day: &Day, participant_id: &str) -> Option<Day> {
    if !is_involved_in_day(day, participant_id) {
        return None;
    }

    let mut view = Day::new(day.id.clone(), day.event_id.clone(), day.date);

    view.blocks = day
        .blocks
        .iter()
        .filter(|b| b.involves(participant_id))
        .cloned()
        .collect();

    view.movements = day
        .movements
        .iter()
        .filter(|m| m.involves(participant_id))
        .cloned()
        .map(|mut m| {
            m.vehicle_assignments
                .retain(|va| va.involves(participant_id));
            m
        })
        .collect();

    Some(view)
}

/// All involved blocks, ordered by date then start time.
pub fn agenda(days: &[Day], participant_id: &str) -> Vec<AgendaItem> {
    let mut items: Vec<AgendaItem> = days
        .iter()
        .flat_map(|d| {
            d.blocks
                .iter()
                .filter(|b| b.involves(participant_id))
                .map(move |b| AgendaItem {
                    day_id: d.id.clone(),
                    date: d.date,
                    block: b.clone(),
                })
        })
        .collect();

    items.sort_by_key(|i| (i.date, to_minutes(&i.block.start_time).unwrap_or(i64::MAX)));
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Movement, VehicleAssignment};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn block(id: &str, start: &str, participants: &[&str]) -> Block {
        Block {
            id: id.into(),
            title: id.into(),
            start_time: start.into(),
            participants_ids: participants.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn shuttle(driver: &str, passengers: &[&str], vehicle: &str) -> VehicleAssignment {
        VehicleAssignment {
            vehicle_id: vehicle.into(),
            driver_id: Some(driver.into()),
            participant_ids: passengers.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn sample_day() -> Day {
        let mut d = Day::new("d1".into(), "e1".into(), date(18));
        d.blocks.push(block("breakfast", "08:00", &["ana", "bo"]));
        d.blocks.push(block("press", "11:00", &["bo"]));
        let mut advance = block("venue-check", "07:00", &[]);
        advance.advance_participant_ids.push("cy".into());
        d.blocks.push(advance);
        d.movements.push(Movement {
            id: "m1".into(),
            title: "To venue".into(),
            from_time: "09:00".into(),
            vehicle_assignments: vec![
                shuttle("dan", &["ana"], "van-a"),
                shuttle("eve", &["bo"], "van-b"),
            ],
            ..Default::default()
        });
        d
    }

    #[test]
    fn outsider_gets_no_view() {
        assert!(participant_view(&sample_day(), "zed").is_none());
    }

    #[test]
    fn view_keeps_only_own_items_and_assignments() {
        let v = participant_view(&sample_day(), "ana").unwrap();
        assert_eq!(v.blocks.len(), 1);
        assert_eq!(v.blocks[0].id, "breakfast");
        assert_eq!(v.movements.len(), 1);
        assert_eq!(v.movements[0].vehicle_assignments.len(), 1);
        assert_eq!(v.movements[0].vehicle_assignments[0].vehicle_id, "van-a");
    }

    #[test]
    fn driver_sees_movement_but_no_blocks() {
        let v = participant_view(&sample_day(), "eve").unwrap();
        assert!(v.blocks.is_empty());
        assert_eq!(v.movements[0].vehicle_assignments[0].vehicle_id, "van-b");
    }

    #[test]
    fn advance_party_counts_as_involvement() {
        assert!(is_involved_in_day(&sample_day(), "cy"));
    }

    #[test]
    fn agenda_orders_by_date_then_start() {
        let mut later = Day::new("d2".into(), "e1".into(), date(19));
        later.blocks.push(block("dinner", "20:00", &["bo"]));
        later.blocks.push(block("museum", "9:30", &["bo"]));

        let days = vec![later, sample_day()];
        let ids: Vec<String> = agenda(&days, "bo")
            .into_iter()
            .map(|i| i.block.id)
            .collect();

        assert_eq!(ids, ["breakfast", "press", "museum", "dinner"]);
    }
}
