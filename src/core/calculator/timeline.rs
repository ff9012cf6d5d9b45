use crate::models::{Block, Day, Movement};
use crate::utils::time::to_minutes;

/// What a timeline row points at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimelineItem<'a> {
    Block(&'a Block),
    Movement(&'a Movement),
}

impl TimelineItem<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            TimelineItem::Block(_) => "block",
            TimelineItem::Movement(_) => "movement",
        }
    }

    pub fn id(&self) -> &str {
        match self {
            TimelineItem::Block(b) => &b.id,
            TimelineItem::Movement(m) => &m.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            TimelineItem::Block(b) => &b.title,
            TimelineItem::Movement(m) => &m.title,
        }
    }

    /// Raw start: block start or movement departure.
    pub fn start_time(&self) -> &str {
        match self {
            TimelineItem::Block(b) => &b.start_time,
            TimelineItem::Movement(m) => &m.from_time,
        }
    }

    /// Derived end: block end time or movement arrival.
    pub fn end_time(&self) -> Option<String> {
        match self {
            TimelineItem::Block(b) => b.effective_end_time().map(str::to_string),
            TimelineItem::Movement(m) => m.arrival_time(),
        }
    }
}

/// One row of a day's merged view.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEntry<'a> {
    pub item: TimelineItem<'a>,
    /// `None` when the start is not an `HH:mm` value.
    pub start_minutes: Option<i64>,
}

/// Merges blocks and movements of a day into chronological order.
///
/// Blocks are appended first, then movements; the sort is stable so entries
/// with the same start keep that relative order. Unparsable starts go last.
pub fn build_timeline(day: &Day) -> Vec<TimelineEntry<'_>> {
    let mut entries: Vec<TimelineEntry<'_>> =
        Vec::with_capacity(day.blocks.len() + day.movements.len());

    for block in &day.blocks {
        entries.push(TimelineEntry {
            item: TimelineItem::Block(block),
            start_minutes: to_minutes(&block.start_time),
        });
    }

    for movement in &day.movements {
        entries.push(TimelineEntry {
            item: TimelineItem::Movement(movement),
            start_minutes: to_minutes(&movement.from_time),
        });
    }

    entries.sort_by_key(|e| e.start_minutes.unwrap_or(i64::MAX));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day() -> Day {
        Day::new(
            "d1".into(),
            "e1".into(),
            NaiveDate::from_ymd_opt(2025, 6, 18).unwrap(),
        )
    }

    fn block(id: &str, start: &str) -> Block {
        Block {
            id: id.into(),
            title: id.into(),
            start_time: start.into(),
            ..Default::default()
        }
    }

    fn movement(id: &str, from: &str) -> Movement {
        Movement {
            id: id.into(),
            title: id.into(),
            from_time: from.into(),
            ..Default::default()
        }
    }

    fn ids(entries: &[TimelineEntry<'_>]) -> Vec<String> {
        entries.iter().map(|e| e.item.id().to_string()).collect()
    }

    #[test]
    fn empty_day_has_empty_timeline() {
        assert!(build_timeline(&day()).is_empty());
    }

    #[test]
    fn earlier_movement_comes_before_block() {
        let mut d = day();
        d.blocks.push(block("visit", "10:00"));
        d.movements.push(movement("transfer", "09:00"));

        let t = build_timeline(&d);
        assert_eq!(ids(&t), ["transfer", "visit"]);
        assert_eq!(t[0].item.kind(), "movement");
        assert_eq!(t[0].start_minutes, Some(540));
        assert_eq!(t[1].item.kind(), "block");
    }

    #[test]
    fn equal_starts_keep_insertion_order() {
        let mut d = day();
        d.blocks.push(block("first", "09:00"));
        d.blocks.push(block("second", "09:00"));
        d.movements.push(movement("bus", "09:00"));
        d.blocks.push(block("early", "08:00"));

        assert_eq!(ids(&build_timeline(&d)), ["early", "first", "second", "bus"]);
    }

    #[test]
    fn compares_numerically_not_lexically() {
        let mut d = day();
        d.blocks.push(block("late", "10:00"));
        d.blocks.push(block("unpadded", "9:30"));

        assert_eq!(ids(&build_timeline(&d)), ["unpadded", "late"]);
    }

    #[test]
    fn unparsable_starts_go_last() {
        let mut d = day();
        d.blocks.push(block("broken", "tbd"));
        d.movements.push(movement("m", "23:00"));

        let t = build_timeline(&d);
        assert_eq!(ids(&t), ["m", "broken"]);
        assert_eq!(t[1].start_minutes, None);
    }

    #[test]
    fn end_times_are_derived() {
        let mut d = day();
        let mut b = block("b", "10:00");
        b.set_fixed_end("11:00".into());
        d.blocks.push(b);
        let mut m = movement("m", "12:00");
        m.set_driving_time(crate::models::DrivingTime::new(0, 45));
        d.movements.push(m);

        let t = build_timeline(&d);
        assert_eq!(t[0].item.end_time().as_deref(), Some("11:00"));
        assert_eq!(t[1].item.end_time().as_deref(), Some("12:45"));
    }
}
