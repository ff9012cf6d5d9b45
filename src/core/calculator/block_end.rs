//! Effective end time of a block.

use crate::models::Block;

/// Resolves the end time shown for a block.
///
/// - fixed: the stored `end_time`, verbatim (no validation);
/// - auto: the latest schedule item time (`HH:mm` strings order correctly
///   as plain strings);
/// - auto without schedule items: `None`, callers render a fallback.
///
/// Derived on every read: nothing caches the auto end time.
pub fn resolve_block_end_time(block: &Block) -> Option<&str> {
    if block.end_time_fixed {
        return Some(block.end_time.as_str());
    }

    block
        .schedule_items
        .iter()
        .map(|item| item.time.as_str())
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScheduleItem;

    fn item(time: &str) -> ScheduleItem {
        ScheduleItem {
            id: format!("s-{time}"),
            time: time.into(),
            ..Default::default()
        }
    }

    #[test]
    fn fixed_end_wins_over_schedule_items() {
        let block = Block {
            end_time: "14:30".into(),
            end_time_fixed: true,
            schedule_items: vec![item("16:00"), item("09:00")],
            ..Default::default()
        };
        assert_eq!(resolve_block_end_time(&block), Some("14:30"));
    }

    #[test]
    fn fixed_end_is_returned_verbatim_even_if_empty() {
        let block = Block {
            end_time_fixed: true,
            ..Default::default()
        };
        assert_eq!(resolve_block_end_time(&block), Some(""));
    }

    #[test]
    fn auto_end_is_latest_schedule_item() {
        let block = Block {
            end_time: "08:00".into(), // stale
            schedule_items: vec![item("09:00"), item("11:15"), item("10:00")],
            ..Default::default()
        };
        assert_eq!(resolve_block_end_time(&block), Some("11:15"));
    }

    #[test]
    fn auto_end_with_duplicate_latest_time() {
        let block = Block {
            schedule_items: vec![item("11:15"), item("09:00"), item("11:15")],
            ..Default::default()
        };
        assert_eq!(resolve_block_end_time(&block), Some("11:15"));
    }

    #[test]
    fn auto_end_without_items_is_none() {
        let block = Block {
            end_time: "17:00".into(),
            ..Default::default()
        };
        assert_eq!(resolve_block_end_time(&block), None);
    }

    #[test]
    fn edits_to_schedule_are_reflected_immediately() {
        let mut block = Block {
            schedule_items: vec![item("09:00"), item("12:00")],
            ..Default::default()
        };
        assert_eq!(resolve_block_end_time(&block), Some("12:00"));

        block.schedule_items.retain(|i| i.time != "12:00");
        assert_eq!(resolve_block_end_time(&block), Some("09:00"));

        block.schedule_items.push(item("13:45"));
        assert_eq!(resolve_block_end_time(&block), Some("13:45"));
    }
}
