use crate::core::day::DayLogic;
use crate::db::blocks::{
    block_id_for_item, delete_block, insert_block, load_block, next_block_position, update_block,
};
use crate::db::locations::load_location;
use crate::db::log::ttlog_soft;
use crate::db::participants::participant_exists;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::{Block, BlockType, ScheduleItem, new_id};
use rusqlite::Connection;

/// What to do with a block's end time.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EndChange {
    #[default]
    Keep,
    Fixed(String),
    Auto,
}

/// Field changes for adding or editing a block. `None` leaves a field as is;
/// an empty location id clears the location.
#[derive(Debug, Clone, Default)]
pub struct BlockInput {
    pub block_type: Option<BlockType>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_time: Option<String>,
    pub end: EndChange,
    pub location_id: Option<String>,
    pub participants: Option<Vec<String>>,
    pub advance: Option<Vec<String>>,
    pub met_by: Option<Vec<String>>,
    pub attachments: Option<Vec<String>>,
    pub notes: Option<String>,
}

impl BlockInput {
    fn apply(self, block: &mut Block) {
        if let Some(t) = self.block_type {
            block.block_type = t;
        }
        if let Some(t) = self.title {
            block.title = t;
        }
        if let Some(d) = self.description {
            block.description = Some(d).filter(|s| !s.is_empty());
        }
        if let Some(s) = self.start_time {
            block.start_time = s;
        }
        match self.end {
            EndChange::Keep => {}
            EndChange::Fixed(e) => block.set_fixed_end(e),
            EndChange::Auto => block.set_auto_end(),
        }
        if let Some(l) = self.location_id {
            block.location_id = Some(l).filter(|s| !s.is_empty());
        }
        if let Some(p) = self.participants {
            block.participants_ids = p;
        }
        if let Some(p) = self.advance {
            block.advance_participant_ids = p;
        }
        if let Some(p) = self.met_by {
            block.met_by_participant_ids = p;
        }
        if let Some(a) = self.attachments {
            block.attachments = a;
        }
        if let Some(n) = self.notes {
            block.notes = Some(n).filter(|s| !s.is_empty());
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ItemInput {
    pub time: Option<String>,
    pub description: Option<String>,
    pub staff_instructions: Option<String>,
    pub guest_instructions: Option<String>,
    pub notes: Option<String>,
}

impl ItemInput {
    fn apply(self, item: &mut ScheduleItem) {
        if let Some(t) = self.time {
            item.time = t;
        }
        if let Some(d) = self.description {
            item.description = d;
        }
        if let Some(s) = self.staff_instructions {
            item.staff_instructions = Some(s).filter(|s| !s.is_empty());
        }
        if let Some(g) = self.guest_instructions {
            item.guest_instructions = Some(g).filter(|s| !s.is_empty());
        }
        if let Some(n) = self.notes {
            item.notes = Some(n).filter(|s| !s.is_empty());
        }
    }
}

/// Every referenced participant and location must exist.
fn check_references(conn: &Connection, block: &Block) -> AppResult<()> {
    for pid in block
        .participants_ids
        .iter()
        .chain(&block.advance_participant_ids)
        .chain(&block.met_by_participant_ids)
    {
        if !participant_exists(conn, pid)? {
            return Err(AppError::not_found("Participant", pid.as_str()));
        }
    }

    if let Some(lid) = &block.location_id
        && load_location(conn, lid)?.is_none()
    {
        return Err(AppError::not_found("Location", lid.as_str()));
    }

    Ok(())
}

pub struct BlockLogic;

impl BlockLogic {
    pub fn add(pool: &mut DbPool, day_id: &str, input: BlockInput) -> AppResult<Block> {
        DayLogic::get(pool, day_id)?;

        if input.title.as_deref().is_none_or(|t| t.trim().is_empty()) {
            return Err(AppError::Other("Block title is required".into()));
        }
        if input.start_time.is_none() {
            return Err(AppError::InvalidTime("missing start time".into()));
        }

        let mut block = Block {
            id: new_id(),
            ..Default::default()
        };
        input.apply(&mut block);
        check_references(&pool.conn, &block)?;

        let tx = pool.conn.transaction()?;
        let position = next_block_position(&tx, day_id)?;
        insert_block(&tx, day_id, position, &block)?;
        tx.commit()?;

        ttlog_soft(
            &pool.conn,
            "add",
            &block.id,
            &format!("Block '{}' at {} added", block.title, block.start_time),
        );
        Ok(block)
    }

    /// The block and the id of its day.
    pub fn get(pool: &DbPool, id: &str) -> AppResult<(String, Block)> {
        load_block(&pool.conn, id)?.ok_or_else(|| AppError::not_found("Block", id))
    }

    pub fn edit(pool: &mut DbPool, id: &str, input: BlockInput) -> AppResult<Block> {
        let (_, mut block) = Self::get(pool, id)?;
        input.apply(&mut block);

        if block.end_time_fixed && block.end_time.trim().is_empty() {
            return Err(AppError::InvalidTime("fixed end time cannot be empty".into()));
        }
        check_references(&pool.conn, &block)?;

        Self::save(pool, &block)?;
        ttlog_soft(&pool.conn, "edit", id, &format!("Block '{}' updated", block.title));
        Ok(block)
    }

    /// Deleting a block unlinks it from every participant's assignments.
    pub fn delete(pool: &mut DbPool, id: &str) -> AppResult<Block> {
        let (_, block) = Self::get(pool, id)?;
        delete_block(&pool.conn, id)?;
        ttlog_soft(&pool.conn, "del", id, &format!("Block '{}' deleted", block.title));
        Ok(block)
    }

    fn save(pool: &mut DbPool, block: &Block) -> AppResult<()> {
        let tx = pool.conn.transaction()?;
        update_block(&tx, block)?;
        tx.commit()?;
        Ok(())
    }

    pub fn add_item(pool: &mut DbPool, block_id: &str, input: ItemInput) -> AppResult<ScheduleItem> {
        let (_, mut block) = Self::get(pool, block_id)?;

        if input.time.is_none() {
            return Err(AppError::InvalidTime("missing schedule item time".into()));
        }

        let mut item = ScheduleItem {
            id: new_id(),
            ..Default::default()
        };
        input.apply(&mut item);
        block.schedule_items.push(item.clone());

        Self::save(pool, &block)?;
        ttlog_soft(
            &pool.conn,
            "add",
            &item.id,
            &format!("Schedule item {} added to '{}'", item.time, block.title),
        );
        Ok(item)
    }

    fn owning_block(pool: &DbPool, item_id: &str) -> AppResult<Block> {
        let block_id = block_id_for_item(&pool.conn, item_id)?
            .ok_or_else(|| AppError::not_found("Schedule item", item_id))?;
        Ok(Self::get(pool, &block_id)?.1)
    }

    pub fn edit_item(pool: &mut DbPool, item_id: &str, input: ItemInput) -> AppResult<ScheduleItem> {
        let mut block = Self::owning_block(pool, item_id)?;

        let item = block
            .schedule_items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| AppError::not_found("Schedule item", item_id))?;
        input.apply(item);
        let updated = item.clone();

        Self::save(pool, &block)?;
        ttlog_soft(&pool.conn, "edit", item_id, &format!("Schedule item {} updated", updated.time));
        Ok(updated)
    }

    pub fn delete_item(pool: &mut DbPool, item_id: &str) -> AppResult<ScheduleItem> {
        let mut block = Self::owning_block(pool, item_id)?;

        let idx = block
            .schedule_items
            .iter()
            .position(|i| i.id == item_id)
            .ok_or_else(|| AppError::not_found("Schedule item", item_id))?;
        let removed = block.schedule_items.remove(idx);

        Self::save(pool, &block)?;
        ttlog_soft(&pool.conn, "del", item_id, &format!("Schedule item {} deleted", removed.time));
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::day::DayLogic;
    use crate::core::event::EventLogic;
    use crate::core::participant::{ParticipantInput, ParticipantLogic};
    use crate::db::migrate::run_pending_migrations;
    use chrono::NaiveDate;

    fn setup() -> (DbPool, String) {
        let mut pool = DbPool::in_memory().unwrap();
        run_pending_migrations(&pool.conn).unwrap();
        let d = NaiveDate::from_ymd_opt(2025, 6, 18).unwrap();
        let ev = EventLogic::add(&mut pool, "Visit", None, d, d).unwrap();
        let days = DayLogic::add(&mut pool, &ev.id, &[d]).unwrap();
        let day_id = days[0].id.clone();
        (pool, day_id)
    }

    fn input(title: &str, start: &str) -> BlockInput {
        BlockInput {
            title: Some(title.into()),
            start_time: Some(start.into()),
            ..Default::default()
        }
    }

    #[test]
    fn auto_end_follows_schedule_items() {
        let (mut pool, day_id) = setup();
        let b = BlockLogic::add(&mut pool, &day_id, input("Tour", "09:00")).unwrap();

        for t in ["09:00", "11:15", "10:00"] {
            BlockLogic::add_item(
                &mut pool,
                &b.id,
                ItemInput {
                    time: Some(t.into()),
                    ..Default::default()
                },
            )
            .unwrap();
        }

        let (_, stored) = BlockLogic::get(&pool, &b.id).unwrap();
        assert_eq!(stored.end_time, "");
        assert_eq!(stored.effective_end_time(), Some("11:15"));
    }

    #[test]
    fn fixed_end_survives_item_edits() {
        let (mut pool, day_id) = setup();
        let mut i = input("Lunch", "12:00");
        i.end = EndChange::Fixed("14:30".into());
        let b = BlockLogic::add(&mut pool, &day_id, i).unwrap();

        let item = BlockLogic::add_item(
            &mut pool,
            &b.id,
            ItemInput {
                time: Some("15:00".into()),
                ..Default::default()
            },
        )
        .unwrap();
        BlockLogic::edit_item(
            &mut pool,
            &item.id,
            ItemInput {
                time: Some("16:00".into()),
                ..Default::default()
            },
        )
        .unwrap();

        let (_, stored) = BlockLogic::get(&pool, &b.id).unwrap();
        assert!(stored.end_time_fixed);
        assert_eq!(stored.effective_end_time(), Some("14:30"));

        let switched = BlockLogic::edit(
            &mut pool,
            &b.id,
            BlockInput {
                end: EndChange::Auto,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(switched.effective_end_time(), Some("16:00"));
    }

    #[test]
    fn unknown_participant_is_rejected() {
        let (mut pool, day_id) = setup();
        let mut i = input("Meeting", "10:00");
        i.participants = Some(vec!["ghost".into()]);
        let err = BlockLogic::add(&mut pool, &day_id, i).unwrap_err();
        assert!(matches!(err, AppError::NotFound { kind: "Participant", .. }));
    }

    #[test]
    fn deleting_block_unlinks_participants() {
        let (mut pool, day_id) = setup();
        let p = ParticipantLogic::add(
            &mut pool,
            ParticipantInput {
                name: "Ana".into(),
                ..Default::default()
            },
        )
        .unwrap();

        let mut i = input("Meeting", "10:00");
        i.participants = Some(vec![p.id.clone()]);
        let b = BlockLogic::add(&mut pool, &day_id, i).unwrap();
        assert_eq!(
            ParticipantLogic::get(&pool, &p.id).unwrap().assigned_block_ids,
            [b.id.clone()]
        );

        BlockLogic::delete(&mut pool, &b.id).unwrap();
        assert!(
            ParticipantLogic::get(&pool, &p.id)
                .unwrap()
                .assigned_block_ids
                .is_empty()
        );
    }
}
