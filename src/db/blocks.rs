use crate::db::db_utils::{conversion_error, from_json_list, non_empty, to_json_list};
use crate::errors::{AppError, AppResult};
use crate::models::{Block, BlockType, ScheduleItem};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const ROLE_PARTICIPANT: &str = "participant";
const ROLE_ADVANCE: &str = "advance";
const ROLE_MET_BY: &str = "met_by";

/// Block row without participants and schedule items.
fn map_block(row: &Row) -> Result<Block> {
    let type_str: String = row.get("type")?;
    let block_type = BlockType::from_code(&type_str)
        .ok_or_else(|| conversion_error(0, AppError::InvalidBlockType(type_str.clone())))?;

    Ok(Block {
        id: row.get("id")?,
        block_type,
        title: row.get("title")?,
        description: non_empty(row.get("description")?),
        start_time: row.get("start_time")?,
        end_time: row.get("end_time")?,
        end_time_fixed: row.get::<_, i32>("end_time_fixed")? == 1,
        location_id: non_empty(row.get("location_id")?),
        notes: non_empty(row.get("notes")?),
        attachments: from_json_list(row.get("attachments")?),
        ..Default::default()
    })
}

fn map_schedule_item(row: &Row) -> Result<ScheduleItem> {
    Ok(ScheduleItem {
        id: row.get("id")?,
        time: row.get("time")?,
        description: row.get("description")?,
        staff_instructions: non_empty(row.get("staff_instructions")?),
        guest_instructions: non_empty(row.get("guest_instructions")?),
        notes: non_empty(row.get("notes")?),
    })
}

fn load_participant_links(conn: &Connection, block: &mut Block) -> AppResult<()> {
    let mut stmt = conn.prepare_cached(
        "SELECT participant_id, role FROM block_participants
         WHERE block_id = ?1
         ORDER BY position ASC",
    )?;

    let rows = stmt.query_map([&block.id], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
    })?;

    for r in rows {
        let (pid, role) = r?;
        match role.as_str() {
            ROLE_ADVANCE => block.advance_participant_ids.push(pid),
            ROLE_MET_BY => block.met_by_participant_ids.push(pid),
            _ => block.participants_ids.push(pid),
        }
    }
    Ok(())
}

fn load_schedule_items(conn: &Connection, block: &mut Block) -> AppResult<()> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM schedule_items WHERE block_id = ?1 ORDER BY position ASC",
    )?;

    for r in stmt.query_map([&block.id], map_schedule_item)? {
        block.schedule_items.push(r?);
    }
    Ok(())
}

fn fill_block(conn: &Connection, mut block: Block) -> AppResult<Block> {
    load_participant_links(conn, &mut block)?;
    load_schedule_items(conn, &mut block)?;
    Ok(block)
}

fn write_children(conn: &Connection, block: &Block) -> AppResult<()> {
    let mut link = conn.prepare_cached(
        "INSERT OR IGNORE INTO block_participants (block_id, participant_id, role, position)
         VALUES (?1, ?2, ?3, ?4)",
    )?;

    for (role, ids) in [
        (ROLE_PARTICIPANT, &block.participants_ids),
        (ROLE_ADVANCE, &block.advance_participant_ids),
        (ROLE_MET_BY, &block.met_by_participant_ids),
    ] {
        for (pos, pid) in ids.iter().enumerate() {
            link.execute(params![block.id, pid, role, pos as i64])?;
        }
    }

    let mut item = conn.prepare_cached(
        "INSERT INTO schedule_items
            (id, block_id, position, time, description, staff_instructions, guest_instructions, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )?;

    for (pos, it) in block.schedule_items.iter().enumerate() {
        item.execute(params![
            it.id,
            block.id,
            pos as i64,
            it.time,
            it.description,
            it.staff_instructions,
            it.guest_instructions,
            it.notes,
        ])?;
    }

    Ok(())
}

fn clear_children(conn: &Connection, block_id: &str) -> AppResult<()> {
    conn.execute("DELETE FROM block_participants WHERE block_id = ?1", [block_id])?;
    conn.execute("DELETE FROM schedule_items WHERE block_id = ?1", [block_id])?;
    Ok(())
}

pub fn next_block_position(conn: &Connection, day_id: &str) -> AppResult<i64> {
    Ok(conn.query_row(
        "SELECT IFNULL(MAX(position), -1) + 1 FROM blocks WHERE day_id = ?1",
        [day_id],
        |r| r.get(0),
    )?)
}

/// Inserts a block with its participant links and schedule items.
/// The stored end time is empty for auto blocks.
pub fn insert_block(conn: &Connection, day_id: &str, position: i64, block: &Block) -> AppResult<()> {
    conn.execute(
        "INSERT INTO blocks
            (id, day_id, position, type, title, description, start_time, end_time,
             end_time_fixed, location_id, notes, attachments)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            block.id,
            day_id,
            position,
            block.block_type.as_str(),
            block.title,
            block.description,
            block.start_time,
            block.stored_end_time(),
            block.end_time_fixed as i32,
            block.location_id,
            block.notes,
            to_json_list(&block.attachments),
        ],
    )?;

    write_children(conn, block)
}

/// Rewrites a block row and replaces its participant links and schedule items.
pub fn update_block(conn: &Connection, block: &Block) -> AppResult<()> {
    conn.execute(
        "UPDATE blocks SET
            type = ?2, title = ?3, description = ?4, start_time = ?5, end_time = ?6,
            end_time_fixed = ?7, location_id = ?8, notes = ?9, attachments = ?10
         WHERE id = ?1",
        params![
            block.id,
            block.block_type.as_str(),
            block.title,
            block.description,
            block.start_time,
            block.stored_end_time(),
            block.end_time_fixed as i32,
            block.location_id,
            block.notes,
            to_json_list(&block.attachments),
        ],
    )?;

    clear_children(conn, &block.id)?;
    write_children(conn, block)
}

pub fn load_blocks_for_day(conn: &Connection, day_id: &str) -> AppResult<Vec<Block>> {
    let headers: Vec<Block> = {
        let mut stmt =
            conn.prepare_cached("SELECT * FROM blocks WHERE day_id = ?1 ORDER BY position ASC")?;
        let rows = stmt.query_map([day_id], map_block)?;
        rows.collect::<Result<_>>()?
    };

    headers.into_iter().map(|b| fill_block(conn, b)).collect()
}

/// A block together with the id of the day that owns it.
pub fn load_block(conn: &Connection, id: &str) -> AppResult<Option<(String, Block)>> {
    let row = conn
        .query_row("SELECT * FROM blocks WHERE id = ?1", [id], |row| {
            Ok((row.get::<_, String>("day_id")?, map_block(row)?))
        })
        .optional()?;

    match row {
        Some((day_id, block)) => Ok(Some((day_id, fill_block(conn, block)?))),
        None => Ok(None),
    }
}

/// Removes the block; participant links and schedule items go with it, so
/// the block disappears from every participant's assigned list.
pub fn delete_block(conn: &Connection, id: &str) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM blocks WHERE id = ?1", [id])?)
}

/// Ids of the blocks a participant is listed on, in any role.
pub fn block_ids_for_participant(conn: &Connection, participant_id: &str) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare_cached(
        "SELECT DISTINCT bp.block_id
         FROM block_participants bp
         JOIN blocks b ON b.id = bp.block_id
         JOIN days d ON d.id = b.day_id
         WHERE bp.participant_id = ?1
         ORDER BY d.date ASC, b.start_time ASC",
    )?;

    let rows = stmt.query_map([participant_id], |row| row.get::<_, String>(0))?;
    Ok(rows.collect::<Result<Vec<_>>>()?)
}

/// Id of the block owning a schedule item.
pub fn block_id_for_item(conn: &Connection, item_id: &str) -> AppResult<Option<String>> {
    Ok(conn
        .query_row(
            "SELECT block_id FROM schedule_items WHERE id = ?1",
            [item_id],
            |r| r.get(0),
        )
        .optional()?)
}
