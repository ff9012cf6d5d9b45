use crate::db::blocks::load_blocks_for_day;
use crate::db::db_utils::conversion_error;
use crate::db::movements::load_movements_for_day;
use crate::errors::{AppError, AppResult};
use crate::models::Day;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

/// Day header only: blocks and movements are left empty.
pub fn map_day(row: &Row) -> Result<Day> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| conversion_error(0, AppError::InvalidDate(date_str.clone())))?;

    Ok(Day::new(row.get("id")?, row.get("event_id")?, date))
}

pub fn insert_day(conn: &Connection, day: &Day) -> AppResult<()> {
    conn.execute(
        "INSERT INTO days (id, event_id, date) VALUES (?1, ?2, ?3)",
        params![day.id, day.event_id, day.date_str()],
    )?;
    Ok(())
}

pub fn day_exists(conn: &Connection, event_id: &str, date: &NaiveDate) -> AppResult<bool> {
    let mut stmt = conn.prepare("SELECT 1 FROM days WHERE event_id = ?1 AND date = ?2")?;
    Ok(stmt.exists(params![event_id, date.format("%Y-%m-%d").to_string()])?)
}

/// Day headers, optionally restricted to one event, in date order.
pub fn load_day_headers(conn: &Connection, event_id: Option<&str>) -> AppResult<Vec<Day>> {
    let mut out = Vec::new();

    match event_id {
        Some(eid) => {
            let mut stmt =
                conn.prepare("SELECT * FROM days WHERE event_id = ?1 ORDER BY date ASC")?;
            for r in stmt.query_map([eid], map_day)? {
                out.push(r?);
            }
        }
        None => {
            let mut stmt = conn.prepare("SELECT * FROM days ORDER BY date ASC")?;
            for r in stmt.query_map([], map_day)? {
                out.push(r?);
            }
        }
    }

    Ok(out)
}

fn fill_day(conn: &Connection, mut day: Day) -> AppResult<Day> {
    day.blocks = load_blocks_for_day(conn, &day.id)?;
    day.movements = load_movements_for_day(conn, &day.id)?;
    Ok(day)
}

/// A day with its blocks and movements.
pub fn load_day(conn: &Connection, id: &str) -> AppResult<Option<Day>> {
    let header = conn
        .query_row("SELECT * FROM days WHERE id = ?1", [id], map_day)
        .optional()?;

    header.map(|d| fill_day(conn, d)).transpose()
}

/// Every day (optionally of one event) with blocks and movements loaded.
pub fn load_full_days(conn: &Connection, event_id: Option<&str>) -> AppResult<Vec<Day>> {
    load_day_headers(conn, event_id)?
        .into_iter()
        .map(|d| fill_day(conn, d))
        .collect()
}

pub fn delete_day(conn: &Connection, id: &str) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM days WHERE id = ?1", [id])?)
}
