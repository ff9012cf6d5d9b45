use crate::db::db_utils::{conversion_error, non_empty};
use crate::errors::{AppError, AppResult};
use crate::models::Event;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn parse_date_col(raw: String) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map_err(|_| conversion_error(0, AppError::InvalidDate(raw.clone())))
}

pub fn map_event(row: &Row) -> Result<Event> {
    Ok(Event {
        id: row.get("id")?,
        name: row.get("name")?,
        description: non_empty(row.get("description")?),
        start_date: parse_date_col(row.get("start_date")?)?,
        end_date: parse_date_col(row.get("end_date")?)?,
    })
}

pub fn insert_event(conn: &Connection, ev: &Event) -> AppResult<()> {
    conn.execute(
        "INSERT INTO events (id, name, description, start_date, end_date)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            ev.id,
            ev.name,
            ev.description,
            ev.start_date.format("%Y-%m-%d").to_string(),
            ev.end_date.format("%Y-%m-%d").to_string(),
        ],
    )?;
    Ok(())
}

pub fn load_events(conn: &Connection) -> AppResult<Vec<Event>> {
    let mut stmt = conn.prepare("SELECT * FROM events ORDER BY start_date ASC, name ASC")?;
    let rows = stmt.query_map([], map_event)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_event(conn: &Connection, id: &str) -> AppResult<Option<Event>> {
    let ev = conn
        .query_row("SELECT * FROM events WHERE id = ?1", [id], map_event)
        .optional()?;
    Ok(ev)
}

/// Deletes the event and, through the foreign keys, all of its days.
pub fn delete_event(conn: &Connection, id: &str) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM events WHERE id = ?1", [id])?)
}
