use crate::db::events::{delete_event, insert_event, load_event, load_events};
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::{Event, new_id};
use chrono::NaiveDate;

pub struct EventLogic;

impl EventLogic {
    pub fn add(
        pool: &mut DbPool,
        name: &str,
        description: Option<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> AppResult<Event> {
        if name.trim().is_empty() {
            return Err(AppError::Other("Event name cannot be empty".into()));
        }
        if end_date < start_date {
            return Err(AppError::InvalidDate(format!(
                "end date {} is before start date {}",
                end_date, start_date
            )));
        }

        let ev = Event {
            id: new_id(),
            name: name.trim().to_string(),
            description,
            start_date,
            end_date,
        };
        insert_event(&pool.conn, &ev)?;

        ttlog_soft(&pool.conn, "add", &ev.id, &format!("Event '{}' created", ev.name));
        Ok(ev)
    }

    pub fn list(pool: &DbPool) -> AppResult<Vec<Event>> {
        load_events(&pool.conn)
    }

    pub fn get(pool: &DbPool, id: &str) -> AppResult<Event> {
        load_event(&pool.conn, id)?.ok_or_else(|| AppError::not_found("Event", id))
    }

    /// Deletes the event together with all of its days.
    pub fn delete(pool: &mut DbPool, id: &str) -> AppResult<Event> {
        let ev = Self::get(pool, id)?;
        delete_event(&pool.conn, id)?;
        ttlog_soft(&pool.conn, "del", id, &format!("Event '{}' deleted", ev.name));
        Ok(ev)
    }
}
