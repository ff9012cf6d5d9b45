use crate::core::event::EventLogic;
use crate::db::days::{day_exists, delete_day, insert_day, load_day, load_day_headers};
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::{Day, new_id};
use crate::ui::messages::warning;
use chrono::NaiveDate;

pub struct DayLogic;

impl DayLogic {
    /// Adds one day per date to the event. A date the event already has is
    /// rejected before anything is written.
    pub fn add(pool: &mut DbPool, event_id: &str, dates: &[NaiveDate]) -> AppResult<Vec<Day>> {
        let event = EventLogic::get(pool, event_id)?;

        for date in dates {
            if day_exists(&pool.conn, event_id, date)? {
                return Err(AppError::Duplicate(format!(
                    "Day {} in event '{}'",
                    date, event.name
                )));
            }
        }

        let tx = pool.conn.transaction()?;
        let mut created = Vec::with_capacity(dates.len());
        for date in dates {
            let day = Day::new(new_id(), event_id.to_string(), *date);
            insert_day(&tx, &day)?;
            created.push(day);
        }
        tx.commit()?;

        for day in &created {
            if !event.contains(day.date) {
                warning(format!(
                    "{} is outside the event range {} → {}",
                    day.date, event.start_date, event.end_date
                ));
            }
            ttlog_soft(&pool.conn, "add", &day.id, &format!("Day {} added to '{}'", day.date, event.name));
        }

        Ok(created)
    }

    pub fn list(pool: &DbPool, event_id: Option<&str>) -> AppResult<Vec<Day>> {
        load_day_headers(&pool.conn, event_id)
    }

    /// The day with its blocks and movements.
    pub fn get(pool: &DbPool, id: &str) -> AppResult<Day> {
        load_day(&pool.conn, id)?.ok_or_else(|| AppError::not_found("Day", id))
    }

    pub fn delete(pool: &mut DbPool, id: &str) -> AppResult<Day> {
        let day = Self::get(pool, id)?;
        delete_day(&pool.conn, id)?;
        ttlog_soft(&pool.conn, "del", id, &format!("Day {} deleted", day.date));
        Ok(day)
    }
}
