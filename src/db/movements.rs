use crate::db::db_utils::{conversion_error, non_empty};
use crate::errors::{AppError, AppResult};
use crate::models::{DrivingTime, Movement, ToTimeType, VehicleAssignment, new_id};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

/// Movement row without vehicle assignments.
///
/// Driving movements are stored as total minutes; the `to_time` string and
/// the hours/minutes pair are both rebuilt from that column.
fn map_movement(row: &Row) -> Result<Movement> {
    let kind: String = row.get("to_time_type")?;
    let to_time_type = ToTimeType::from_db_str(&kind)
        .ok_or_else(|| conversion_error(0, AppError::InvalidArrival(kind.clone())))?;

    let mut m = Movement {
        id: row.get("id")?,
        title: row.get("title")?,
        description: non_empty(row.get("description")?),
        from_location_id: row
            .get::<_, Option<String>>("from_location_id")?
            .unwrap_or_default(),
        to_location_id: row
            .get::<_, Option<String>>("to_location_id")?
            .unwrap_or_default(),
        from_time: row.get("from_time")?,
        to_time_type,
        to_time: row.get("to_time")?,
        notes: non_empty(row.get("notes")?),
        ..Default::default()
    };

    if to_time_type == ToTimeType::Driving {
        let total: Option<i64> = row.get("driving_minutes")?;
        match total {
            Some(t) => m.set_driving_time(DrivingTime::from_total_minutes(t)),
            None => m.normalize_driving_fields(),
        }
    }

    Ok(m)
}

fn load_assignments(conn: &Connection, movement: &mut Movement) -> AppResult<()> {
    let headers: Vec<(String, VehicleAssignment)> = {
        let mut stmt = conn.prepare_cached(
            "SELECT id, vehicle_id, driver_id FROM vehicle_assignments
             WHERE movement_id = ?1
             ORDER BY position ASC",
        )?;
        let rows = stmt.query_map([&movement.id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                VehicleAssignment {
                    vehicle_id: row.get(1)?,
                    driver_id: row.get(2)?,
                    participant_ids: Vec::new(),
                },
            ))
        })?;
        rows.collect::<Result<_>>()?
    };

    let mut passengers = conn.prepare_cached(
        "SELECT participant_id FROM vehicle_assignment_passengers
         WHERE assignment_id = ?1
         ORDER BY position ASC",
    )?;

    for (assignment_id, mut va) in headers {
        let rows = passengers.query_map([&assignment_id], |row| row.get::<_, String>(0))?;
        va.participant_ids = rows.collect::<Result<_>>()?;
        movement.vehicle_assignments.push(va);
    }

    Ok(())
}

fn write_assignments(conn: &Connection, movement: &Movement) -> AppResult<()> {
    let mut header = conn.prepare_cached(
        "INSERT INTO vehicle_assignments (id, movement_id, position, vehicle_id, driver_id)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    let mut passenger = conn.prepare_cached(
        "INSERT OR IGNORE INTO vehicle_assignment_passengers (assignment_id, participant_id, position)
         VALUES (?1, ?2, ?3)",
    )?;

    for (pos, va) in movement.vehicle_assignments.iter().enumerate() {
        let assignment_id = new_id();
        header.execute(params![
            assignment_id,
            movement.id,
            pos as i64,
            va.vehicle_id,
            va.driver_id,
        ])?;

        for (ppos, pid) in va.participant_ids.iter().enumerate() {
            passenger.execute(params![assignment_id, pid, ppos as i64])?;
        }
    }

    Ok(())
}

/// Location columns are foreign keys: an empty id is stored as NULL.
fn location_ref(id: &str) -> Option<&str> {
    if id.trim().is_empty() { None } else { Some(id) }
}

fn driving_minutes(movement: &Movement) -> Option<i64> {
    match movement.to_time_type {
        ToTimeType::Driving => Some(movement.driving_time().total_minutes()),
        ToTimeType::Fixed => None,
    }
}

pub fn next_movement_position(conn: &Connection, day_id: &str) -> AppResult<i64> {
    Ok(conn.query_row(
        "SELECT IFNULL(MAX(position), -1) + 1 FROM movements WHERE day_id = ?1",
        [day_id],
        |r| r.get(0),
    )?)
}

/// Inserts a movement and its vehicle assignments. `to_time` is re-encoded
/// from the driving pair before it is written.
pub fn insert_movement(
    conn: &Connection,
    day_id: &str,
    position: i64,
    movement: &Movement,
) -> AppResult<()> {
    let mut m = movement.clone();
    m.sync_to_time();

    conn.execute(
        "INSERT INTO movements
            (id, day_id, position, title, description, from_location_id, to_location_id,
             from_time, to_time_type, to_time, driving_minutes, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            m.id,
            day_id,
            position,
            m.title,
            m.description,
            location_ref(&m.from_location_id),
            location_ref(&m.to_location_id),
            m.from_time,
            m.to_time_type.as_str(),
            m.to_time,
            driving_minutes(&m),
            m.notes,
        ],
    )?;

    write_assignments(conn, &m)
}

/// Rewrites a movement row and replaces all of its vehicle assignments.
pub fn update_movement(conn: &Connection, movement: &Movement) -> AppResult<()> {
    let mut m = movement.clone();
    m.sync_to_time();

    conn.execute(
        "UPDATE movements SET
            title = ?2, description = ?3, from_location_id = ?4, to_location_id = ?5,
            from_time = ?6, to_time_type = ?7, to_time = ?8, driving_minutes = ?9, notes = ?10
         WHERE id = ?1",
        params![
            m.id,
            m.title,
            m.description,
            location_ref(&m.from_location_id),
            location_ref(&m.to_location_id),
            m.from_time,
            m.to_time_type.as_str(),
            m.to_time,
            driving_minutes(&m),
            m.notes,
        ],
    )?;

    conn.execute(
        "DELETE FROM vehicle_assignments WHERE movement_id = ?1",
        [&m.id],
    )?;
    write_assignments(conn, &m)
}

pub fn load_movements_for_day(conn: &Connection, day_id: &str) -> AppResult<Vec<Movement>> {
    let mut out: Vec<Movement> = {
        let mut stmt = conn
            .prepare_cached("SELECT * FROM movements WHERE day_id = ?1 ORDER BY position ASC")?;
        let rows = stmt.query_map([day_id], map_movement)?;
        rows.collect::<Result<_>>()?
    };

    for m in out.iter_mut() {
        load_assignments(conn, m)?;
    }
    Ok(out)
}

/// A movement together with the id of the day that owns it.
pub fn load_movement(conn: &Connection, id: &str) -> AppResult<Option<(String, Movement)>> {
    let row = conn
        .query_row("SELECT * FROM movements WHERE id = ?1", [id], |row| {
            Ok((row.get::<_, String>("day_id")?, map_movement(row)?))
        })
        .optional()?;

    match row {
        Some((day_id, mut m)) => {
            load_assignments(conn, &mut m)?;
            Ok(Some((day_id, m)))
        }
        None => Ok(None),
    }
}

pub fn delete_movement(conn: &Connection, id: &str) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM movements WHERE id = ?1", [id])?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::days::insert_day;
    use crate::db::events::insert_event;
    use crate::db::migrate::run_pending_migrations;
    use crate::db::pool::DbPool;
    use crate::models::{Day, Event};
    use chrono::NaiveDate;

    fn setup() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        run_pending_migrations(&pool.conn).unwrap();

        let date = NaiveDate::from_ymd_opt(2025, 6, 18).unwrap();
        insert_event(
            &pool.conn,
            &Event {
                id: "e1".into(),
                name: "Visit".into(),
                description: None,
                start_date: date,
                end_date: date,
            },
        )
        .unwrap();
        insert_day(&pool.conn, &Day::new("d1".into(), "e1".into(), date)).unwrap();
        pool
    }

    #[test]
    fn driving_pair_survives_storage() {
        let pool = setup();
        let mut m = Movement {
            id: "m1".into(),
            title: "Airport".into(),
            from_time: "23:30".into(),
            ..Default::default()
        };
        m.set_driving_time(DrivingTime::new(1, 15));
        insert_movement(&pool.conn, "d1", 0, &m).unwrap();

        let (day_id, back) = load_movement(&pool.conn, "m1").unwrap().unwrap();
        assert_eq!(day_id, "d1");
        assert_eq!(back.to_time_type, ToTimeType::Driving);
        assert_eq!(back.to_time, "75");
        assert_eq!(back.driving_time(), DrivingTime::new(1, 15));
        assert_eq!(back.arrival_time().as_deref(), Some("00:45"));
    }

    #[test]
    fn empty_locations_are_stored_as_null() {
        let pool = setup();
        let mut m = Movement {
            id: "m1".into(),
            title: "Walk".into(),
            from_time: "09:00".into(),
            ..Default::default()
        };
        m.set_fixed_arrival("09:20".into());
        insert_movement(&pool.conn, "d1", 0, &m).unwrap();

        let loaded = load_movements_for_day(&pool.conn, "d1").unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].from_location_id, "");
        assert_eq!(loaded[0].arrival_time().as_deref(), Some("09:20"));
    }
}
