use crate::db::db_utils::non_empty;
use crate::errors::AppResult;
use crate::models::Vehicle;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn map_vehicle(row: &Row) -> Result<Vehicle> {
    Ok(Vehicle {
        id: row.get("id")?,
        label: row.get("label")?,
        make: non_empty(row.get("make")?),
        model: non_empty(row.get("model")?),
        license_plate: non_empty(row.get("license_plate")?),
        capacity: row.get("capacity")?,
        available_from: non_empty(row.get("available_from")?),
        available_to: non_empty(row.get("available_to")?),
        origination_location_id: non_empty(row.get("origination_location_id")?),
        notes: non_empty(row.get("notes")?),
    })
}

pub fn insert_vehicle(conn: &Connection, v: &Vehicle) -> AppResult<()> {
    conn.execute(
        "INSERT INTO vehicles
            (id, label, make, model, license_plate, capacity,
             available_from, available_to, origination_location_id, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            v.id,
            v.label,
            v.make,
            v.model,
            v.license_plate,
            v.capacity,
            v.available_from,
            v.available_to,
            v.origination_location_id,
            v.notes,
        ],
    )?;
    Ok(())
}

pub fn load_vehicles(conn: &Connection) -> AppResult<Vec<Vehicle>> {
    let mut stmt = conn.prepare("SELECT * FROM vehicles ORDER BY label ASC")?;
    let rows = stmt.query_map([], map_vehicle)?;
    Ok(rows.collect::<Result<Vec<_>>>()?)
}

pub fn load_vehicle(conn: &Connection, id: &str) -> AppResult<Option<Vehicle>> {
    Ok(conn
        .query_row("SELECT * FROM vehicles WHERE id = ?1", [id], map_vehicle)
        .optional()?)
}

/// Deleting a vehicle also drops every assignment that used it.
pub fn delete_vehicle(conn: &Connection, id: &str) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM vehicles WHERE id = ?1", [id])?)
}
