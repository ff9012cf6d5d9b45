use crate::db::db_utils::{conversion_error, from_json_list, non_empty, to_json_list};
use crate::errors::{AppError, AppResult};
use crate::models::{Location, LocationType};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn map_location(row: &Row) -> Result<Location> {
    let type_str: String = row.get("type")?;
    let location_type = LocationType::from_code(&type_str)
        .ok_or_else(|| conversion_error(0, AppError::InvalidLocationType(type_str.clone())))?;

    Ok(Location {
        id: row.get("id")?,
        name: row.get("name")?,
        address: non_empty(row.get("address")?),
        google_maps_link: non_empty(row.get("google_maps_link")?),
        location_type,
        contact: from_json_list(row.get("contact")?),
        site_manager_ids: from_json_list(row.get("site_manager_ids")?),
    })
}

pub fn insert_location(conn: &Connection, loc: &Location) -> AppResult<()> {
    conn.execute(
        "INSERT INTO locations (id, name, address, google_maps_link, type, contact, site_manager_ids)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            loc.id,
            loc.name,
            loc.address,
            loc.google_maps_link,
            loc.location_type.as_str(),
            to_json_list(&loc.contact),
            to_json_list(&loc.site_manager_ids),
        ],
    )?;
    Ok(())
}

pub fn load_locations(conn: &Connection) -> AppResult<Vec<Location>> {
    let mut stmt = conn.prepare("SELECT * FROM locations ORDER BY name ASC")?;
    let rows = stmt.query_map([], map_location)?;
    Ok(rows.collect::<Result<Vec<_>>>()?)
}

pub fn load_location(conn: &Connection, id: &str) -> AppResult<Option<Location>> {
    Ok(conn
        .query_row("SELECT * FROM locations WHERE id = ?1", [id], map_location)
        .optional()?)
}

/// Blocks and movements pointing at the location keep existing with the
/// reference cleared.
pub fn delete_location(conn: &Connection, id: &str) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM locations WHERE id = ?1", [id])?)
}
