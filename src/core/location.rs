use crate::db::locations::{delete_location, insert_location, load_location, load_locations};
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::{Location, LocationType, new_id};

#[derive(Debug, Clone, Default)]
pub struct LocationInput {
    pub name: String,
    pub address: Option<String>,
    pub google_maps_link: Option<String>,
    pub location_type: LocationType,
    pub contact: Vec<String>,
    pub site_manager_ids: Vec<String>,
}

pub struct LocationLogic;

impl LocationLogic {
    pub fn add(pool: &mut DbPool, input: LocationInput) -> AppResult<Location> {
        if input.name.trim().is_empty() {
            return Err(AppError::Other("Location name cannot be empty".into()));
        }

        let loc = Location {
            id: new_id(),
            name: input.name.trim().to_string(),
            address: input.address,
            google_maps_link: input.google_maps_link,
            location_type: input.location_type,
            contact: input.contact,
            site_manager_ids: input.site_manager_ids,
        };
        insert_location(&pool.conn, &loc)?;

        ttlog_soft(&pool.conn, "add", &loc.id, &format!("Location '{}' created", loc.name));
        Ok(loc)
    }

    pub fn list(pool: &DbPool) -> AppResult<Vec<Location>> {
        load_locations(&pool.conn)
    }

    pub fn get(pool: &DbPool, id: &str) -> AppResult<Location> {
        load_location(&pool.conn, id)?.ok_or_else(|| AppError::not_found("Location", id))
    }

    pub fn delete(pool: &mut DbPool, id: &str) -> AppResult<Location> {
        let loc = Self::get(pool, id)?;
        delete_location(&pool.conn, id)?;
        ttlog_soft(&pool.conn, "del", id, &format!("Location '{}' deleted", loc.name));
        Ok(loc)
    }
}
