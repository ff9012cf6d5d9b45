use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::db::vehicles::{delete_vehicle, insert_vehicle, load_vehicle, load_vehicles};
use crate::errors::{AppError, AppResult};
use crate::models::{Vehicle, new_id};

pub struct VehicleLogic;

impl VehicleLogic {
    /// `vehicle.id` is ignored; a fresh one is assigned.
    pub fn add(pool: &mut DbPool, mut vehicle: Vehicle) -> AppResult<Vehicle> {
        if vehicle.label.trim().is_empty() {
            return Err(AppError::Other("Vehicle label cannot be empty".into()));
        }
        if let Some(origin) = &vehicle.origination_location_id
            && crate::db::locations::load_location(&pool.conn, origin)?.is_none()
        {
            return Err(AppError::not_found("Location", origin.as_str()));
        }

        vehicle.id = new_id();
        insert_vehicle(&pool.conn, &vehicle)?;

        ttlog_soft(&pool.conn, "add", &vehicle.id, &format!("Vehicle '{}' created", vehicle.label));
        Ok(vehicle)
    }

    pub fn list(pool: &DbPool) -> AppResult<Vec<Vehicle>> {
        load_vehicles(&pool.conn)
    }

    pub fn get(pool: &DbPool, id: &str) -> AppResult<Vehicle> {
        load_vehicle(&pool.conn, id)?.ok_or_else(|| AppError::not_found("Vehicle", id))
    }

    pub fn delete(pool: &mut DbPool, id: &str) -> AppResult<Vehicle> {
        let v = Self::get(pool, id)?;
        delete_vehicle(&pool.conn, id)?;
        ttlog_soft(&pool.conn, "del", id, &format!("Vehicle '{}' deleted", v.label));
        Ok(v)
    }
}
