use crate::core::day::DayLogic;
use crate::db::locations::load_location;
use crate::db::log::ttlog_soft;
use crate::db::movements::{
    delete_movement, insert_movement, load_movement, next_movement_position, update_movement,
};
use crate::db::participants::participant_exists;
use crate::db::pool::DbPool;
use crate::db::vehicles::load_vehicles;
use crate::errors::{AppError, AppResult};
use crate::models::{DrivingTime, Movement, Vehicle, VehicleAssignment, new_id};
use crate::utils::time::to_minutes;
use rusqlite::Connection;

/// How the arrival of a movement changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ArrivalChange {
    #[default]
    Keep,
    Fixed(String),
    Driving(DrivingTime),
}

#[derive(Debug, Clone, Default)]
pub struct MovementInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub from_location_id: Option<String>,
    pub to_location_id: Option<String>,
    pub from_time: Option<String>,
    pub arrival: ArrivalChange,
    pub notes: Option<String>,
}

impl MovementInput {
    fn apply(self, m: &mut Movement) {
        if let Some(t) = self.title {
            m.title = t;
        }
        if let Some(d) = self.description {
            m.description = Some(d).filter(|s| !s.is_empty());
        }
        if let Some(l) = self.from_location_id {
            m.from_location_id = l;
        }
        if let Some(l) = self.to_location_id {
            m.to_location_id = l;
        }
        if let Some(t) = self.from_time {
            m.from_time = t;
        }
        match self.arrival {
            ArrivalChange::Keep => {}
            ArrivalChange::Fixed(t) => m.set_fixed_arrival(t),
            ArrivalChange::Driving(d) => m.set_driving_time(d),
        }
        if let Some(n) = self.notes {
            m.notes = Some(n).filter(|s| !s.is_empty());
        }
    }
}

/// One message per assignment carrying more passengers than the vehicle
/// has seats. Vehicles without a capacity are never over capacity.
pub fn capacity_warnings(movement: &Movement, vehicles: &[Vehicle]) -> Vec<String> {
    movement
        .vehicle_assignments
        .iter()
        .filter_map(|va| {
            let vehicle = vehicles.iter().find(|v| v.id == va.vehicle_id)?;
            let capacity = vehicle.capacity? as usize;
            (va.passenger_count() > capacity).then(|| {
                format!(
                    "{} carries {} passengers but has {} seats",
                    vehicle.label,
                    va.passenger_count(),
                    capacity
                )
            })
        })
        .collect()
}

/// Assignments whose vehicle is not available for the whole movement.
pub fn availability_warnings(movement: &Movement, vehicles: &[Vehicle]) -> Vec<String> {
    let departure = to_minutes(&movement.from_time);
    let arrival = movement.arrival_time().as_deref().and_then(to_minutes);

    movement
        .vehicle_assignments
        .iter()
        .filter_map(|va| vehicles.iter().find(|v| v.id == va.vehicle_id))
        .filter_map(|v| {
            let from = v.available_from.as_deref().and_then(to_minutes);
            let to = v.available_to.as_deref().and_then(to_minutes);

            let too_early = matches!((from, departure), (Some(f), Some(d)) if d < f);
            let too_late = matches!((to, arrival), (Some(t), Some(a)) if a > t);

            (too_early || too_late).then(|| {
                format!(
                    "{} is only available {} → {}",
                    v.label,
                    v.available_from.as_deref().unwrap_or("--:--"),
                    v.available_to.as_deref().unwrap_or("--:--")
                )
            })
        })
        .collect()
}

fn check_locations(conn: &Connection, m: &Movement) -> AppResult<()> {
    for lid in [&m.from_location_id, &m.to_location_id] {
        if !lid.is_empty() && load_location(conn, lid)?.is_none() {
            return Err(AppError::not_found("Location", lid.as_str()));
        }
    }
    Ok(())
}

pub struct MovementLogic;

impl MovementLogic {
    pub fn add(pool: &mut DbPool, day_id: &str, input: MovementInput) -> AppResult<Movement> {
        DayLogic::get(pool, day_id)?;

        if input.title.as_deref().is_none_or(|t| t.trim().is_empty()) {
            return Err(AppError::Other("Movement title is required".into()));
        }
        if input.from_time.is_none() {
            return Err(AppError::InvalidTime("missing departure time".into()));
        }
        if input.arrival == ArrivalChange::Keep {
            return Err(AppError::InvalidArrival(
                "either a fixed arrival or a driving time is required".into(),
            ));
        }

        let mut m = Movement {
            id: new_id(),
            ..Default::default()
        };
        input.apply(&mut m);
        check_locations(&pool.conn, &m)?;

        let tx = pool.conn.transaction()?;
        let position = next_movement_position(&tx, day_id)?;
        insert_movement(&tx, day_id, position, &m)?;
        tx.commit()?;

        ttlog_soft(
            &pool.conn,
            "add",
            &m.id,
            &format!("Movement '{}' at {} added", m.title, m.from_time),
        );
        Ok(m)
    }

    /// The movement and the id of its day.
    pub fn get(pool: &DbPool, id: &str) -> AppResult<(String, Movement)> {
        load_movement(&pool.conn, id)?.ok_or_else(|| AppError::not_found("Movement", id))
    }

    fn save(pool: &mut DbPool, m: &Movement) -> AppResult<()> {
        let tx = pool.conn.transaction()?;
        update_movement(&tx, m)?;
        tx.commit()?;
        Ok(())
    }

    pub fn edit(pool: &mut DbPool, id: &str, input: MovementInput) -> AppResult<Movement> {
        let (_, mut m) = Self::get(pool, id)?;
        input.apply(&mut m);
        check_locations(&pool.conn, &m)?;

        Self::save(pool, &m)?;
        ttlog_soft(&pool.conn, "edit", id, &format!("Movement '{}' updated", m.title));
        Ok(m)
    }

    pub fn delete(pool: &mut DbPool, id: &str) -> AppResult<Movement> {
        let (_, m) = Self::get(pool, id)?;
        delete_movement(&pool.conn, id)?;
        ttlog_soft(&pool.conn, "del", id, &format!("Movement '{}' deleted", m.title));
        Ok(m)
    }

    /// Puts a vehicle on the movement, or updates its existing assignment:
    /// a given driver replaces the current one, passengers are added.
    ///
    /// Returns the saved movement and the capacity/availability warnings;
    /// warnings never block the save.
    pub fn assign(
        pool: &mut DbPool,
        movement_id: &str,
        vehicle_id: &str,
        driver_id: Option<String>,
        passengers: Vec<String>,
    ) -> AppResult<(Movement, Vec<String>)> {
        let (_, mut m) = Self::get(pool, movement_id)?;
        let vehicles = load_vehicles(&pool.conn)?;

        if !vehicles.iter().any(|v| v.id == vehicle_id) {
            return Err(AppError::not_found("Vehicle", vehicle_id));
        }
        for pid in driver_id.iter().chain(&passengers) {
            if !participant_exists(&pool.conn, pid)? {
                return Err(AppError::not_found("Participant", pid.as_str()));
            }
        }

        match m
            .vehicle_assignments
            .iter_mut()
            .find(|va| va.vehicle_id == vehicle_id)
        {
            Some(va) => {
                if driver_id.is_some() {
                    va.driver_id = driver_id;
                }
                for p in passengers {
                    if !va.participant_ids.contains(&p) {
                        va.participant_ids.push(p);
                    }
                }
            }
            None => {
                let mut participant_ids: Vec<String> = Vec::new();
                for p in passengers {
                    if !participant_ids.contains(&p) {
                        participant_ids.push(p);
                    }
                }
                m.vehicle_assignments.push(VehicleAssignment {
                    vehicle_id: vehicle_id.to_string(),
                    driver_id,
                    participant_ids,
                });
            }
        }

        Self::save(pool, &m)?;

        let mut warnings = capacity_warnings(&m, &vehicles);
        warnings.extend(availability_warnings(&m, &vehicles));

        ttlog_soft(
            &pool.conn,
            "edit",
            movement_id,
            &format!("Vehicle {} assigned to '{}'", vehicle_id, m.title),
        );
        Ok((m, warnings))
    }

    /// Removes the vehicle, or only the given passengers from it.
    pub fn unassign(
        pool: &mut DbPool,
        movement_id: &str,
        vehicle_id: &str,
        passengers: &[String],
    ) -> AppResult<Movement> {
        let (_, mut m) = Self::get(pool, movement_id)?;

        let idx = m
            .vehicle_assignments
            .iter()
            .position(|va| va.vehicle_id == vehicle_id)
            .ok_or_else(|| AppError::not_found("Vehicle assignment", vehicle_id))?;

        if passengers.is_empty() {
            m.vehicle_assignments.remove(idx);
        } else {
            m.vehicle_assignments[idx]
                .participant_ids
                .retain(|p| !passengers.contains(p));
        }

        Self::save(pool, &m)?;
        ttlog_soft(
            &pool.conn,
            "edit",
            movement_id,
            &format!("Vehicle {} unassigned from '{}'", vehicle_id, m.title),
        );
        Ok(m)
    }
}
