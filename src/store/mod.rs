//! JSON store import.
//!
//! A store is a snapshot of the whole planning dataset in the camelCase REST
//! shape. It is migrated to the current version, cleaned of references to
//! records it does not contain, and written to SQLite in one transaction.

pub mod migrate;

use crate::db::blocks::{block_id_for_item, insert_block, load_block};
use crate::db::days::{insert_day, load_day};
use crate::db::events::{insert_event, load_event};
use crate::db::locations::{insert_location, load_location};
use crate::db::log::ttlog;
use crate::db::movements::{insert_movement, load_movement};
use crate::db::participants::{insert_participant, participant_exists};
use crate::db::pool::DbPool;
use crate::db::vehicles::{insert_vehicle, load_vehicle};
use crate::errors::{AppError, AppResult};
use crate::models::{Day, Event, Location, Participant, ToTimeType, Vehicle};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub days: Vec<Day>,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
}

/// Record counts written by an import.
#[derive(Debug, Default, PartialEq)]
pub struct ImportSummary {
    pub events: usize,
    pub days: usize,
    pub blocks: usize,
    pub movements: usize,
    pub participants: usize,
    pub locations: usize,
    pub vehicles: usize,
    pub warnings: Vec<String>,
}

impl Store {
    /// Parses a store document, running pending store migrations first.
    ///
    /// A bare array is taken as a list of days (the `export --format json`
    /// output) whose events must already exist in the database.
    pub fn from_value(mut doc: Value) -> AppResult<(Self, Vec<&'static str>)> {
        if doc.is_array() {
            doc = json!({ "version": migrate::CURRENT_VERSION, "days": doc });
        }
        let applied = migrate::migrate_store(&mut doc)?;
        let mut store: Store = serde_json::from_value(doc)
            .map_err(|e| AppError::Import(format!("invalid store: {}", e)))?;
        for day in &mut store.days {
            for m in &mut day.movements {
                m.normalize_driving_fields();
                if m.to_time_type == ToTimeType::Driving
                    && m.driving_time().checked_total_minutes().is_none()
                {
                    return Err(AppError::Import(format!(
                        "movement {}: driving time out of range",
                        m.id
                    )));
                }
            }
        }
        Ok((store, applied))
    }

    pub fn load_file(path: &Path) -> AppResult<(Self, Vec<&'static str>)> {
        let raw = fs::read_to_string(path)?;
        let doc: Value = serde_json::from_str(&raw)
            .map_err(|e| AppError::Import(format!("{}: {}", path.display(), e)))?;
        Self::from_value(doc)
    }

    /// Drops references to participants, locations and vehicles that are in
    /// neither the store nor the database. Returns one warning per drop.
    fn prune_references(&mut self, pool: &DbPool) -> AppResult<Vec<String>> {
        let mut people: HashSet<String> = self.participants.iter().map(|p| p.id.clone()).collect();
        let mut places: HashSet<String> = self.locations.iter().map(|l| l.id.clone()).collect();
        let mut cars: HashSet<String> = self.vehicles.iter().map(|v| v.id.clone()).collect();

        // Referenced ids missing from the store may already live in SQLite.
        let mut referenced_people = Vec::new();
        let mut referenced_places = Vec::new();
        let mut referenced_cars = Vec::new();
        for day in &self.days {
            for b in &day.blocks {
                referenced_people.extend(b.participants_ids.iter().cloned());
                referenced_people.extend(b.advance_participant_ids.iter().cloned());
                referenced_people.extend(b.met_by_participant_ids.iter().cloned());
                referenced_places.extend(b.location_id.iter().cloned());
            }
            for m in &day.movements {
                referenced_places.push(m.from_location_id.clone());
                referenced_places.push(m.to_location_id.clone());
                for va in &m.vehicle_assignments {
                    referenced_cars.push(va.vehicle_id.clone());
                    referenced_people.extend(va.driver_id.iter().cloned());
                    referenced_people.extend(va.participant_ids.iter().cloned());
                }
            }
        }
        for v in &self.vehicles {
            referenced_places.extend(v.origination_location_id.iter().cloned());
        }

        for id in referenced_people {
            if !people.contains(&id) && participant_exists(&pool.conn, &id)? {
                people.insert(id);
            }
        }
        for id in referenced_places {
            if !id.is_empty() && !places.contains(&id) && load_location(&pool.conn, &id)?.is_some() {
                places.insert(id);
            }
        }
        for id in referenced_cars {
            if !cars.contains(&id) && load_vehicle(&pool.conn, &id)?.is_some() {
                cars.insert(id);
            }
        }

        let mut warnings = Vec::new();
        for m in self.days.iter_mut().flat_map(|d| d.movements.iter_mut()) {
            let owner = m.id.clone();
            m.vehicle_assignments.retain(|va| {
                let ok = cars.contains(&va.vehicle_id);
                if !ok {
                    warnings.push(format!("{}: unknown vehicle {} dropped", owner, va.vehicle_id));
                }
                ok
            });
        }

        let mut keep = |ids: &mut Vec<String>, known: &HashSet<String>, what: &str, owner: &str| {
            ids.retain(|id| {
                let ok = known.contains(id);
                if !ok {
                    warnings.push(format!("{}: unknown {} {} dropped", owner, what, id));
                }
                ok
            });
        };

        for day in &mut self.days {
            for b in &mut day.blocks {
                keep(&mut b.participants_ids, &people, "participant", &b.id);
                keep(&mut b.advance_participant_ids, &people, "participant", &b.id);
                keep(&mut b.met_by_participant_ids, &people, "participant", &b.id);
                if let Some(loc) = b.location_id.take() {
                    let mut ids = vec![loc];
                    keep(&mut ids, &places, "location", &b.id);
                    b.location_id = ids.pop();
                }
            }
            for m in &mut day.movements {
                for loc in [&mut m.from_location_id, &mut m.to_location_id] {
                    if !loc.is_empty() && !places.contains(loc.as_str()) {
                        let mut ids = vec![std::mem::take(loc)];
                        keep(&mut ids, &places, "location", &m.id);
                    }
                }

                for va in &mut m.vehicle_assignments {
                    keep(&mut va.participant_ids, &people, "passenger", &m.id);
                    if let Some(d) = va.driver_id.take() {
                        let mut ids = vec![d];
                        keep(&mut ids, &people, "driver", &m.id);
                        va.driver_id = ids.pop();
                    }
                }
            }
        }
        for v in &mut self.vehicles {
            if let Some(loc) = v.origination_location_id.take() {
                let mut ids = vec![loc];
                keep(&mut ids, &places, "location", &v.id);
                v.origination_location_id = ids.pop();
            }
        }

        Ok(warnings)
    }

    /// Every store id must be new to the database; a day's event must be in
    /// the store or already stored.
    fn check_conflicts(&self, pool: &DbPool) -> AppResult<()> {
        for ev in &self.events {
            if load_event(&pool.conn, &ev.id)?.is_some() {
                return Err(AppError::Duplicate(format!("Event {}", ev.id)));
            }
        }
        for p in &self.participants {
            if participant_exists(&pool.conn, &p.id)? {
                return Err(AppError::Duplicate(format!("Participant {}", p.id)));
            }
        }
        for l in &self.locations {
            if load_location(&pool.conn, &l.id)?.is_some() {
                return Err(AppError::Duplicate(format!("Location {}", l.id)));
            }
        }
        for v in &self.vehicles {
            if load_vehicle(&pool.conn, &v.id)?.is_some() {
                return Err(AppError::Duplicate(format!("Vehicle {}", v.id)));
            }
        }

        // Day contents: unique within the store and new to the database.
        let mut seen = HashSet::new();
        for day in &self.days {
            claim(&mut seen, "Day", &day.id, load_day(&pool.conn, &day.id)?.is_some())?;
            for b in &day.blocks {
                claim(&mut seen, "Block", &b.id, load_block(&pool.conn, &b.id)?.is_some())?;
                for item in &b.schedule_items {
                    let stored = block_id_for_item(&pool.conn, &item.id)?.is_some();
                    claim(&mut seen, "Schedule item", &item.id, stored)?;
                }
            }
            for m in &day.movements {
                let stored = load_movement(&pool.conn, &m.id)?.is_some();
                claim(&mut seen, "Movement", &m.id, stored)?;
            }
        }

        let store_events: HashSet<&str> = self.events.iter().map(|e| e.id.as_str()).collect();
        for day in &self.days {
            if !store_events.contains(day.event_id.as_str())
                && load_event(&pool.conn, &day.event_id)?.is_none()
            {
                return Err(AppError::Import(format!(
                    "day {} belongs to unknown event '{}'",
                    day.id, day.event_id
                )));
            }
        }
        Ok(())
    }

    /// Writes the whole store. Nothing is written when any record fails.
    pub fn import_into(mut self, pool: &mut DbPool) -> AppResult<ImportSummary> {
        self.check_conflicts(pool)?;
        let warnings = self.prune_references(pool)?;

        let tx = pool.conn.transaction()?;
        let mut summary = ImportSummary {
            warnings,
            ..Default::default()
        };

        for l in &self.locations {
            insert_location(&tx, l)?;
            summary.locations += 1;
        }
        for p in &self.participants {
            insert_participant(&tx, p)?;
            summary.participants += 1;
        }
        for v in &self.vehicles {
            insert_vehicle(&tx, v)?;
            summary.vehicles += 1;
        }
        for ev in &self.events {
            insert_event(&tx, ev)?;
            summary.events += 1;
        }
        for day in &self.days {
            insert_day(&tx, day)?;
            summary.days += 1;

            for (pos, b) in day.blocks.iter().enumerate() {
                insert_block(&tx, &day.id, pos as i64, b)?;
                summary.blocks += 1;
            }
            for (pos, m) in day.movements.iter().enumerate() {
                insert_movement(&tx, &day.id, pos as i64, m)?;
                summary.movements += 1;
            }
        }

        ttlog(
            &tx,
            "import",
            &format!("store v{}", self.version),
            &format!(
                "{} events, {} days, {} blocks, {} movements imported",
                summary.events, summary.days, summary.blocks, summary.movements
            ),
        )?;
        tx.commit()?;

        Ok(summary)
    }
}

fn claim<'a>(
    seen: &mut HashSet<(&'static str, &'a str)>,
    kind: &'static str,
    id: &'a str,
    stored: bool,
) -> AppResult<()> {
    if stored || !seen.insert((kind, id)) {
        return Err(AppError::Duplicate(format!("{} {}", kind, id)));
    }
    Ok(())
}
