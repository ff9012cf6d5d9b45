//! Versioned migrations for JSON stores.
//!
//! A store carries a numeric `version`. Stores written by the browser mock
//! API use version 1 (or none) and still have the old shapes: movement
//! blocks, block-level instructions, missing arrays. Each migration lifts
//! the document by one version and runs exactly once, at import time.

use crate::errors::{AppError, AppResult};
use crate::models::new_id;
use serde_json::{Map, Value, json};

pub const CURRENT_VERSION: u64 = 2;

type StoreMigration = fn(&mut Map<String, Value>) -> AppResult<()>;

/// (target version, description, migration) in application order.
const MIGRATIONS: &[(u64, &str, StoreMigration)] = &[(
    2,
    "normalize legacy mock store (movements, schedule items, end time mode)",
    normalize_legacy_store,
)];

fn store_version(root: &Map<String, Value>) -> u64 {
    root.get("version").and_then(Value::as_u64).unwrap_or(0)
}

/// Applies every pending migration; returns the descriptions of those run.
pub fn migrate_store(doc: &mut Value) -> AppResult<Vec<&'static str>> {
    let root = doc
        .as_object_mut()
        .ok_or_else(|| AppError::Import("store must be a JSON object".into()))?;

    let version = store_version(root);
    if version > CURRENT_VERSION {
        return Err(AppError::Import(format!(
            "store version {} is newer than supported version {}",
            version, CURRENT_VERSION
        )));
    }

    let mut applied = Vec::new();
    for (target, description, migration) in MIGRATIONS {
        if store_version(root) < *target {
            migration(root)?;
            root.insert("version".into(), json!(target));
            applied.push(*description);
        }
    }

    Ok(applied)
}

/// Ensures `obj[key]` is an array and returns it.
fn ensure_array<'a>(obj: &'a mut Map<String, Value>, key: &str) -> &'a mut Vec<Value> {
    let slot = obj.entry(key).or_insert_with(|| json!([]));
    if !slot.is_array() {
        *slot = json!([]);
    }
    match slot {
        Value::Array(items) => items,
        _ => unreachable!("slot was just set to an array"),
    }
}

fn str_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// A driving movement that only has the minutes string gets the
/// hours/minutes pair; `fromTimeType` is gone (departures are always fixed).
fn normalize_movement(m: &mut Map<String, Value>) {
    m.remove("fromTimeType");

    let driving = m.get("toTimeType").and_then(Value::as_str) == Some("driving");
    if driving && !m.contains_key("drivingTimeHours") {
        let total: i64 = match m.get("toTime") {
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
            Some(Value::Number(n)) => n.as_i64().unwrap_or(0),
            _ => 0,
        };
        m.insert("drivingTimeHours".into(), json!(total.div_euclid(60)));
        m.insert("drivingTimeMinutes".into(), json!(total.rem_euclid(60)));
    }
}

/// Legacy `movement` blocks with both endpoints become fixed movements.
fn movement_from_block(day_id: &Value, b: &Map<String, Value>) -> Option<Value> {
    let from = str_field(b, "locationStartId")?;
    let to = str_field(b, "locationEndId")?;

    Some(json!({
        "id": new_id(),
        "dayId": day_id,
        "title": b.get("title").cloned().unwrap_or(json!("")),
        "description": b.get("description").cloned().unwrap_or(Value::Null),
        "fromLocationId": from,
        "toLocationId": to,
        "fromTime": b.get("startTime").cloned().unwrap_or(json!("")),
        "toTime": b.get("endTime").cloned().unwrap_or(json!("")),
        "toTimeType": "fixed",
        "vehicleAssignments": [],
        "notes": b.get("notes").cloned().unwrap_or(Value::Null),
    }))
}

fn normalize_block(b: &mut Map<String, Value>) {
    b.remove("locationStartId");
    b.remove("locationEndId");

    for item in ensure_array(b, "scheduleItems").iter_mut() {
        if let Some(item) = item.as_object_mut() {
            item.entry("staffInstructions").or_insert(Value::Null);
            item.entry("guestInstructions").or_insert(Value::Null);
        }
    }

    b.remove("staffInstructions");
    b.remove("guestInstructions");

    b.entry("endTimeFixed").or_insert(json!(false));
}

fn normalize_day(day: &mut Map<String, Value>) {
    let day_id = day.get("id").cloned().unwrap_or(Value::Null);

    for m in ensure_array(day, "movements").iter_mut() {
        if let Some(m) = m.as_object_mut() {
            normalize_movement(m);
        }
    }

    let blocks = std::mem::take(ensure_array(day, "blocks"));
    let mut kept = Vec::with_capacity(blocks.len());
    let mut converted = Vec::new();

    for block in blocks {
        let is_movement = block.get("type").and_then(Value::as_str) == Some("movement");
        match block {
            Value::Object(b) if is_movement => {
                if let Some(m) = movement_from_block(&day_id, &b) {
                    converted.push(m);
                }
            }
            Value::Object(mut b) => {
                normalize_block(&mut b);
                kept.push(Value::Object(b));
            }
            _ => {}
        }
    }

    day.insert("blocks".into(), Value::Array(kept));
    ensure_array(day, "movements").extend(converted);
}

fn normalize_legacy_store(root: &mut Map<String, Value>) -> AppResult<()> {
    for key in ["events", "participants", "locations", "vehicles"] {
        ensure_array(root, key);
    }

    for day in ensure_array(root, "days").iter_mut() {
        if let Some(day) = day.as_object_mut() {
            normalize_day(day);
        }
    }

    Ok(())
}
