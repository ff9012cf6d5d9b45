//! Planning data model.
//!
//! Field names serialize in camelCase so JSON exports and imports keep the
//! shape used by the planning REST API.

pub mod block;
pub mod day;
pub mod event;
pub mod location;
pub mod movement;
pub mod participant;
pub mod vehicle;

pub use block::{Block, BlockType, ScheduleItem};
pub use day::Day;
pub use event::Event;
pub use location::{Location, LocationType};
pub use movement::{DrivingTime, Movement, ToTimeType, VehicleAssignment};
pub use participant::Participant;
pub use vehicle::Vehicle;

use serde::{Deserialize, Deserializer};

/// Treats an explicit JSON `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// New random identifier for any planning entity.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
