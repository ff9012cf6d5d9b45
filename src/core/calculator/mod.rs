//! Derived-time calculations. Pure functions over already loaded models.

pub mod arrival;
pub mod block_end;
pub mod timeline;

pub use arrival::resolve_movement_arrival;
pub use block_end::resolve_block_end_time;
pub use timeline::{TimelineEntry, TimelineItem, build_timeline};
