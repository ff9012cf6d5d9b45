pub mod blocks;
pub mod days;
pub mod db_utils;
pub mod events;
pub mod initialize;
pub mod locations;
pub mod log;
pub mod migrate;
pub mod movements;
pub mod participants;
pub mod pool;
pub mod stats;
pub mod vehicles;
