pub mod agenda;
pub mod backup;
pub mod block;
pub mod calculator;
pub mod day;
pub mod event;
pub mod location;
pub mod log;
pub mod movement;
pub mod participant;
pub mod vehicle;
