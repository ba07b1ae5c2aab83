pub mod backup;
pub mod breakdown;
pub mod calculator;
pub mod config;
pub mod crew;
pub mod entries;
pub mod log;
pub mod status;
pub mod submit;
pub mod verify;
