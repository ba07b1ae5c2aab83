pub mod breakdown;
pub mod crew;
pub mod entry_status;
pub mod shift;
pub mod time_entry;
