pub mod breakdown;
pub mod hours;
