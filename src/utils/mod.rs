pub mod colors;
pub mod date;
pub mod formatting;
pub mod path;
pub mod table;
pub mod time;

// Short paths for the most common helpers
pub use formatting::mins2hours;
pub use formatting::mins2readable;
