//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid time range: end {end} must be later than start {start}")]
    InvalidTimeRange { start: String, end: String },

    #[error("Invalid hours value: {0}")]
    InvalidHours(String),

    #[error("Invalid breakdown category: {0}")]
    InvalidCategory(String),

    #[error("Invalid entry status: {0}")]
    InvalidStatus(String),

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error(
        "Categorized hours ({categorized}) exceed the logged total ({total}) for {member}"
    )]
    BreakdownExceedsTotal {
        member: String,
        categorized: String,
        total: String,
    },

    #[error("Cannot move entry from '{from}' to '{to}'")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Entry for {member} on {date} is approved and cannot be changed")]
    EntryLocked { member: String, date: String },

    #[error("Crew not found: {0}")]
    CrewNotFound(String),

    #[error("Crew member not found: {0}")]
    MemberNotFound(String),

    #[error("No crew selected: use --crew or set 'logged_in_member' in the configuration")]
    NoCrewSelected,

    #[error("No time entries found for {0}")]
    NoEntriesForDate(String),

    #[error("Crew {0} has no active members")]
    EmptyCrew(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
