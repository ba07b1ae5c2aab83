use crate::errors::{AppError, AppResult};
use crate::utils::time::{parse_duration_to_minutes, parse_time};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

pub mod migrate; // use submodule at src/config/migrate.rs

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_shift_start")]
    pub default_shift_start: String,
    #[serde(default = "default_shift_end")]
    pub default_shift_end: String,
    #[serde(default = "default_standard_day")]
    pub standard_day: String,
    #[serde(default)]
    pub logged_in_member: Option<i64>,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_shift_start() -> String {
    "09:00".to_string()
}
fn default_shift_end() -> String {
    "17:00".to_string()
}
fn default_standard_day() -> String {
    "8h".to_string()
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        let db_path = Self::database_file();
        Self {
            database: db_path.to_string_lossy().to_string(),
            default_shift_start: default_shift_start(),
            default_shift_end: default_shift_end(),
            standard_day: default_standard_day(),
            logged_in_member: None,
            separator_char: default_separator_char(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("crewtime")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".crewtime")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("crewtime.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("crewtime.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if path.exists() {
            let content = fs::read_to_string(&path)?;
            Ok(serde_yaml::from_str(&content)?)
        } else {
            Ok(Config::default())
        }
    }

    /// Default shift used for members without their own schedule.
    pub fn default_shift(&self) -> AppResult<(NaiveTime, NaiveTime)> {
        let start = parse_time(&self.default_shift_start)
            .ok_or_else(|| AppError::Config(format!(
                "invalid default_shift_start '{}'",
                self.default_shift_start
            )))?;
        let end = parse_time(&self.default_shift_end).ok_or_else(|| {
            AppError::Config(format!(
                "invalid default_shift_end '{}'",
                self.default_shift_end
            ))
        })?;

        if end <= start {
            return Err(AppError::Config(format!(
                "default shift end {} must be later than start {}",
                self.default_shift_end, self.default_shift_start
            )));
        }

        Ok((start, end))
    }

    /// First character of `separator_char`, used to draw table rules.
    pub fn separator(&self) -> char {
        self.separator_char.chars().next().unwrap_or('-')
    }

    /// Minutes of regular time per day; anything above is overtime.
    pub fn standard_day_minutes(&self) -> AppResult<i64> {
        parse_duration_to_minutes(&self.standard_day).ok_or_else(|| {
            AppError::Config(format!("invalid standard_day '{}'", self.standard_day))
        })
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_name {
            let p = std::path::Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            dir.join("crewtime.sqlite")
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            fs::create_dir_all(&dir)?;
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path).map_err(|e| {
                AppError::from(io::Error::new(
                    e.kind(),
                    format!("cannot create database {}: {}", db_path.display(), e),
                ))
            })?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(db_path)
    }
}
