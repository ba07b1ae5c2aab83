use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Keys every configuration file is expected to carry.
const REQUIRED_KEYS: [&str; 6] = [
    "database",
    "default_shift_start",
    "default_shift_end",
    "standard_day",
    "logged_in_member",
    "separator_char",
];

/// Return the keys missing from the YAML file at `path`.
pub fn missing_keys(path: &Path) -> AppResult<Vec<&'static str>> {
    let content = fs::read_to_string(path)?;
    let yaml: Value = serde_yaml::from_str(&content)?;

    let map = yaml.as_mapping().cloned().unwrap_or_default();

    Ok(REQUIRED_KEYS
        .iter()
        .filter(|k| !map.contains_key(Value::String((*k).to_string())))
        .copied()
        .collect())
}

/// Print which keys are missing from the configuration file.
pub fn check_config_file(path: &Path) -> AppResult<bool> {
    if !path.exists() {
        warning(format!(
            "Configuration file not found: {} (run `crewtime init`)",
            path.display()
        ));
        return Ok(false);
    }

    let missing = missing_keys(path)?;
    if missing.is_empty() {
        success("Configuration file is complete.");
        Ok(true)
    } else {
        for k in &missing {
            warning(format!("Missing configuration key: {}", k));
        }
        Ok(false)
    }
}

/// Add missing keys (with their default values) to the configuration file.
/// Existing values are never overwritten.
/// Returns:
///   Ok(true)  → config updated
///   Ok(false) → no change needed
pub fn migrate_config_file(path: &Path) -> AppResult<bool> {
    if !path.exists() {
        return Ok(false);
    }

    let content = fs::read_to_string(path)?;
    let mut yaml: Value = serde_yaml::from_str(&content)?;

    if !yaml.is_mapping() {
        yaml = Value::Mapping(Mapping::new());
    }

    let defaults = serde_yaml::to_value(Config::default())?;
    let mut changed = false;

    if let (Some(map), Some(def_map)) = (yaml.as_mapping_mut(), defaults.as_mapping()) {
        for key in REQUIRED_KEYS {
            let k = Value::String(key.to_string());
            if !map.contains_key(&k) {
                let v = def_map.get(&k).cloned().unwrap_or(Value::Null);
                info(format!("Adding missing key '{}'", key));
                map.insert(k, v);
                changed = true;
            }
        }
    }

    if changed {
        fs::write(path, serde_yaml::to_string(&yaml)?)?;
        success(format!("Configuration migrated: {}", path.display()));
    }

    Ok(changed)
}
