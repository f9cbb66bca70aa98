//! Per-object YAML configuration.
//!
//! Each object gets a `config/{object}.yaml` describing its record types,
//! the fields to grant access to, and the fields to withhold.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Standard fields withheld from generated templates.
pub const STANDARD_RESTRICTED_FIELDS: [&str; 9] = [
    "Id",
    "OwnerId",
    "IsDeleted",
    "SystemModstamp",
    "CreatedDate",
    "CreatedById",
    "LastModifiedDate",
    "LastModifiedById",
    "LastActivityDate",
];

/// Permission configuration for one object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectConfig {
    /// Record type developer names declared for the object.
    #[serde(default)]
    pub record_types: Vec<String>,

    /// Fields to grant access to.
    #[serde(default)]
    pub fields: Vec<String>,

    /// Fields withheld from the grant even if listed in `fields`.
    #[serde(default)]
    pub restricted_fields: Vec<String>,
}

impl ObjectConfig {
    /// The fields to grant: `fields` minus `restricted_fields`.
    pub fn allowed_fields(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter(|field| !self.restricted_fields.contains(field))
            .cloned()
            .collect()
    }
}

/// Path of the configuration file for an object.
pub fn config_path(config_dir: &Path, object_name: &str) -> PathBuf {
    config_dir.join(format!("{}.yaml", object_name))
}

/// Load the configuration for an object.
pub fn load(config_dir: &Path, object_name: &str) -> Result<ObjectConfig> {
    let path = config_path(config_dir, object_name);

    let contents = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read configuration file {}", path.display()))?;

    serde_yaml::from_str(&contents)
        .with_context(|| format!("Invalid YAML in {}", path.display()))
}

/// Write the configuration for an object, creating the directory if needed.
pub fn save(config_dir: &Path, object_name: &str, config: &ObjectConfig) -> Result<PathBuf> {
    fs::create_dir_all(config_dir).with_context(|| {
        format!("Failed to create config directory {}", config_dir.display())
    })?;

    let path = config_path(config_dir, object_name);
    let yaml = serde_yaml::to_string(config)?;

    fs::write(&path, yaml)
        .with_context(|| format!("Failed to write configuration file {}", path.display()))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ObjectConfig {
        ObjectConfig {
            record_types: vec!["Master".to_string()],
            fields: vec![
                "Name".to_string(),
                "Status".to_string(),
                "OwnerId".to_string(),
            ],
            restricted_fields: vec!["OwnerId".to_string()],
        }
    }

    #[test]
    fn allowed_fields_excludes_restricted() {
        let config = sample();
        assert_eq!(config.allowed_fields(), vec!["Name", "Status"]);
    }

    #[test]
    fn round_trips_through_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = save(dir.path(), "Order", &sample()).unwrap();
        assert_eq!(path, dir.path().join("Order.yaml"));

        let loaded = load(dir.path(), "Order").unwrap();
        assert_eq!(loaded.record_types, vec!["Master"]);
        assert_eq!(loaded.allowed_fields(), vec!["Name", "Status"]);
    }

    #[test]
    fn load_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(dir.path(), "Missing").unwrap_err();
        assert!(err.to_string().contains("Missing.yaml"));
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(config_path(dir.path(), "Order"), "fields:\n  - Name\n").unwrap();

        let loaded = load(dir.path(), "Order").unwrap();
        assert!(loaded.record_types.is_empty());
        assert!(loaded.restricted_fields.is_empty());
        assert_eq!(loaded.fields, vec!["Name"]);
    }
}
