use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

/// How a naive log timestamp is placed on the epoch.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimeBasis {
    /// Wall-clock time of the machine running the migration.
    #[default]
    Local,
    Utc,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MigrateSettings {
    pub log_suffix: String,
    pub artifact_path: PathBuf,
    pub time_basis: TimeBasis,
    pub sort_files: bool,
    pub create_table: bool,
}

impl Default for MigrateSettings {
    fn default() -> Self {
        Self {
            log_suffix: ".csv".into(),
            artifact_path: PathBuf::from("entries.json"),
            time_basis: TimeBasis::Local,
            sort_files: false,
            create_table: false,
        }
    }
}

impl MigrateSettings {
    /// Defaults when `path` is `None`; otherwise the file must exist and parse.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Invalid settings in {}", path.display()))
    }
}
