//! The migration artifact: the full, ordered list of normalized records handed
//! from the normalizer to the loader as one JSON document.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::log_info;
use crate::models::ActivityRecord;

const ENABLE_LOGS: bool = true;

pub fn to_json(records: &[ActivityRecord]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    records
        .serialize(&mut serializer)
        .context("failed to serialize activity records")?;
    Ok(buffer)
}

pub fn write_artifact(path: &Path, records: &[ActivityRecord]) -> Result<()> {
    let serialized = to_json(records)?;
    fs::write(path, serialized)
        .with_context(|| format!("Failed to write artifact to {}", path.display()))?;
    log_info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

pub fn read_artifact(path: &Path) -> Result<Vec<ActivityRecord>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read artifact from {}", path.display()))?;
    let records: Vec<ActivityRecord> = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid artifact {}", path.display()))?;
    log_info!("Read {} records from {}", records.len(), path.display());
    Ok(records)
}
