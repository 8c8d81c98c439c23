pub mod artifact;
pub mod db;
pub mod error;
pub mod loader;
pub mod models;
pub mod normalize;
pub mod settings;
mod utils;

use std::path::Path;

use anyhow::{Context, Result};

use db::Database;
use loader::{LoadReport, Loader};
use normalize::{NormalizeOptions, Normalizer};
use settings::MigrateSettings;

pub use error::{InsertError, ParseError};
pub use models::ActivityRecord;
pub use utils::logging::init_logging;

/// Log directory to artifact file. Returns how many records were written.
pub fn run_normalize(input_dir: &Path, output: &Path, settings: &MigrateSettings) -> Result<usize> {
    let records = Normalizer::new(NormalizeOptions::from(settings))
        .normalize_dir(input_dir)
        .with_context(|| format!("failed to normalize logs in {}", input_dir.display()))?;
    artifact::write_artifact(output, &records)?;
    Ok(records.len())
}

/// Artifact file into the activities table, from `start` on.
///
/// Opening the store or reading the artifact failing is an `Err`; a record
/// failing to insert is not, it ends the returned report in `Halted`.
pub fn run_load(
    db_path: &Path,
    artifact_path: &Path,
    start: usize,
    settings: &MigrateSettings,
) -> Result<LoadReport> {
    let records = artifact::read_artifact(artifact_path)?;
    let mut db = Database::open(db_path)?;
    if settings.create_table {
        db.ensure_activities_table()?;
    }

    log::info!(
        "Loading {} of {} records into {}",
        records.len().saturating_sub(start),
        records.len(),
        db_path.display()
    );
    Ok(Loader::new(&mut db).start_at(start).run(&records))
}
