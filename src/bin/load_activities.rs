use std::{path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::Parser;

use activity_migrate_lib::settings::MigrateSettings;

/// Insert a migration artifact into the activities table, one committed row
/// at a time. On failure prints the failing index; pass it back as START to
/// resume.
#[derive(Debug, Parser)]
#[command(name = "load-activities", version)]
struct Args {
    /// SQLite database holding the activities table
    database: PathBuf,

    /// Artifact produced by normalize-logs
    artifact: PathBuf,

    /// Index of the first record to insert
    #[arg(default_value_t = 0)]
    start: usize,

    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Create the activities table if it does not exist
    #[arg(long)]
    create_table: bool,
}

fn main() -> Result<ExitCode> {
    activity_migrate_lib::init_logging();
    let args = Args::parse();

    let mut settings = MigrateSettings::load(args.settings.as_deref())?;
    if args.create_table {
        settings.create_table = true;
    }

    let report =
        activity_migrate_lib::run_load(&args.database, &args.artifact, args.start, &settings)?;
    match report.into_result() {
        Ok(inserted) => {
            log::info!("Done, {inserted} records inserted");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            println!("{err}");
            Ok(ExitCode::FAILURE)
        }
    }
}
