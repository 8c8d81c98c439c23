use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use activity_migrate_lib::settings::{MigrateSettings, TimeBasis};

/// Normalize a directory of CSV activity logs into a JSON migration artifact.
#[derive(Debug, Parser)]
#[command(name = "normalize-logs", version)]
struct Args {
    /// Directory containing the tracker's CSV logs
    input_dir: PathBuf,

    /// Where to write the artifact (default: entries.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Read log files in file-name order instead of directory order
    #[arg(long)]
    sorted: bool,

    /// Treat log timestamps as UTC instead of local time
    #[arg(long)]
    utc: bool,
}

fn main() -> Result<()> {
    activity_migrate_lib::init_logging();
    let args = Args::parse();

    let mut settings = MigrateSettings::load(args.settings.as_deref())?;
    if args.sorted {
        settings.sort_files = true;
    }
    if args.utc {
        settings.time_basis = TimeBasis::Utc;
    }
    let output = args.output.unwrap_or_else(|| settings.artifact_path.clone());

    let count = activity_migrate_lib::run_normalize(&args.input_dir, &output, &settings)?;
    log::info!("Normalized {count} records into {}", output.display());
    Ok(())
}
