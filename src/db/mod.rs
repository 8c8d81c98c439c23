use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::{log_error, log_info};

pub mod repositories;

pub use repositories::activities::ActivityRepository;

const ENABLE_LOGS: bool = true;

const CREATE_ACTIVITIES: &str = include_str!("schemas/activities.sql");

/// Single-writer handle on the activity store. The loader holds it
/// exclusively for the whole run.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// SQLite creates the file if it is missing, but never its directory.
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)
            .with_context(|| format!("failed to open SQLite database {}", db_path.display()))?;
        Self::configure(&conn);

        log_info!("Database opened at {}", db_path.display());

        Ok(Self { conn })
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("failed to open in-memory database")?;
        Self::configure(&conn);
        Ok(Self { conn })
    }

    fn configure(conn: &Connection) {
        // every per-record commit must reach disk before the next insert
        if let Err(err) = conn.pragma_update(None, "synchronous", "FULL") {
            log_error!("Failed to set synchronous=FULL: {err}");
        }
    }

    /// The activities table normally already exists; this is for fresh stores.
    pub fn ensure_activities_table(&self) -> Result<()> {
        self.conn
            .execute_batch(CREATE_ACTIVITIES)
            .context("failed to create activities table")
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    pub fn activities(&self) -> ActivityRepository<'_> {
        ActivityRepository::new(&self.conn)
    }
}
