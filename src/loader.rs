//! Resumable bulk insert of an artifact into the activities table.
//!
//! Each record is its own transaction, committed before the next one is
//! tried. The first failure halts the run and reports the record's index;
//! running again with that index as the start picks up exactly where the
//! previous run stopped. Nothing is deduplicated: restarting below the
//! reported index inserts those rows a second time.

use rusqlite::Connection;

use crate::db::{ActivityRepository, Database};
use crate::error::InsertError;
use crate::models::ActivityRecord;
use crate::{log_debug, log_error, log_info, log_warn};

const ENABLE_LOGS: bool = true;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Running,
    Done,
    Halted,
}

#[derive(Debug)]
pub struct LoadReport {
    pub status: LoadStatus,
    pub start: usize,
    pub inserted: usize,
    /// First index not yet committed.
    pub next_index: usize,
    pub error: Option<InsertError>,
}

impl LoadReport {
    fn new(start: usize) -> Self {
        Self {
            status: LoadStatus::Running,
            start,
            inserted: 0,
            next_index: start,
            error: None,
        }
    }

    /// Where the next invocation should start, if this one halted.
    pub fn resume_index(&self) -> Option<usize> {
        match self.status {
            LoadStatus::Halted => Some(self.next_index),
            LoadStatus::Running | LoadStatus::Done => None,
        }
    }

    pub fn into_result(self) -> Result<usize, InsertError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.inserted),
        }
    }
}

pub struct Loader<'db> {
    db: &'db mut Database,
    start: usize,
}

impl<'db> Loader<'db> {
    pub fn new(db: &'db mut Database) -> Self {
        Self { db, start: 0 }
    }

    pub fn start_at(mut self, start: usize) -> Self {
        self.start = start;
        self
    }

    pub fn run(&mut self, records: &[ActivityRecord]) -> LoadReport {
        let mut report = LoadReport::new(self.start);

        if self.start > records.len() {
            log_warn!(
                "Start index {} is past the end of the artifact ({} records); nothing to do",
                self.start,
                records.len()
            );
        }

        for (index, record) in records.iter().enumerate().skip(self.start) {
            log_debug!("Inserting record {index}");
            if let Err(source) = insert_committed(self.db.connection_mut(), record) {
                let err = InsertError { index, source };
                log_error!("{err}");
                report.status = LoadStatus::Halted;
                report.error = Some(err);
                return report;
            }
            report.inserted += 1;
            report.next_index = index + 1;
        }

        report.status = LoadStatus::Done;
        log_info!(
            "Inserted {} records starting at index {}",
            report.inserted,
            report.start
        );
        report
    }
}

/// One record, one transaction. The statement either lands and is
/// committed or the transaction is rolled back on drop.
fn insert_committed(conn: &mut Connection, record: &ActivityRecord) -> rusqlite::Result<()> {
    let tx = conn.transaction()?;
    ActivityRepository::new(&tx).insert(record)?;
    tx.commit()
}
