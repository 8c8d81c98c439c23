use rusqlite::{params, Connection, Row};

use crate::models::ActivityRecord;

/// Positional on purpose: the table's column order is the record's field
/// order, whatever the columns happen to be called.
const INSERT_ACTIVITY: &str = "INSERT INTO activities VALUES (?1, ?2, ?3, ?4, ?5)";

fn row_to_activity(row: &Row) -> Result<ActivityRecord, rusqlite::Error> {
    Ok(ActivityRecord {
        start: row.get(0)?,
        end: row.get(1)?,
        pid: row.get(2)?,
        executable: row.get(3)?,
        title: row.get(4)?,
    })
}

pub struct ActivityRepository<'a> {
    conn: &'a Connection,
}

impl<'a> ActivityRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn insert(&self, record: &ActivityRecord) -> rusqlite::Result<()> {
        let mut stmt = self.conn.prepare_cached(INSERT_ACTIVITY)?;
        stmt.execute(params![
            record.start,
            record.end,
            record.pid,
            record.executable,
            record.title,
        ])?;
        Ok(())
    }

    pub fn count(&self) -> rusqlite::Result<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM activities", [], |row| row.get(0))
    }

    /// Every row in insertion order.
    pub fn list_all(&self) -> rusqlite::Result<Vec<ActivityRecord>> {
        let mut stmt = self.conn.prepare("SELECT * FROM activities ORDER BY rowid")?;
        let activities = stmt
            .query_map([], row_to_activity)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(activities)
    }
}
