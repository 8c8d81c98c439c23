//! Canonical activity record.
//!
//! One tracked interval of foreground activity, already normalized: both
//! timestamps as epoch milliseconds and every text field trimmed. On disk and
//! on the wire it is a 5-element array in the same order as the `activities`
//! table columns.

use serde::{ser::SerializeTuple, Deserialize, Serialize, Serializer};

/// Column order shared by the artifact and the `activities` table.
type RecordRow = (i64, i64, String, String, String);

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RecordRow")]
pub struct ActivityRecord {
    pub start: i64,
    pub end: i64,
    pub pid: String,
    pub executable: String,
    pub title: String,
}

impl ActivityRecord {
    /// `end - start`. Negative when the source row had its times swapped,
    /// which is passed through untouched.
    pub fn duration_ms(&self) -> i64 {
        self.end - self.start
    }
}

impl From<RecordRow> for ActivityRecord {
    fn from((start, end, pid, executable, title): RecordRow) -> Self {
        Self {
            start,
            end,
            pid,
            executable,
            title,
        }
    }
}

impl Serialize for ActivityRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut tuple = serializer.serialize_tuple(5)?;
        tuple.serialize_element(&self.start)?;
        tuple.serialize_element(&self.end)?;
        tuple.serialize_element(&self.pid)?;
        tuple.serialize_element(&self.executable)?;
        tuple.serialize_element(&self.title)?;
        tuple.end()
    }
}
