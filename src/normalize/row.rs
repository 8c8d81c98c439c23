use csv::StringRecord;

use crate::error::RowError;
use crate::models::ActivityRecord;
use crate::settings::TimeBasis;

use super::timestamp::parse_timestamp;

const FIELD_DELIMITER: &str = ",";

const START: usize = 0;
const END: usize = 1;
const PID: usize = 2;
const EXECUTABLE: usize = 3;
const TITLE: usize = 4;

fn field<'r>(row: &'r StringRecord, index: usize, name: &'static str) -> Result<&'r str, RowError> {
    row.get(index).ok_or(RowError::MissingField {
        field: name,
        found: row.len(),
    })
}

/// Window titles are not quoted by the tracker, so a title containing commas
/// arrives split over every field from `TITLE` on. Glue it back together.
pub fn reassemble_title(row: &StringRecord) -> String {
    row.iter()
        .skip(TITLE)
        .collect::<Vec<_>>()
        .join(FIELD_DELIMITER)
        .trim()
        .to_string()
}

pub fn parse_row(row: &StringRecord, basis: TimeBasis) -> Result<ActivityRecord, RowError> {
    let timestamp = |index: usize, name: &'static str| -> Result<i64, RowError> {
        parse_timestamp(field(row, index, name)?, basis)
            .map_err(|source| RowError::Timestamp { field: name, source })
    };

    Ok(ActivityRecord {
        start: timestamp(START, "start")?,
        end: timestamp(END, "end")?,
        pid: field(row, PID, "pid")?.trim().to_string(),
        executable: field(row, EXECUTABLE, "executable")?.trim().to_string(),
        title: reassemble_title(row),
    })
}
