use chrono::{DateTime, Duration, Local, LocalResult, NaiveDateTime, Offset, TimeZone};

use crate::error::TimestampError;
use crate::settings::TimeBasis;

/// Length of `YYYY-MM-DD HH:MM:SS.ffffff`. The tracker writes seven fractional
/// digits; anything past microseconds is cut before parsing.
pub const MAX_TIMESTAMP_LEN: usize = 26;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Parse a log timestamp into epoch milliseconds. Sub-millisecond precision
/// is truncated, never rounded.
pub fn parse_timestamp(raw: &str, basis: TimeBasis) -> Result<i64, TimestampError> {
    let truncated = match raw.char_indices().nth(MAX_TIMESTAMP_LEN) {
        Some((cut, _)) => &raw[..cut],
        None => raw,
    };

    let naive = NaiveDateTime::parse_from_str(truncated.trim(), TIMESTAMP_FORMAT).map_err(
        |source| TimestampError::Format {
            raw: raw.to_string(),
            source,
        },
    )?;

    match basis {
        TimeBasis::Utc => Ok(naive.and_utc().timestamp_millis()),
        TimeBasis::Local => resolve_local(&Local, &naive)
            .map(|dt| dt.timestamp_millis())
            .ok_or_else(|| TimestampError::NonexistentLocalTime {
                raw: raw.to_string(),
            }),
    }
}

/// Place a wall-clock time in `tz`. A repeated (fall-back) time takes its
/// first occurrence. A skipped (spring-forward) time keeps the offset that
/// was in force just before the gap, so 02:30 on a night that jumps from
/// 02:00 to 03:00 lands at 03:30 of the new offset.
fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: &NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => {
            let before_gap = (1..=24)
                .find_map(|hours| {
                    tz.from_local_datetime(&(*naive - Duration::hours(hours)))
                        .earliest()
                })?
                .offset()
                .fix();
            let utc = *naive - Duration::seconds(before_gap.local_minus_utc().into());
            Some(tz.from_utc_datetime(&utc))
        }
    }
}
