//! CSV activity logs to canonical records.
//!
//! Every file in the log directory carrying the configured suffix is read
//! row by row. Records keep the order they had inside their file; files
//! follow directory order unless `sort_files` is set.

mod row;
mod timestamp;

use std::{
    fs,
    path::{Path, PathBuf},
};

use csv::ReaderBuilder;

use crate::error::ParseError;
use crate::models::ActivityRecord;
use crate::settings::{MigrateSettings, TimeBasis};
use crate::{log_info, log_warn};

pub use row::{parse_row, reassemble_title};
pub use timestamp::{parse_timestamp, MAX_TIMESTAMP_LEN};

const ENABLE_LOGS: bool = true;

#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    pub suffix: String,
    pub time_basis: TimeBasis,
    pub sort_files: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self::from(&MigrateSettings::default())
    }
}

impl From<&MigrateSettings> for NormalizeOptions {
    fn from(settings: &MigrateSettings) -> Self {
        Self {
            suffix: settings.log_suffix.clone(),
            time_basis: settings.time_basis,
            sort_files: settings.sort_files,
        }
    }
}

pub struct Normalizer {
    options: NormalizeOptions,
}

impl Normalizer {
    pub fn new(options: NormalizeOptions) -> Self {
        Self { options }
    }

    /// Regular files in `dir` whose name ends with the log suffix.
    pub fn log_files(&self, dir: &Path) -> Result<Vec<PathBuf>, ParseError> {
        let io_err = |source| ParseError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut files = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            let matches = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(&self.options.suffix));
            if !matches {
                continue;
            }

            // metadata follows symlinks, so a linked log counts as a file
            let metadata = fs::metadata(&path).map_err(|source| ParseError::Io {
                path: path.clone(),
                source,
            })?;
            if metadata.is_file() {
                files.push(path);
            }
        }

        if self.options.sort_files {
            files.sort();
        }

        Ok(files)
    }

    pub fn normalize_dir(&self, dir: &Path) -> Result<Vec<ActivityRecord>, ParseError> {
        let files = self.log_files(dir)?;
        if files.is_empty() {
            log_warn!(
                "No *{} files found in {}",
                self.options.suffix,
                dir.display()
            );
        }

        let mut records = Vec::new();
        for path in &files {
            let before = records.len();
            self.normalize_file(path, &mut records)?;
            log_info!(
                "Normalized {} records from {}",
                records.len() - before,
                path.display()
            );
        }

        Ok(records)
    }

    /// Appends the records of one log file. Stops at the first bad row.
    pub fn normalize_file(
        &self,
        path: &Path,
        records: &mut Vec<ActivityRecord>,
    ) -> Result<(), ParseError> {
        let csv_err = |source| ParseError::Csv {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .map_err(csv_err)?;

        for row in reader.records() {
            let row = row.map_err(csv_err)?;
            let record =
                parse_row(&row, self.options.time_basis).map_err(|source| ParseError::Row {
                    path: path.to_path_buf(),
                    line: row.position().map(|pos| pos.line()).unwrap_or_default(),
                    source,
                })?;
            records.push(record);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RowError;
    use pretty_assertions::assert_eq;

    fn options(sort_files: bool) -> NormalizeOptions {
        NormalizeOptions {
            suffix: ".csv".into(),
            time_basis: TimeBasis::Utc,
            sort_files,
        }
    }

    fn line(second: u32, exe: &str, title: &str) -> String {
        format!(
            "2022-10-31 09:34:{second:02}.1000000,2022-10-31 09:34:{:02}.2000000,  99 ,{exe},{title}\n",
            second + 1
        )
    }

    #[test]
    fn reads_only_log_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("31-Oct-2022.csv"), line(1, "a.exe", "A")).unwrap();
        fs::write(dir.path().join("notes.txt"), "not,a,log").unwrap();
        fs::create_dir(dir.path().join("archive.csv")).unwrap();

        let records = Normalizer::new(options(false))
            .normalize_dir(dir.path())
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].executable, "a.exe");
        assert_eq!(records[0].pid, "99");
        assert_eq!(records[0].duration_ms(), 1_100);
    }

    #[cfg(unix)]
    #[test]
    fn follows_symlinked_logs() {
        let dir = tempfile::tempdir().unwrap();
        let elsewhere = tempfile::tempdir().unwrap();
        let target = elsewhere.path().join("saved.log");
        fs::write(&target, line(1, "a.exe", "A")).unwrap();
        std::os::unix::fs::symlink(&target, dir.path().join("31-Oct-2022.csv")).unwrap();
        std::os::unix::fs::symlink(elsewhere.path(), dir.path().join("old.csv")).unwrap();

        let records = Normalizer::new(options(false))
            .normalize_dir(dir.path())
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].executable, "a.exe");
    }

    #[cfg(unix)]
    #[test]
    fn dangling_log_link_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let link = dir.path().join("31-Oct-2022.csv");
        std::os::unix::fs::symlink(dir.path().join("gone.csv"), &link).unwrap();

        let err = Normalizer::new(options(false))
            .normalize_dir(dir.path())
            .unwrap_err();

        assert!(matches!(err, ParseError::Io { ref path, .. } if *path == link));
    }

    #[test]
    fn keeps_file_order_and_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let first = [line(5, "b.exe", "x"), line(1, "a.exe", "y"), line(5, "b.exe", "x")].concat();
        fs::write(dir.path().join("a.csv"), first).unwrap();
        fs::write(dir.path().join("b.csv"), line(9, "c.exe", "Hello, World")).unwrap();

        let records = Normalizer::new(options(true))
            .normalize_dir(dir.path())
            .unwrap();

        let exes: Vec<_> = records.iter().map(|r| r.executable.as_str()).collect();
        assert_eq!(exes, ["b.exe", "a.exe", "b.exe", "c.exe"]);
        assert_eq!(records[0], records[2]);
        assert_eq!(records[3].title, "Hello, World");
    }

    #[test]
    fn quoted_titles_survive() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("q.csv"),
            "\"2022-10-31 09:34:16.7454559\",\"2022-10-31 09:34:20.0000000\",\"1234\",\"app.exe\",\"Hello, World\"\n",
        )
        .unwrap();

        let records = Normalizer::new(options(false))
            .normalize_dir(dir.path())
            .unwrap();

        assert_eq!(
            records,
            vec![ActivityRecord {
                start: 1_667_208_856_745,
                end: 1_667_208_860_000,
                pid: "1234".into(),
                executable: "app.exe".into(),
                title: "Hello, World".into(),
            }]
        );
    }

    #[test]
    fn bad_row_names_file_line_and_value() {
        let dir = tempfile::tempdir().unwrap();
        let contents = format!("{}bogus,2022-10-31 09:34:20,1,x.exe,t\n", line(1, "a.exe", "A"));
        fs::write(dir.path().join("broken.csv"), contents).unwrap();

        let err = Normalizer::new(options(false))
            .normalize_dir(dir.path())
            .unwrap_err();

        match &err {
            ParseError::Row { path, line, source } => {
                assert!(path.ends_with("broken.csv"));
                assert_eq!(*line, 2);
                assert!(matches!(source, RowError::Timestamp { field: "start", .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
        let message = err.to_string();
        assert!(message.contains("broken.csv:2"), "{message}");
        assert!(message.contains("'bogus'"), "{message}");
    }

    #[test]
    fn missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Normalizer::new(options(false))
            .normalize_dir(&dir.path().join("gone"))
            .unwrap_err();
        assert!(matches!(err, ParseError::Io { .. }));
    }

    #[test]
    fn empty_directory_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let records = Normalizer::new(options(false))
            .normalize_dir(dir.path())
            .unwrap();
        assert!(records.is_empty());
    }
}
