use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use time_humanize::HumanTime;

use crate::cooking::Doneness;
use crate::error::SteakError;
use crate::timer::SessionTimer;
use crate::util::format_clock;

/// One finished steak in the cook log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CookRecord {
    pub finished_at: DateTime<Local>,
    pub thickness_mm: u32,
    pub doneness: Doneness,
    pub total_secs: u32,
    pub synchronized: bool,
}

impl CookRecord {
    pub fn from_timer(timer: &SessionTimer, synchronized: bool, finished_at: DateTime<Local>) -> Self {
        let steak = timer.steak();
        Self {
            finished_at,
            thickness_mm: steak.thickness_mm,
            doneness: steak.doneness,
            total_secs: steak.total_duration(),
            synchronized,
        }
    }

    /// e.g. "25mm Medium Rare, 10:30 (synchronized), 2 hours ago"
    pub fn describe(&self, now: DateTime<Local>) -> String {
        let age = (now - self.finished_at).num_seconds().max(0);
        format!(
            "{}mm {}, {}{}, {}",
            self.thickness_mm,
            self.doneness,
            format_clock(self.total_secs),
            if self.synchronized { " (synchronized)" } else { "" },
            HumanTime::from_seconds(-age)
        )
    }
}

/// Append-only CSV log of finished cooks
#[derive(Debug, Clone)]
pub struct CookLog {
    path: PathBuf,
}

impl CookLog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: std::io::Error) -> SteakError {
        SteakError::HistoryIo {
            path: self.path.clone(),
            source,
        }
    }

    fn csv_err(&self, source: csv::Error) -> SteakError {
        SteakError::HistoryCsv {
            path: self.path.clone(),
            source,
        }
    }

    pub fn append(&self, records: &[CookRecord]) -> Result<(), SteakError> {
        if records.is_empty() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }

        // If the log doesn't exist yet, we need to emit a header
        let needs_header = fs::metadata(&self.path).map_or(true, |m| m.len() == 0);

        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|e| self.io_err(e))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        for record in records {
            writer.serialize(record).map_err(|e| self.csv_err(e))?;
        }
        writer.flush().map_err(|e| self.io_err(e))
    }

    /// The last `limit` records, oldest first
    pub fn recent(&self, limit: usize) -> Result<Vec<CookRecord>, SteakError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path).map_err(|e| self.csv_err(e))?;
        let records = reader
            .deserialize::<CookRecord>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| self.csv_err(e))?;

        let skip = records.len().saturating_sub(limit);
        Ok(records.into_iter().skip(skip).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cooking::{SteakConfig, SteakId};
    use chrono::{Duration, TimeZone};
    use tempfile::tempdir;

    fn record(mm: u32, doneness: Doneness) -> CookRecord {
        CookRecord {
            finished_at: Local.with_ymd_and_hms(2026, 3, 14, 19, 30, 0).unwrap(),
            thickness_mm: mm,
            doneness,
            total_secs: 630,
            synchronized: false,
        }
    }

    #[test]
    fn test_missing_log_is_empty() {
        let dir = tempdir().unwrap();
        let log = CookLog::new(dir.path().join("history.csv"));
        assert!(log.recent(10).unwrap().is_empty());
    }

    #[test]
    fn test_append_and_read_back() {
        let dir = tempdir().unwrap();
        let log = CookLog::new(dir.path().join("state").join("history.csv"));
        log.append(&[record(25, Doneness::MediumRare)]).unwrap();
        log.append(&[record(40, Doneness::Rare), record(30, Doneness::WellDone)])
            .unwrap();

        let all = log.recent(10).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0], record(25, Doneness::MediumRare));
        assert_eq!(all[2].doneness, Doneness::WellDone);

        let header_lines = fs::read_to_string(log.path())
            .unwrap()
            .lines()
            .filter(|l| l.starts_with("finished_at"))
            .count();
        assert_eq!(header_lines, 1);
    }

    #[test]
    fn test_recent_keeps_the_tail() {
        let dir = tempdir().unwrap();
        let log = CookLog::new(dir.path().join("history.csv"));
        let records: Vec<_> = (20..30).map(|mm| record(mm, Doneness::Blue)).collect();
        log.append(&records).unwrap();

        let tail = log.recent(3).unwrap();
        let mms: Vec<u32> = tail.iter().map(|r| r.thickness_mm).collect();
        assert_eq!(mms, vec![27, 28, 29]);
    }

    #[test]
    fn test_corrupt_log_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.csv");
        fs::write(&path, "finished_at,thickness_mm\nyesterday,thick\n").unwrap();

        let err = CookLog::new(&path).recent(5).unwrap_err();
        assert!(err.to_string().contains("history.csv"));
    }

    #[test]
    fn test_record_from_timer() {
        let steak = SteakConfig::new(SteakId(3), 25, Doneness::MediumRare).unwrap();
        let timer = SessionTimer::new(steak, 0);
        let at = Local.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();

        let rec = CookRecord::from_timer(&timer, true, at);
        assert_eq!(rec.total_secs, 630);
        assert_eq!(rec.thickness_mm, 25);
        assert!(rec.synchronized);

        let line = rec.describe(at + Duration::hours(2));
        assert!(line.starts_with("25mm Medium Rare, 10:30 (synchronized), "));
    }
}
