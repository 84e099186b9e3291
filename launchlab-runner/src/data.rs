//! CSV ingest for bars and the launch calendar.
//!
//! Bars are validated strictly: out-of-order dates, duplicates, or insane
//! OHLC rows abort the load. The launch calendar is forgiving the other way:
//! malformed rows (bad dates, unknown outcomes, short records) are excluded
//! and surfaced as data-quality warnings instead of failing the run.

use chrono::NaiveDate;
use launchlab_core::domain::Bar;
use launchlab_core::events::{LaunchEvent, LaunchOutcome};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("bar {date} is out of order (previous bar {prev})")]
    OutOfOrder { prev: NaiveDate, date: NaiveDate },

    #[error("duplicate bar date {date}")]
    DuplicateDate { date: NaiveDate },

    #[error("bar {date} failed OHLC sanity checks")]
    InsaneBar { date: NaiveDate },

    #[error("no bars in {path} within the requested date range")]
    Empty { path: PathBuf },
}

#[derive(Debug, Deserialize)]
struct BarRow {
    date: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
}

/// Load and validate bars from a CSV with a `date,open,high,low,close,volume`
/// header. The file must be strictly date-ordered; `start`/`end` clamp the
/// result after validation.
pub fn load_bars(
    path: &Path,
    symbol: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<Vec<Bar>, LoadError> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    let mut bars: Vec<Bar> = Vec::new();
    for row in reader.deserialize::<BarRow>() {
        let row = row.map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let bar = Bar {
            symbol: symbol.to_string(),
            date: row.date,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
        };
        if let Some(prev) = bars.last() {
            if bar.date == prev.date {
                return Err(LoadError::DuplicateDate { date: bar.date });
            }
            if bar.date < prev.date {
                return Err(LoadError::OutOfOrder {
                    prev: prev.date,
                    date: bar.date,
                });
            }
        }
        if !bar.is_sane() {
            return Err(LoadError::InsaneBar { date: bar.date });
        }
        bars.push(bar);
    }

    bars.retain(|b| {
        start.map_or(true, |s| b.date >= s) && end.map_or(true, |e| b.date <= e)
    });
    if bars.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(bars)
}

/// Result of loading a launch calendar: the usable events plus warnings for
/// every excluded row.
#[derive(Debug, Default)]
pub struct LaunchCalendarLoad {
    pub events: Vec<LaunchEvent>,
    pub warnings: Vec<String>,
}

/// Load a launch calendar CSV (`date,mission,flight_no,outcome`).
///
/// Malformed records are skipped with a warning; only I/O and framing
/// errors abort.
pub fn load_launches(path: &Path) -> Result<LaunchCalendarLoad, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

    let mut load = LaunchCalendarLoad::default();
    for (index, record) in reader.records().enumerate() {
        let line = index + 2; // header is line 1
        let record = record.map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

        let Some(raw_date) = record.get(0).map(str::trim).filter(|s| !s.is_empty()) else {
            load.warnings.push(format!("launch row {line}: missing date, skipped"));
            continue;
        };
        let Ok(date) = raw_date.parse::<NaiveDate>() else {
            load.warnings
                .push(format!("launch row {line}: unparseable date '{raw_date}', skipped"));
            continue;
        };
        let Some(raw_outcome) = record.get(3).map(str::trim).filter(|s| !s.is_empty()) else {
            load.warnings
                .push(format!("launch row {line}: missing outcome, skipped"));
            continue;
        };
        let Some(outcome) = LaunchOutcome::parse(raw_outcome) else {
            load.warnings.push(format!(
                "launch row {line}: unknown outcome '{raw_outcome}', skipped"
            ));
            continue;
        };

        load.events.push(LaunchEvent {
            date,
            mission: record.get(1).unwrap_or("").trim().to_string(),
            outcome,
        });
    }
    Ok(load)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    const BARS: &str = "\
date,open,high,low,close,volume
2024-01-02,10.0,10.5,9.8,10.2,1000
2024-01-03,10.2,10.6,10.0,10.4,1100
2024-01-04,10.4,10.8,10.2,10.6,1200
";

    #[test]
    fn loads_valid_bars() {
        let file = write_temp(BARS);
        let bars = load_bars(file.path(), "RKLB", None, None).unwrap();
        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].symbol, "RKLB");
        assert_eq!(bars[1].close, 10.4);
    }

    #[test]
    fn clamps_date_range() {
        let file = write_temp(BARS);
        let start = NaiveDate::from_ymd_opt(2024, 1, 3);
        let bars = load_bars(file.path(), "RKLB", start, None).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].date, start.unwrap());
    }

    #[test]
    fn rejects_out_of_order() {
        let file = write_temp(
            "date,open,high,low,close,volume\n2024-01-03,10,11,9,10,1\n2024-01-02,10,11,9,10,1\n",
        );
        assert!(matches!(
            load_bars(file.path(), "RKLB", None, None),
            Err(LoadError::OutOfOrder { .. })
        ));
    }

    #[test]
    fn rejects_duplicates() {
        let file = write_temp(
            "date,open,high,low,close,volume\n2024-01-02,10,11,9,10,1\n2024-01-02,10,11,9,10,1\n",
        );
        assert!(matches!(
            load_bars(file.path(), "RKLB", None, None),
            Err(LoadError::DuplicateDate { .. })
        ));
    }

    #[test]
    fn rejects_insane_bar() {
        let file = write_temp("date,open,high,low,close,volume\n2024-01-02,10,9,11,10,1\n");
        assert!(matches!(
            load_bars(file.path(), "RKLB", None, None),
            Err(LoadError::InsaneBar { .. })
        ));
    }

    #[test]
    fn empty_range_is_an_error() {
        let file = write_temp(BARS);
        let start = NaiveDate::from_ymd_opt(2025, 1, 1);
        assert!(matches!(
            load_bars(file.path(), "RKLB", start, None),
            Err(LoadError::Empty { .. })
        ));
    }

    #[test]
    fn loads_launches_and_skips_malformed_rows() {
        let file = write_temp(
            "\
date,mission,flight_no,outcome
2024-01-10,Electron 43,43,Success
not-a-date,Bad Row,44,Success
2024-02-01,Short Row
2024-02-10,Electron 45,45,Exploded
2024-03-01,Electron 46,46,scheduled
",
        );
        let load = load_launches(file.path()).unwrap();
        assert_eq!(load.events.len(), 2);
        assert_eq!(load.events[0].mission, "Electron 43");
        assert_eq!(load.events[0].outcome, LaunchOutcome::Success);
        assert_eq!(load.events[1].outcome, LaunchOutcome::Scheduled);
        assert_eq!(load.warnings.len(), 3);
        assert!(load.warnings[0].contains("unparseable date"));
        assert!(load.warnings[1].contains("missing outcome"));
        assert!(load.warnings[2].contains("unknown outcome"));
    }
}
