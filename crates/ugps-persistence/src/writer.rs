//! CSV writers for the per-kind position files.
//!
//! One append-mode `BufWriter` per kind, header written once at session
//! start. Every appended row is flushed immediately so an interrupt loses
//! at most the row being formatted.
//!
//! Failed readings (no fix) leave no row: a blank line would poison naive
//! consumers of the files, so the writer counts the skip and moves on.

use crate::error::PersistenceResult;
use crate::session::SessionDir;
use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use tracing::{debug, info, warn};
use ugps_core::{PositionKind, Reading};

/// Per-kind file state.
struct KindLog {
    writer: BufWriter<std::fs::File>,
    rows_written: usize,
    rows_skipped: usize,
}

/// Writes readings to the session's CSV files, in arrival order.
pub struct SessionWriter {
    logs: HashMap<PositionKind, KindLog>,
}

impl SessionWriter {
    /// Open one file per kind inside the session directory and write the
    /// headers.
    pub fn create(session: &SessionDir) -> PersistenceResult<Self> {
        let mut logs = HashMap::new();

        for kind in PositionKind::ALL {
            let path = session.position_file(kind);
            // Append mode: never truncates, though the session directory
            // is fresh so these files start empty.
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            let mut writer = BufWriter::new(file);
            writeln!(writer, "{}", kind.csv_header())?;
            writer.flush()?;

            logs.insert(
                kind,
                KindLog {
                    writer,
                    rows_written: 0,
                    rows_skipped: 0,
                },
            );
        }

        Ok(Self { logs })
    }

    /// Append one reading to its kind's file.
    ///
    /// A failed reading is counted but writes nothing.
    pub fn append(&mut self, reading: &Reading) -> PersistenceResult<()> {
        let log = self
            .logs
            .get_mut(&reading.kind)
            .expect("writer opened for every kind");

        match reading.csv_row() {
            Some(row) => {
                writeln!(log.writer, "{row}")?;
                log.writer.flush()?;
                log.rows_written += 1;
            }
            None => {
                log.rows_skipped += 1;
                debug!(kind = %reading.kind, "Skipping failed reading");
            }
        }

        Ok(())
    }

    /// Rows appended for one kind so far.
    pub fn rows_written(&self, kind: PositionKind) -> usize {
        self.logs.get(&kind).map_or(0, |log| log.rows_written)
    }

    /// Failed readings skipped for one kind so far.
    pub fn rows_skipped(&self, kind: PositionKind) -> usize {
        self.logs.get(&kind).map_or(0, |log| log.rows_skipped)
    }

    /// Flush and close every file, logging final counts.
    pub fn close(mut self) -> PersistenceResult<()> {
        self.flush_all()?;
        for (kind, log) in &self.logs {
            info!(
                kind = %kind,
                rows = log.rows_written,
                skipped = log.rows_skipped,
                "Closed position log"
            );
        }
        Ok(())
    }

    fn flush_all(&mut self) -> PersistenceResult<()> {
        for log in self.logs.values_mut() {
            log.writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for SessionWriter {
    fn drop(&mut self) {
        if let Err(e) = self.flush_all() {
            warn!(?e, "Failed to flush position logs on drop");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::fs;
    use tempfile::TempDir;
    use ugps_core::{AcousticFix, GeoFix, PositionFix};

    fn session() -> (TempDir, SessionDir) {
        let base = TempDir::new().unwrap();
        let started = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap();
        let session = SessionDir::create(base.path(), started).unwrap();
        (base, session)
    }

    fn lines(session: &SessionDir, kind: PositionKind) -> Vec<String> {
        fs::read_to_string(session.position_file(kind))
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_headers_written_once_at_creation() {
        let (_base, session) = session();
        let writer = SessionWriter::create(&session).unwrap();
        writer.close().unwrap();

        assert_eq!(lines(&session, PositionKind::Acoustic), vec!["t,x,y,z"]);
        assert_eq!(lines(&session, PositionKind::Global), vec!["t,lat,lon"]);
        assert_eq!(lines(&session, PositionKind::Master), vec!["t,lat,lon"]);
    }

    #[test]
    fn test_rows_appear_in_append_order() {
        let (_base, session) = session();
        let mut writer = SessionWriter::create(&session).unwrap();

        for seq in 0..3 {
            writer
                .append(&Reading::success(
                    PositionKind::Acoustic,
                    AcousticFix {
                        x: seq as f64,
                        y: 2.0,
                        z: 3.0,
                    },
                ))
                .unwrap();
        }
        assert_eq!(writer.rows_written(PositionKind::Acoustic), 3);
        writer.close().unwrap();

        let rows = lines(&session, PositionKind::Acoustic);
        assert_eq!(rows.len(), 4);
        assert!(rows[1].ends_with(",0,2,3"));
        assert!(rows[2].ends_with(",1,2,3"));
        assert!(rows[3].ends_with(",2,2,3"));
    }

    #[test]
    fn test_values_round_trip_verbatim() {
        let (_base, session) = session();
        let mut writer = SessionWriter::create(&session).unwrap();

        let fix = GeoFix {
            lat: 63.422_505_3,
            lon: 10.394_213_7,
        };
        writer
            .append(&Reading::success(PositionKind::Global, fix))
            .unwrap();
        writer.close().unwrap();

        let rows = lines(&session, PositionKind::Global);
        let fields: Vec<&str> = rows[1].split(',').collect();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[1].parse::<f64>().unwrap(), fix.lat);
        assert_eq!(fields[2].parse::<f64>().unwrap(), fix.lon);
    }

    #[test]
    fn test_failed_reading_leaves_no_row() {
        let (_base, session) = session();
        let mut writer = SessionWriter::create(&session).unwrap();

        writer
            .append(&Reading::failure(PositionKind::Master))
            .unwrap();
        writer
            .append(&Reading::success(
                PositionKind::Master,
                GeoFix { lat: 1.0, lon: 2.0 },
            ))
            .unwrap();

        assert_eq!(writer.rows_written(PositionKind::Master), 1);
        assert_eq!(writer.rows_skipped(PositionKind::Master), 1);
        writer.close().unwrap();

        let rows = lines(&session, PositionKind::Master);
        assert_eq!(rows.len(), 2, "header plus the one successful row");
        assert!(rows[1].ends_with(",1,2"));
    }

    #[test]
    fn test_rows_flushed_before_close() {
        let (_base, session) = session();
        let mut writer = SessionWriter::create(&session).unwrap();

        writer
            .append(&Reading::success(
                PositionKind::Acoustic,
                PositionFix::Acoustic(AcousticFix {
                    x: 1.0,
                    y: 2.0,
                    z: 3.0,
                }),
            ))
            .unwrap();

        // Visible on disk while the writer is still open.
        let rows = lines(&session, PositionKind::Acoustic);
        assert_eq!(rows.len(), 2);
        writer.close().unwrap();
    }

    #[test]
    fn test_timestamps_non_decreasing_in_file() {
        let (_base, session) = session();
        let mut writer = SessionWriter::create(&session).unwrap();

        for _ in 0..5 {
            writer
                .append(&Reading::success(
                    PositionKind::Global,
                    GeoFix { lat: 1.0, lon: 2.0 },
                ))
                .unwrap();
        }
        writer.close().unwrap();

        let rows = lines(&session, PositionKind::Global);
        let stamps: Vec<&str> = rows[1..]
            .iter()
            .map(|row| row.split(',').next().unwrap())
            .collect();
        let mut sorted = stamps.clone();
        sorted.sort();
        assert_eq!(stamps, sorted);
    }
}
