//! Manually supplied exhibition games.
//!
//! Exhibition games are not part of the published schedule; they arrive as a
//! local CSV file with fixed columns. The file is optional: its absence just
//! means an empty exhibition set.

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

/// One exhibition game as written in the CSV file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExhibitionRecord {
    /// Full date, `YYYY-MM-DD`.
    #[serde(rename = "Date")]
    pub date: String,
    /// 12-hour clock time or `TBD`.
    #[serde(rename = "Time")]
    pub time: String,
    /// Home team text.
    #[serde(rename = "Home Team")]
    pub home_team: String,
    /// Guest team text.
    #[serde(rename = "Guest Team")]
    pub guest_team: String,
    /// Field, may be empty.
    #[serde(rename = "Field", default)]
    pub field: String,
}

/// Loads exhibition records from a CSV file.
///
/// A missing or unreadable file is recovered as an empty set. Malformed
/// records are skipped individually; they never abort the load.
pub fn load_exhibition(path: &Path) -> Vec<ExhibitionRecord> {
    let mut reader = match csv::Reader::from_path(path) {
        Ok(reader) => reader,
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %err,
                "exhibition file unreadable, continuing without it"
            );
            return Vec::new();
        }
    };

    let mut records = Vec::new();
    for (index, result) in reader.deserialize::<ExhibitionRecord>().enumerate() {
        match result {
            Ok(record) => records.push(record),
            Err(err) => warn!(index, error = %err, "skipping malformed exhibition record"),
        }
    }
    debug!(count = records.len(), "loaded exhibition records");
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_records_in_file_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Date,Time,Home Team,Guest Team,Field").unwrap();
        writeln!(file, "2025-09-20,10:00 AM,Lakehill,Victoria FC,Braefoot Park").unwrap();
        writeln!(file, "2025-10-04,TBD,Victoria FC,Lakehill,").unwrap();

        let records = load_exhibition(file.path());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, "2025-09-20");
        assert_eq!(records[0].home_team, "Lakehill");
        assert_eq!(records[1].time, "TBD");
        assert_eq!(records[1].field, "");
    }

    #[test]
    fn missing_file_yields_empty_set() {
        let dir = tempfile::tempdir().unwrap();
        let records = load_exhibition(&dir.path().join("no-such-file.csv"));
        assert!(records.is_empty());
    }

    #[test]
    fn short_records_are_skipped_not_fatal() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Date,Time,Home Team,Guest Team,Field").unwrap();
        writeln!(file, "2025-09-20,10:00 AM").unwrap();
        writeln!(file, "2025-10-04,1:00 PM,A,B,Park").unwrap();

        let records = load_exhibition(file.path());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].home_team, "A");
    }
}
