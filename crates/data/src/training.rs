//! Historical training table.
//!
//! The CSV the model was fitted on: a `ds` timestamp column, the observed
//! `y` series, and one column per regressor. Loaded once at startup and
//! kept read-only; the synthetic enrichment strategy reads its last row.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::NaiveDateTime;
use gridcast_model::parse_timestamp;

use crate::error::{DataError, Result};

/// One historical observation with its regressor values.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingRow {
    pub ds: NaiveDateTime,
    pub y: f64,
    pub regressors: BTreeMap<String, f64>,
}

/// Ordered historical observations.
#[derive(Debug, Clone)]
pub struct TrainingTable {
    rows: Vec<TrainingRow>,
}

impl TrainingTable {
    pub fn from_rows(rows: Vec<TrainingRow>) -> Self {
        Self { rows }
    }

    /// Load the training CSV. The file is part of the shipped artifact, so
    /// unparseable cells are an error rather than coerced to absent.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| DataError::FileNotFound(format!("{}: {}", path.display(), e)))?;
        let mut reader = csv::Reader::from_reader(BufReader::new(file));

        let headers = reader
            .headers()
            .map_err(|e| DataError::CsvError(e.to_string()))?
            .clone();
        let file_name = path.display().to_string();

        let ds_idx = column_index(&headers, "ds", &file_name)?;
        let y_idx = column_index(&headers, "y", &file_name)?;

        let mut rows = Vec::new();
        for (i, result) in reader.records().enumerate() {
            let record = result.map_err(|e| DataError::CsvError(e.to_string()))?;
            let row_number = i + 1;

            let ds_field = record.get(ds_idx).unwrap_or_default();
            let ds = parse_timestamp(ds_field).map_err(|e| DataError::InvalidRow {
                row: row_number,
                reason: e.to_string(),
            })?;

            let y = parse_cell(&record, y_idx, "y", row_number)?;

            let mut regressors = BTreeMap::new();
            for (idx, name) in headers.iter().enumerate() {
                if idx == ds_idx || idx == y_idx {
                    continue;
                }
                regressors.insert(name.to_string(), parse_cell(&record, idx, name, row_number)?);
            }

            rows.push(TrainingRow { ds, y, regressors });
        }

        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Most recent observation, the source of the persistence heuristic.
    pub fn last_row(&self) -> Option<&TrainingRow> {
        self.rows.last()
    }

    pub fn last_timestamp(&self) -> Option<NaiveDateTime> {
        self.rows.last().map(|r| r.ds)
    }

    /// The full timestamp column, in file order.
    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        self.rows.iter().map(|r| r.ds).collect()
    }
}

fn column_index(headers: &csv::StringRecord, name: &str, file: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| DataError::MissingColumn {
            column: name.to_string(),
            file: file.to_string(),
        })
}

fn parse_cell(record: &csv::StringRecord, idx: usize, name: &str, row: usize) -> Result<f64> {
    let field = record.get(idx).unwrap_or_default();
    field.parse::<f64>().map_err(|_| DataError::InvalidRow {
        row,
        reason: format!("column '{}' is not numeric: '{}'", name, field),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_csv() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "ds,y,temperature,is_holiday").unwrap();
        writeln!(file, "2017-12-31 21:00:00,310.5,24.0,0").unwrap();
        writeln!(file, "2017-12-31 22:00:00,298.2,23.5,0").unwrap();
        writeln!(file, "2017-12-31 23:00:00,287.9,23.1,1").unwrap();
        file
    }

    #[test]
    fn test_load_training_table() {
        let file = sample_csv();
        let table = TrainingTable::load(file.path()).unwrap();

        assert_eq!(table.len(), 3);
        let last = table.last_row().unwrap();
        assert_eq!(last.y, 287.9);
        assert_eq!(last.regressors.get("temperature"), Some(&23.1));
        assert_eq!(last.regressors.get("is_holiday"), Some(&1.0));
    }

    #[test]
    fn test_timestamps_preserve_order() {
        let file = sample_csv();
        let table = TrainingTable::load(file.path()).unwrap();
        let timestamps = table.timestamps();

        assert_eq!(timestamps.len(), 3);
        assert!(timestamps[0] < timestamps[1]);
        assert_eq!(table.last_timestamp(), Some(timestamps[2]));
    }

    #[test]
    fn test_load_missing_ds_column() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "timestamp,y").unwrap();
        writeln!(file, "2017-01-01 00:00:00,1.0").unwrap();

        let error = TrainingTable::load(file.path()).unwrap_err();
        assert!(matches!(error, DataError::MissingColumn { ref column, .. } if column == "ds"));
    }

    #[test]
    fn test_load_rejects_non_numeric_regressor() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "ds,y,temperature").unwrap();
        writeln!(file, "2017-01-01 00:00:00,1.0,warm").unwrap();

        let error = TrainingTable::load(file.path()).unwrap_err();
        assert!(matches!(error, DataError::InvalidRow { row: 1, .. }));
    }

    #[test]
    fn test_load_rejects_bad_timestamp() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "ds,y").unwrap();
        writeln!(file, "not-a-date,1.0").unwrap();

        let error = TrainingTable::load(file.path()).unwrap_err();
        assert!(matches!(error, DataError::InvalidRow { row: 1, .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let error = TrainingTable::load(Path::new("no_such_training.csv")).unwrap_err();
        assert!(matches!(error, DataError::FileNotFound(_)));
    }
}
