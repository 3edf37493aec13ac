//! External weather/holiday table.
//!
//! An optional CSV keyed by a `Datetime` column, consulted per request. Cell
//! values are coerced leniently: anything that fails numeric parsing becomes
//! absent rather than an error, matching how the upstream data is curated.

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::NaiveDateTime;
use gridcast_model::parse_timestamp;
use serde::Serialize;

use crate::error::{DataError, Result};

/// Name of the timestamp column in the external file.
pub const TIMESTAMP_COLUMN: &str = "Datetime";

/// Projection of one weather row for the weather endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherRecord {
    pub time: String,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub cloud_cover: Option<f64>,
}

#[derive(Debug, Clone)]
struct WeatherRow {
    /// Raw timestamp string, passed through to the weather endpoint
    time: String,
    values: BTreeMap<String, Option<f64>>,
}

/// The parsed external table, addressable by timestamp for the
/// regressor join and projectable to weather records.
#[derive(Debug, Clone)]
pub struct WeatherTable {
    rows: Vec<WeatherRow>,
    /// Parsed-timestamp index into `rows`; unparseable timestamps are
    /// simply not joinable
    index: HashMap<NaiveDateTime, usize>,
}

impl WeatherTable {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| DataError::FileNotFound(format!("{}: {}", path.display(), e)))?;
        let mut reader = csv::Reader::from_reader(BufReader::new(file));

        let headers = reader
            .headers()
            .map_err(|e| DataError::CsvError(e.to_string()))?
            .clone();

        let ts_idx = headers
            .iter()
            .position(|h| h == TIMESTAMP_COLUMN)
            .ok_or_else(|| DataError::MissingColumn {
                column: TIMESTAMP_COLUMN.to_string(),
                file: path.display().to_string(),
            })?;

        let mut rows = Vec::new();
        let mut index = HashMap::new();

        for result in reader.records() {
            let record = result.map_err(|e| DataError::CsvError(e.to_string()))?;
            let time = record.get(ts_idx).unwrap_or_default().to_string();

            let mut values = BTreeMap::new();
            for (idx, name) in headers.iter().enumerate() {
                if idx == ts_idx {
                    continue;
                }
                let value = record.get(idx).and_then(|field| field.parse::<f64>().ok());
                values.insert(name.to_string(), value);
            }

            if let Ok(ds) = parse_timestamp(&time) {
                index.insert(ds, rows.len());
            }
            rows.push(WeatherRow { time, values });
        }

        Ok(Self { rows, index })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column values for a timestamp, if the table covers it.
    pub fn lookup(&self, ds: NaiveDateTime) -> Option<&BTreeMap<String, Option<f64>>> {
        self.index.get(&ds).map(|&i| &self.rows[i].values)
    }

    /// Project every row down to the weather endpoint fields, in file order.
    pub fn records(&self) -> Vec<WeatherRecord> {
        self.rows
            .iter()
            .map(|row| WeatherRecord {
                time: row.time.clone(),
                temperature: row.values.get("temperature").copied().flatten(),
                humidity: row.values.get("humidity").copied().flatten(),
                cloud_cover: row.values.get("cloud_cover").copied().flatten(),
            })
            .collect()
    }
}
