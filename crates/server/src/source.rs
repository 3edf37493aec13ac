//! Regressor enrichment strategies.
//!
//! Exactly one strategy runs per forecast call, selected by whether the
//! external weather/holiday table exists at call time: the table join when
//! it does, the synthetic fallback when it does not. Both fill every
//! metadata-declared regressor for every index row, recording gaps as
//! explicit absent values.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use gridcast_calendar::{holidays_for, is_weekend, Region};
use gridcast_data::{ArtifactBundle, WeatherTable};
use gridcast_model::FutureRow;

use crate::error::ApiError;

/// A strategy that fills every declared regressor over a future index.
pub trait RegressorSource: Send + Sync {
    fn name(&self) -> &'static str;
    fn enrich(&self, index: &[NaiveDateTime]) -> Vec<FutureRow>;
}

/// Strategy A: left-join the external table onto the index by timestamp.
///
/// Index rows the table does not cover get absent values; the predictor
/// rejects those downstream rather than computing on them.
pub struct CsvRegressorSource {
    table: WeatherTable,
    regressors: Vec<String>,
}

impl CsvRegressorSource {
    pub fn new(table: WeatherTable, regressors: Vec<String>) -> Self {
        Self { table, regressors }
    }
}

impl RegressorSource for CsvRegressorSource {
    fn name(&self) -> &'static str {
        "external-csv"
    }

    fn enrich(&self, index: &[NaiveDateTime]) -> Vec<FutureRow> {
        index
            .iter()
            .map(|&ds| {
                let mut row = FutureRow::new(ds);
                let matched = self.table.lookup(ds);
                for name in &self.regressors {
                    let value = matched.and_then(|values| values.get(name).copied().flatten());
                    row.set(name.clone(), value);
                }
                row
            })
            .collect()
    }
}

/// Strategy B: persistence heuristic plus computed calendar flags.
///
/// Non-calendar regressors carry the last training observation forward;
/// `is_holiday` is a membership test against the national calendar for the
/// training year; `is_weekend` is derived from the weekday.
pub struct SyntheticRegressorSource {
    last_values: BTreeMap<String, f64>,
    regressors: Vec<String>,
    holidays: BTreeSet<NaiveDate>,
}

impl SyntheticRegressorSource {
    pub fn new(bundle: &ArtifactBundle) -> Self {
        let last_values = bundle
            .training
            .last_row()
            .map(|row| row.regressors.clone())
            .unwrap_or_default();

        let holidays = match bundle.training_year() {
            Some(year) => holidays_for(year, Region::National).into_keys().collect(),
            None => BTreeSet::new(),
        };

        Self {
            last_values,
            regressors: bundle.meta.regressors.clone(),
            holidays,
        }
    }
}

impl RegressorSource for SyntheticRegressorSource {
    fn name(&self) -> &'static str {
        "synthetic-fallback"
    }

    fn enrich(&self, index: &[NaiveDateTime]) -> Vec<FutureRow> {
        index
            .iter()
            .map(|&ds| {
                let mut row = FutureRow::new(ds);
                for name in &self.regressors {
                    let value = match name.as_str() {
                        "is_holiday" => Some(flag(self.holidays.contains(&ds.date()))),
                        "is_weekend" => Some(flag(is_weekend(ds.date()))),
                        _ => self.last_values.get(name).copied(),
                    };
                    row.set(name.clone(), value);
                }
                row
            })
            .collect()
    }
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

/// Pick the enrichment strategy for this call: the external table when the
/// file exists, the synthetic fallback otherwise. Binary and mutually
/// exclusive, never a blend.
pub fn select_source(
    bundle: &ArtifactBundle,
    weather_file: &Path,
) -> Result<Box<dyn RegressorSource>, ApiError> {
    if weather_file.exists() {
        let table = WeatherTable::load(weather_file)?;
        Ok(Box::new(CsvRegressorSource::new(
            table,
            bundle.meta.regressors.clone(),
        )))
    } else {
        Ok(Box::new(SyntheticRegressorSource::new(bundle)))
    }
}
