//! API route handlers.

use axum::extract::{Query, State};
use axum::Json;
use gridcast_calendar::{holidays_for, is_weekend, Region};
use gridcast_data::{WeatherRecord, WeatherTable};
use gridcast_model::{future_index, ForecastRow, Frequency};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::source::select_source;
use crate::state::AppState;

/// Forecast horizon when the query omits `periods`.
pub const DEFAULT_PERIODS: i64 = 24;
/// Horizon cap: one year of hourly steps.
pub const MAX_PERIODS: i64 = 8760;

#[derive(Debug, Deserialize)]
pub struct ForecastParams {
    pub periods: Option<i64>,
}

/// One forecast step on the wire.
#[derive(Debug, Serialize)]
pub struct ForecastPoint {
    pub ds: String,
    pub yhat: f64,
    pub yhat_lower: f64,
    pub yhat_upper: f64,
}

impl From<ForecastRow> for ForecastPoint {
    fn from(row: ForecastRow) -> Self {
        Self {
            ds: row.ds.format("%Y-%m-%d %H:%M:%S").to_string(),
            yhat: row.yhat,
            yhat_lower: row.yhat_lower,
            yhat_upper: row.yhat_upper,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HolidayEntry {
    pub date: String,
    pub holiday_name: String,
    pub is_weekend: bool,
}

/// Liveness indicator.
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Power consumption forecast service is running"
    }))
}

/// Forecast the next `periods` steps after the training window.
pub async fn forecast(
    State(state): State<AppState>,
    Query(params): Query<ForecastParams>,
) -> Result<Json<Vec<ForecastPoint>>, ApiError> {
    let bundle = state.bundle()?;
    let periods = validate_periods(params.periods.unwrap_or(DEFAULT_PERIODS))?;

    let freq = Frequency::parse(&bundle.meta.freq)?;
    let index = future_index(&bundle.training.timestamps(), periods, freq);

    let source = select_source(bundle, state.weather_file())?;
    tracing::debug!(source = source.name(), periods, "enriching future index");
    let rows = source.enrich(&index);

    let mut full = bundle.model.predict(&rows)?;
    // The predictor back-fills fitted values over the training window;
    // serve only the genuinely future rows.
    let tail = full.split_off(full.len().saturating_sub(periods));

    Ok(Json(tail.into_iter().map(ForecastPoint::from).collect()))
}

/// Serve the external weather table, when it exists.
pub async fn weather(State(state): State<AppState>) -> Result<Json<Vec<WeatherRecord>>, ApiError> {
    let path = state.weather_file();
    if !path.exists() {
        return Err(ApiError::NotFound(format!("{} not found", path.display())));
    }

    let table = WeatherTable::load(path)?;
    Ok(Json(table.records()))
}

/// Holidays for the configured state and the training data's year.
pub async fn holidays(State(state): State<AppState>) -> Result<Json<Vec<HolidayEntry>>, ApiError> {
    let bundle = state.bundle()?;
    let year = bundle
        .training_year()
        .ok_or_else(|| ApiError::Internal("training table is empty".to_string()))?;

    let entries = holidays_for(year, Region::Jharkhand)
        .into_iter()
        .map(|(date, name)| HolidayEntry {
            date: date.format("%Y-%m-%d").to_string(),
            holiday_name: name,
            is_weekend: is_weekend(date),
        })
        .collect();

    Ok(Json(entries))
}

fn validate_periods(periods: i64) -> Result<usize, ApiError> {
    if !(1..=MAX_PERIODS).contains(&periods) {
        return Err(ApiError::BadRequest(format!(
            "periods must be between 1 and {}, got {}",
            MAX_PERIODS, periods
        )));
    }
    Ok(periods as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_periods_accepts_range() {
        assert_eq!(validate_periods(1).unwrap(), 1);
        assert_eq!(validate_periods(24).unwrap(), 24);
        assert_eq!(validate_periods(MAX_PERIODS).unwrap(), MAX_PERIODS as usize);
    }

    #[test]
    fn test_validate_periods_rejects_out_of_range() {
        assert!(validate_periods(0).is_err());
        assert!(validate_periods(-5).is_err());
        assert!(validate_periods(MAX_PERIODS + 1).is_err());
    }
}
