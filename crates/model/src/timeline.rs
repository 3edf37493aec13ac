//! Future time index construction.
//!
//! Continues the training index at the metadata sampling frequency. The
//! produced index covers the full history plus the requested horizon, since
//! the predictor back-fills fitted values over the training window.

use chrono::{Duration, NaiveDateTime};

use crate::error::{ModelError, Result};

/// Sampling frequency between consecutive index steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Hourly,
    Daily,
    Weekly,
    /// Approximated as 30 days
    Monthly,
    /// Approximated as 365 days
    Yearly,
}

impl Frequency {
    /// Parse a pandas-style frequency string ("H", "D", "W", "M", "Y").
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "H" | "h" => Ok(Frequency::Hourly),
            "D" | "d" => Ok(Frequency::Daily),
            "W" | "w" => Ok(Frequency::Weekly),
            "M" | "m" => Ok(Frequency::Monthly),
            "Y" | "y" => Ok(Frequency::Yearly),
            other => Err(ModelError::InvalidFrequency(other.to_string())),
        }
    }

    /// Interval between two consecutive steps.
    pub fn step(&self) -> Duration {
        match self {
            Frequency::Hourly => Duration::hours(1),
            Frequency::Daily => Duration::days(1),
            Frequency::Weekly => Duration::weeks(1),
            Frequency::Monthly => Duration::days(30),
            Frequency::Yearly => Duration::days(365),
        }
    }
}

/// Parse a timestamp in either datetime or bare date form.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| {
            chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map(|d| d.and_time(chrono::NaiveTime::MIN))
        })
        .map_err(|_| ModelError::InvalidTimestamp(s.to_string()))
}

/// Build the full future index: every history timestamp, then `periods`
/// steps at `freq` continuing immediately after the last history entry.
///
/// Length is always `history.len() + periods`.
pub fn future_index(history: &[NaiveDateTime], periods: usize, freq: Frequency) -> Vec<NaiveDateTime> {
    let mut index = Vec::with_capacity(history.len() + periods);
    index.extend_from_slice(history);

    if let Some(&last) = history.last() {
        let step = freq.step();
        let mut current = last;
        for _ in 0..periods {
            current = current + step;
            index.push(current);
        }
    }

    index
}
