//! Trained model artifact.
//!
//! The model is trained offline; this module only deserializes the fitted
//! parameter set and evaluates it over a future index. The artifact is an
//! additive decomposition: piecewise-linear trend over scaled time, Fourier
//! seasonal blocks, and standardized linear regressor terms, with interval
//! bounds derived from the fitted observation noise.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// One future index step with its regressor values.
///
/// Values are explicitly optional: an enrichment strategy records a gap as
/// `None`, and [`TrainedModel::predict`] refuses incomplete rows instead of
/// computing on them.
#[derive(Debug, Clone, PartialEq)]
pub struct FutureRow {
    pub ds: NaiveDateTime,
    values: BTreeMap<String, Option<f64>>,
}

impl FutureRow {
    pub fn new(ds: NaiveDateTime) -> Self {
        Self {
            ds,
            values: BTreeMap::new(),
        }
    }

    /// Record a regressor value, `None` marking an enrichment gap.
    pub fn set(&mut self, name: impl Into<String>, value: Option<f64>) {
        self.values.insert(name.into(), value);
    }

    /// Present value for a regressor, if any.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied().flatten()
    }
}

/// One row of the prediction table.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastRow {
    pub ds: NaiveDateTime,
    pub yhat: f64,
    pub yhat_lower: f64,
    pub yhat_upper: f64,
}

/// Fourier seasonal component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalBlock {
    pub name: String,
    /// Period in days (7.0 weekly, 365.25 yearly, 1.0 daily)
    pub period_days: f64,
    pub order: usize,
    /// Interleaved sin/cos coefficients, 2 per order
    pub beta: Vec<f64>,
}

impl SeasonalBlock {
    fn evaluate(&self, t_days: f64) -> f64 {
        let mut value = 0.0;
        for i in 0..self.order {
            let angle = 2.0 * std::f64::consts::PI * (i as f64 + 1.0) * t_days / self.period_days;
            value += self.beta[2 * i] * angle.sin();
            value += self.beta[2 * i + 1] * angle.cos();
        }
        value
    }
}

/// Standardized linear regressor term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressorWeight {
    pub name: String,
    /// Mean of the regressor over the training window
    pub mu: f64,
    /// Standard deviation over the training window
    pub std: f64,
    pub coef: f64,
}

/// The fitted forecasting model, deserialized from the JSON artifact.
///
/// All parameters live in scaled space: time is scaled by the training
/// window span, observations by `y_scale`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainedModel {
    /// Training window origin
    t0: NaiveDateTime,
    /// Training window span in seconds
    t_scale: f64,
    /// Observation scale
    y_scale: f64,
    /// Base trend growth rate
    k: f64,
    /// Base trend offset
    m: f64,
    /// Growth-rate adjustments, one per changepoint
    delta: Vec<f64>,
    /// Changepoint locations in scaled time
    t_change: Vec<f64>,
    seasonality: Vec<SeasonalBlock>,
    regressors: Vec<RegressorWeight>,
    /// Fitted observation noise, scaled space
    sigma_obs: f64,
    /// Nominal coverage of the prediction interval
    interval_width: f64,
}

impl TrainedModel {
    /// Deserialize and validate an artifact.
    pub fn from_json(json: &str) -> Result<Self> {
        let model: TrainedModel = serde_json::from_str(json)
            .map_err(|e| ModelError::InvalidArtifact(e.to_string()))?;
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<()> {
        if self.t_scale <= 0.0 {
            return Err(ModelError::InvalidArtifact(
                "t_scale must be positive".to_string(),
            ));
        }
        if self.y_scale <= 0.0 {
            return Err(ModelError::InvalidArtifact(
                "y_scale must be positive".to_string(),
            ));
        }
        if self.delta.len() != self.t_change.len() {
            return Err(ModelError::InvalidArtifact(format!(
                "{} changepoints but {} growth adjustments",
                self.t_change.len(),
                self.delta.len()
            )));
        }
        for block in &self.seasonality {
            if block.beta.len() != 2 * block.order {
                return Err(ModelError::InvalidArtifact(format!(
                    "seasonal block '{}' needs {} coefficients, got {}",
                    block.name,
                    2 * block.order,
                    block.beta.len()
                )));
            }
            if block.period_days <= 0.0 {
                return Err(ModelError::InvalidArtifact(format!(
                    "seasonal block '{}' has non-positive period",
                    block.name
                )));
            }
        }
        for weight in &self.regressors {
            if weight.std <= 0.0 {
                return Err(ModelError::InvalidArtifact(format!(
                    "regressor '{}' has non-positive std",
                    weight.name
                )));
            }
        }
        Ok(())
    }

    /// Names of the regressors the model was fitted with.
    pub fn regressor_names(&self) -> Vec<&str> {
        self.regressors.iter().map(|w| w.name.as_str()).collect()
    }

    /// Evaluate the model over an enriched future index.
    ///
    /// Every declared regressor must carry a value in every row; the first
    /// gap fails the whole call with the offending column and timestamp.
    pub fn predict(&self, rows: &[FutureRow]) -> Result<Vec<ForecastRow>> {
        if rows.is_empty() {
            return Err(ModelError::EmptyIndex);
        }

        let margin = self.z_score() * self.sigma_obs * self.y_scale;
        let mut out = Vec::with_capacity(rows.len());

        for row in rows {
            let mut value = self.trend_at(self.scaled_time(row.ds));

            let t_days = self.days_since_origin(row.ds);
            for block in &self.seasonality {
                value += block.evaluate(t_days);
            }

            for weight in &self.regressors {
                let x = row.get(&weight.name).ok_or_else(|| ModelError::MissingRegressor {
                    column: weight.name.clone(),
                    ds: row.ds,
                })?;
                value += weight.coef * (x - weight.mu) / weight.std;
            }

            let yhat = value * self.y_scale;
            out.push(ForecastRow {
                ds: row.ds,
                yhat,
                yhat_lower: yhat - margin,
                yhat_upper: yhat + margin,
            });
        }

        Ok(out)
    }

    fn scaled_time(&self, ds: NaiveDateTime) -> f64 {
        (ds - self.t0).num_seconds() as f64 / self.t_scale
    }

    fn days_since_origin(&self, ds: NaiveDateTime) -> f64 {
        (ds - self.t0).num_seconds() as f64 / 86_400.0
    }

    /// Piecewise-linear trend: each changepoint at or before `t` shifts the
    /// growth rate by its delta, with the offset adjusted for continuity.
    fn trend_at(&self, t: f64) -> f64 {
        let mut k = self.k;
        let mut m = self.m;
        for (&s, &d) in self.t_change.iter().zip(&self.delta) {
            if t >= s {
                k += d;
                m -= s * d;
            }
        }
        k * t + m
    }

    fn z_score(&self) -> f64 {
        match (self.interval_width * 100.0).round() as i32 {
            80 => 1.28,
            90 => 1.645,
            95 => 1.96,
            99 => 2.576,
            _ => 1.28,
        }
    }
}
