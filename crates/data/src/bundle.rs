//! Artifact bundle.
//!
//! The three files produced by offline training, loaded once at process
//! start from fixed relative paths and shared read-only for the process
//! lifetime.

use std::fs;
use std::path::Path;

use chrono::Datelike;
use gridcast_model::TrainedModel;

use crate::error::{DataError, Result};
use crate::meta::ModelMeta;
use crate::training::TrainingTable;

/// Serialized predictor artifact
pub const MODEL_FILE: &str = "model.json";
/// Historical training table
pub const TRAIN_FILE: &str = "training_data.csv";
/// Sampling frequency and regressor declaration
pub const META_FILE: &str = "model_meta.json";
/// Optional external regressor table, consulted per request
pub const WEATHER_FILE: &str = "weather_holiday.csv";

/// The loaded artifacts: model, training table, metadata.
#[derive(Debug, Clone)]
pub struct ArtifactBundle {
    pub model: TrainedModel,
    pub training: TrainingTable,
    pub meta: ModelMeta,
}

impl ArtifactBundle {
    /// Load from the process working directory.
    pub fn load_default() -> Result<Self> {
        Self::load_from(Path::new("."))
    }

    /// Load all three artifact files from a directory.
    pub fn load_from(dir: &Path) -> Result<Self> {
        let model_path = dir.join(MODEL_FILE);
        let model_json = fs::read_to_string(&model_path)
            .map_err(|e| DataError::FileNotFound(format!("{}: {}", model_path.display(), e)))?;
        let model =
            TrainedModel::from_json(&model_json).map_err(|e| DataError::Artifact(e.to_string()))?;

        let training = TrainingTable::load(&dir.join(TRAIN_FILE))?;
        if training.is_empty() {
            return Err(DataError::Empty(TRAIN_FILE.to_string()));
        }

        let meta = ModelMeta::load(&dir.join(META_FILE))?;

        Ok(Self {
            model,
            training,
            meta,
        })
    }

    /// Calendar year of the training window's end, the year the holiday
    /// capability is queried for.
    pub fn training_year(&self) -> Option<i32> {
        self.training.last_timestamp().map(|ds| ds.year())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn model_json() -> &'static str {
        r#"{
            "t0": "2017-01-01T00:00:00",
            "t_scale": 31536000.0,
            "y_scale": 100.0,
            "k": 0.0,
            "m": 2.0,
            "delta": [],
            "t_change": [],
            "seasonality": [],
            "regressors": [],
            "sigma_obs": 0.05,
            "interval_width": 0.8
        }"#
    }

    fn write_artifacts(dir: &TempDir) {
        let mut model = std::fs::File::create(dir.path().join(MODEL_FILE)).unwrap();
        write!(model, "{}", model_json()).unwrap();

        let mut train = std::fs::File::create(dir.path().join(TRAIN_FILE)).unwrap();
        writeln!(train, "ds,y").unwrap();
        writeln!(train, "2017-12-31 22:00:00,300.0").unwrap();
        writeln!(train, "2017-12-31 23:00:00,280.0").unwrap();

        let mut meta = std::fs::File::create(dir.path().join(META_FILE)).unwrap();
        writeln!(meta, r#"{{"freq": "H", "regressors": []}}"#).unwrap();
    }

    #[test]
    fn test_load_bundle() {
        let dir = TempDir::new().unwrap();
        write_artifacts(&dir);

        let bundle = ArtifactBundle::load_from(dir.path()).unwrap();
        assert_eq!(bundle.meta.freq, "H");
        assert_eq!(bundle.training.len(), 2);
        assert_eq!(bundle.training_year(), Some(2017));
    }

    #[test]
    fn test_load_bundle_missing_model() {
        let dir = TempDir::new().unwrap();
        write_artifacts(&dir);
        std::fs::remove_file(dir.path().join(MODEL_FILE)).unwrap();

        let error = ArtifactBundle::load_from(dir.path()).unwrap_err();
        assert!(matches!(error, DataError::FileNotFound(_)));
    }

    #[test]
    fn test_load_bundle_rejects_empty_training_table() {
        let dir = TempDir::new().unwrap();
        write_artifacts(&dir);
        let mut train = std::fs::File::create(dir.path().join(TRAIN_FILE)).unwrap();
        writeln!(train, "ds,y").unwrap();

        let error = ArtifactBundle::load_from(dir.path()).unwrap_err();
        assert!(matches!(error, DataError::Empty(_)));
    }

    #[test]
    fn test_load_bundle_invalid_model_artifact() {
        let dir = TempDir::new().unwrap();
        write_artifacts(&dir);
        let mut model = std::fs::File::create(dir.path().join(MODEL_FILE)).unwrap();
        writeln!(model, "{{}}").unwrap();

        let error = ArtifactBundle::load_from(dir.path()).unwrap_err();
        assert!(matches!(error, DataError::Artifact(_)));
    }
}
