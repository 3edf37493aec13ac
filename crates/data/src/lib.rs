//! # gridcast-data
//!
//! Artifact bundle loading for the forecast service: the training table,
//! model metadata, and the optional external weather/holiday CSV.

pub mod bundle;
pub mod error;
pub mod meta;
pub mod training;
pub mod weather;

pub use bundle::{ArtifactBundle, META_FILE, MODEL_FILE, TRAIN_FILE, WEATHER_FILE};
pub use error::{DataError, Result};
pub use meta::ModelMeta;
pub use training::{TrainingRow, TrainingTable};
pub use weather::{WeatherRecord, WeatherTable, TIMESTAMP_COLUMN};
