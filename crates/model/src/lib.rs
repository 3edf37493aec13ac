//! # gridcast-model
//!
//! The pre-trained power consumption forecast model: artifact format,
//! future index construction, and evaluation. The model is fitted offline;
//! this crate treats it as a fixed parameter set and only evaluates it.

pub mod artifact;
pub mod error;
pub mod timeline;

pub use artifact::{ForecastRow, FutureRow, RegressorWeight, SeasonalBlock, TrainedModel};
pub use error::{ModelError, Result};
pub use timeline::{future_index, parse_timestamp, Frequency};
