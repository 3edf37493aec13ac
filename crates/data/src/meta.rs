//! Model metadata document.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DataError, Result};

/// Sampling frequency and regressor declaration, stored alongside the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMeta {
    /// Pandas-style frequency string ("H", "D", ...)
    pub freq: String,
    /// Regressor columns the model requires at every future timestamp
    pub regressors: Vec<String>,
}

impl ModelMeta {
    /// Load the metadata JSON from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| DataError::FileNotFound(format!("{}: {}", path.display(), e)))?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| DataError::JsonError(e.to_string()))
    }
}
