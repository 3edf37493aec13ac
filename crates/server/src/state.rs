//! Shared application state.
//!
//! The artifact bundle is loaded once before any request is served and held
//! read-only behind an `Arc`; handlers never mutate it. Startup failure is
//! an explicit state, distinguishable from ready, so every data-dependent
//! handler can answer with a diagnosable 503 instead of an undefined error.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use gridcast_data::{ArtifactBundle, WEATHER_FILE};

use crate::error::ApiError;

/// Outcome of startup artifact loading.
#[derive(Debug)]
pub enum ServiceStatus {
    Ready(ArtifactBundle),
    /// Artifacts failed to load; the cause is served until restart
    Unavailable(String),
}

/// Cloneable handler state.
#[derive(Clone)]
pub struct AppState {
    status: Arc<ServiceStatus>,
    weather_file: Arc<PathBuf>,
}

impl AppState {
    pub fn ready(bundle: ArtifactBundle) -> Self {
        Self::new(ServiceStatus::Ready(bundle))
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::new(ServiceStatus::Unavailable(reason.into()))
    }

    fn new(status: ServiceStatus) -> Self {
        Self {
            status: Arc::new(status),
            weather_file: Arc::new(PathBuf::from(WEATHER_FILE)),
        }
    }

    /// Override the external weather table location.
    pub fn with_weather_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.weather_file = Arc::new(path.into());
        self
    }

    /// The loaded bundle, or the recorded startup failure.
    pub fn bundle(&self) -> Result<&ArtifactBundle, ApiError> {
        match self.status.as_ref() {
            ServiceStatus::Ready(bundle) => Ok(bundle),
            ServiceStatus::Unavailable(reason) => Err(ApiError::Unavailable(reason.clone())),
        }
    }

    pub fn weather_file(&self) -> &Path {
        &self.weather_file
    }
}
