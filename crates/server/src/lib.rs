//! # gridcast-server
//!
//! HTTP surface for the power consumption forecast service: the forecast
//! pipeline endpoint plus auxiliary weather and holiday listings, served
//! over a read-only artifact bundle loaded at startup.

use axum::routing::get;
use axum::Router;

pub mod error;
pub mod routes;
pub mod source;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

/// Build the application router over the shared state.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::root))
        .route("/forecast", get(routes::forecast))
        .route("/weather", get(routes::weather))
        .route("/holidays", get(routes::holidays))
        .with_state(state)
}
