//! # gridcast-server
//!
//! REST API server for the gridcast power consumption forecast model.
//! Loads the trained artifacts once at startup and serves forecast,
//! weather, and holiday endpoints over them.

use std::env;
use std::net::SocketAddr;

use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gridcast_data::ArtifactBundle;
use gridcast_server::{app, AppState};

/// Browser origins allowed to call the API.
const ALLOWED_ORIGINS: [&str; 2] = ["http://127.0.0.1:5500", "http://localhost:5500"];

#[tokio::main]
async fn main() {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gridcast_server=info,tower_http=info".into()),
        )
        .init();

    // Load artifacts once. A failure leaves the service in an explicit
    // unavailable state answering 503, not a half-initialized process.
    let state = match ArtifactBundle::load_default() {
        Ok(bundle) => {
            tracing::info!(
                rows = bundle.training.len(),
                freq = %bundle.meta.freq,
                "artifact bundle loaded"
            );
            AppState::ready(bundle)
        }
        Err(e) => {
            tracing::error!(error = %e, "artifact bundle failed to load, serving 503");
            AppState::unavailable(e.to_string())
        }
    };

    // CORS: fixed allow-list of frontend origins
    let origins: Vec<HeaderValue> = ALLOWED_ORIGINS
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with middleware
    let app = app(state).layer(TraceLayer::new_for_http()).layer(cors);

    // Server configuration from environment
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "8000".to_string())
        .parse()
        .expect("PORT must be a valid number");
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .expect("Invalid HOST:PORT configuration");

    tracing::info!(
        "gridcast-server v{} listening on {}",
        env!("CARGO_PKG_VERSION"),
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
