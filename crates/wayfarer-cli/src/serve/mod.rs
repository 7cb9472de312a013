//! HTTP surface for the answer pipeline.
//!
//! Exposes one query endpoint mirroring the library's event contract:
//! a JSON object with a `question` field in, `{ body, status }` out.
//!
//! # Module Structure
//!
//! - `handlers` - HTTP route handlers
//! - `models` - API request/response types (DTOs)

mod handlers;
mod models;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use color_eyre::eyre::Result;
use tower_http::cors::{Any, CorsLayer};

use wayfarer_core::{Config, Pipeline};

/// Shared application state for the server.
pub struct AppState {
    /// The answer pipeline.
    pub pipeline: Pipeline,
}

/// Start the query server.
pub async fn start_server(config: Config, port: u16) -> Result<()> {
    let pipeline = Pipeline::from_config(&config)?;

    let state = Arc::new(AppState { pipeline });

    let app = Router::new()
        .route("/query", post(handlers::query))
        .route("/health", get(handlers::health))
        // CORS for API access
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    println!("Starting Wayfarer query server...");
    println!("Endpoint: http://localhost:{}/query", port);
    println!("Press Ctrl+C to stop\n");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
