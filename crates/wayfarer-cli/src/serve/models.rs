//! API request/response types (DTOs).

use serde::Serialize;

/// Error payload returned for failed requests.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable failure description.
    pub error: String,
}

/// Liveness probe payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "ok" while the server is up.
    pub status: &'static str,
}
