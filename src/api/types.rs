//! API request and response types

use serde::Deserialize;
use serde::Serialize;

/// Body of `POST /api/buscar`.
#[derive(Debug, Deserialize)]
pub struct BuscarRequest {
    pub pergunta: String,
}

/// Successful answer payload.
#[derive(Debug, Serialize)]
pub struct BuscarResponse {
    pub success: bool,
    pub resposta: String,
    pub pergunta: String,
}

/// Error payload carried alongside non-2xx statuses.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub detail: String,
}

impl ErrorDetail {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub agent_type: String,
}

/// Presence (never the value) of one required environment variable.
#[derive(Debug, Serialize)]
pub struct EnvVarStatus {
    pub name: String,
    pub present: bool,
}

/// Diagnostics report.
#[derive(Debug, Serialize)]
pub struct DiagnosticsResponse {
    pub agent_state: String,
    pub version: String,
    pub environment: Vec<EnvVarStatus>,
}
