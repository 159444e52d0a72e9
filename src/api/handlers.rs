//! API request handlers

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tokio::time::sleep;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::api::lifecycle::AgentHandle;
use crate::api::types::*;
use crate::config::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub agent: Arc<AgentHandle>,
}

type ErrorResponse = (StatusCode, Json<ErrorDetail>);

fn server_error(detail: impl Into<String>) -> ErrorResponse {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorDetail::new(detail)),
    )
}

/// Execute a search for `POST /api/buscar`.
pub async fn buscar(
    State(state): State<AppState>,
    Json(req): Json<BuscarRequest>,
) -> Result<Json<BuscarResponse>, ErrorResponse> {
    let pergunta = req.pergunta.trim().to_string();
    if pergunta.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorDetail::new("Pergunta não pode estar vazia")),
        ));
    }

    info!("POST /api/buscar: {pergunta}");

    let agent = state
        .agent
        .acquire()
        .await
        .map_err(|e| server_error(format!("Erro ao inicializar agente RAG: {e}")))?;

    let attempts = state.config.retry.max_attempts.max(1);
    let delay = state.config.retry_delay();
    let mut last_error = String::new();

    for attempt in 1..=attempts {
        match agent.try_answer(&pergunta).await {
            Ok(resposta) => {
                return Ok(Json(BuscarResponse {
                    success: true,
                    resposta,
                    pergunta,
                }));
            }
            Err(e) => {
                warn!("Search attempt {attempt}/{attempts} failed: {e}");
                last_error = e.to_string();
                if attempt < attempts {
                    sleep(delay).await;
                }
            }
        }
    }

    error!("Search failed after {attempts} attempts: {last_error}");
    Err(server_error(format!("Erro interno: {last_error}")))
}

/// Health probe; drives agent initialization.
pub async fn health(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, ErrorResponse> {
    match state.agent.acquire().await {
        Ok(_) => Ok(Json(HealthResponse {
            status: "healthy".to_string(),
            message: "Agente RAG funcionando normalmente".to_string(),
            agent_type: "RagAgent".to_string(),
        })),
        Err(e) => Err(server_error(format!(
            "Agente RAG não pôde ser inicializado: {e}"
        ))),
    }
}

/// Passive diagnostics: lifecycle state and credential presence, never
/// credential values.
pub async fn diagnostics(State(state): State<AppState>) -> Json<DiagnosticsResponse> {
    let environment = state
        .agent
        .credential_presence()
        .into_iter()
        .map(|(name, present)| EnvVarStatus {
            name: name.to_string(),
            present,
        })
        .collect();

    Json(DiagnosticsResponse {
        agent_state: state.agent.state_name().await.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment,
    })
}
