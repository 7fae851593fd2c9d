//! Route handlers.
//!
//! Each handler runs the access guard, composes the components it needs,
//! and returns a typed JSON response. Component errors surface here as
//! [`Error`] values and are converted to the uniform error envelope at this
//! boundary only.

use crate::diagnose::{self, FALLBACK_DIAGNOSTIC, fixes};
use crate::error::{Error, Result};
use crate::telemetry::metrics;
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use opentelemetry::KeyValue;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::AppState;

/// Name reported by the health probe.
pub const SERVICE_NAME: &str = "logdoctor";

/// Caveat attached to every debug response.
const DEBUG_NOTE: &str = "This is a heuristic assistant. For deeper analysis, connect an LLM \
                          and forward the logs for natural-language diagnosis.";

#[derive(Debug, Default, Deserialize)]
pub struct DebugRequest {
    pub logs: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LogsResponse {
    pub status: &'static str,
    pub logs: String,
}

#[derive(Debug, Serialize)]
pub struct DebugResponse {
    pub status: &'static str,
    pub diagnostics: Vec<String>,
    pub suggested_fixes: Vec<String>,
    pub note: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub ready: bool,
}

/// Uniform error envelope. The `trace` field carries the error source
/// chain and is omitted on the unauthorized path.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub status: &'static str,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, envelope) = match self {
            Error::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ErrorEnvelope {
                    status: "error",
                    error: "unauthorized".to_string(),
                    trace: None,
                },
            ),
            err => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorEnvelope {
                    status: "error",
                    error: err.to_string(),
                    trace: Some(err.trace()),
                },
            ),
        };
        (status, Json(envelope)).into_response()
    }
}

/// Run the access guard against the `X-API-KEY` header.
fn authorize(state: &AppState, headers: &HeaderMap) -> Result<()> {
    let key = headers.get("x-api-key").and_then(|v| v.to_str().ok());
    if state.config.allow_list.permits(key) {
        Ok(())
    } else {
        warn!("rejected request: key not in allow-list");
        Err(Error::Unauthorized)
    }
}

fn record(route: &'static str, outcome: &'static str) {
    metrics::requests_handled().add(
        1,
        &[
            KeyValue::new("route", route),
            KeyValue::new("outcome", outcome),
        ],
    );
}

/// Fetch build logs from the upstream, counting the attempt.
async fn fetch_upstream(state: &AppState) -> Result<String> {
    let result = state.render.fetch_build_logs().await;
    let label = if result.is_ok() { "ok" } else { "error" };
    metrics::upstream_fetches().add(1, &[KeyValue::new("result", label)]);
    result
}

/// `GET /logs`: guarded passthrough of the raw upstream build logs.
pub async fn fetch_logs(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<LogsResponse>> {
    authorize(&state, &headers).inspect_err(|_| record("/logs", "unauthorized"))?;

    let logs = fetch_upstream(&state)
        .await
        .inspect_err(|_| record("/logs", "error"))?;

    record("/logs", "ok");
    Ok(Json(LogsResponse {
        status: "ok",
        logs,
    }))
}

/// `POST /debug`: diagnose caller-supplied logs, or fetch them upstream
/// when the body has none.
pub async fn debug(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<DebugResponse>> {
    authorize(&state, &headers).inspect_err(|_| record("/debug", "unauthorized"))?;

    // Absent body, absent field, and empty string all mean "fetch for me".
    let payload: DebugRequest = if body.is_empty() {
        DebugRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| Error::Other(format!("invalid JSON body: {e}")))
            .inspect_err(|_| record("/debug", "error"))?
    };
    let supplied = payload.logs.filter(|logs| !logs.is_empty());

    let log_text = match supplied {
        Some(logs) => logs,
        None => fetch_upstream(&state)
            .await
            .inspect_err(|_| record("/debug", "error"))?,
    };

    let diagnostics = diagnose::diagnose(&log_text);
    let suggested_fixes = fixes::suggest_fixes(&diagnostics);

    let matched = if diagnostics[0] == FALLBACK_DIAGNOSTIC {
        "fallback"
    } else {
        "rule"
    };
    metrics::diagnostics_emitted().add(
        diagnostics.len() as u64,
        &[KeyValue::new("matched", matched)],
    );
    info!(count = diagnostics.len(), matched, "diagnosis complete");

    record("/debug", "ok");
    Ok(Json(DebugResponse {
        status: "ok",
        diagnostics,
        suggested_fixes,
        note: DEBUG_NOTE,
    }))
}

/// `GET /health`: liveness, no auth.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: SERVICE_NAME,
    })
}

/// `GET /ready`: readiness, true iff both Render credentials are set.
/// Always 200, never errors.
pub async fn ready(State(state): State<AppState>) -> Json<ReadyResponse> {
    Json(ReadyResponse {
        ready: state.config.has_render_credentials(),
    })
}
