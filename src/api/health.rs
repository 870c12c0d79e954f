//! Health check endpoints for Kubernetes probes

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::api::types::Json;
use crate::domain::DomainError;

use super::state::AppState;

const READY_PROBE_KEY: &str = "health:ready-probe";

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<Vec<HealthCheck>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

impl HealthCheck {
    fn from_result(
        name: &str,
        backend: &str,
        result: Result<(), DomainError>,
        unhealthy_as: HealthStatus,
        started: Instant,
    ) -> Self {
        let (status, message) = match result {
            Ok(()) => (HealthStatus::Healthy, None),
            Err(e) => (unhealthy_as, Some(e.to_string())),
        };

        Self {
            name: name.to_string(),
            status,
            backend: Some(backend.to_string()),
            message,
            latency_ms: Some(started.elapsed().as_millis() as u64),
        }
    }
}

/// Returns 200 while the process is serving
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: None,
        latency_ms: None,
    };

    (StatusCode::OK, Json(response))
}

/// Checks the cache, the student database and the retrieval index.
///
/// Answering works without the cache, so a cache outage only degrades
/// readiness. An unreachable database or an index with no records reports
/// unhealthy.
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let start = Instant::now();

    let (cache, database) = futures::join!(check_cache(&state), check_database(&state));
    let checks = vec![cache, database, check_index(&state)];

    let overall_status = checks
        .iter()
        .map(|c| c.status)
        .fold(HealthStatus::Healthy, worst);

    let response = HealthResponse {
        status: overall_status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: Some(checks),
        latency_ms: Some(start.elapsed().as_millis() as u64),
    };

    let status_code = match overall_status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(response))
}

/// Liveness probe
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

fn worst(a: HealthStatus, b: HealthStatus) -> HealthStatus {
    use HealthStatus::*;

    match (a, b) {
        (Unhealthy, _) | (_, Unhealthy) => Unhealthy,
        (Degraded, _) | (_, Degraded) => Degraded,
        _ => Healthy,
    }
}

async fn check_cache(state: &AppState) -> HealthCheck {
    let start = Instant::now();
    let result = state.cache.exists(READY_PROBE_KEY).await.map(|_| ());

    HealthCheck::from_result(
        "cache",
        state.cache.backend_name(),
        result,
        HealthStatus::Degraded,
        start,
    )
}

async fn check_database(state: &AppState) -> HealthCheck {
    let start = Instant::now();
    let result = state.students.health_check().await;

    HealthCheck::from_result(
        "database",
        state.students.backend_name(),
        result,
        HealthStatus::Unhealthy,
        start,
    )
}

fn check_index(state: &AppState) -> HealthCheck {
    let records = state.index.len();
    let (status, message) = if records == 0 {
        (HealthStatus::Unhealthy, Some("No records loaded".to_string()))
    } else {
        (
            HealthStatus::Healthy,
            Some(format!("{} records, dimension {}", records, state.index.dimension())),
        )
    };

    HealthCheck {
        name: "index".to_string(),
        status,
        backend: None,
        message,
        latency_ms: None,
    }
}
