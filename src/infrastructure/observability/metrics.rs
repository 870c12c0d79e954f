//! Prometheus metrics infrastructure

use std::sync::{Arc, LazyLock};
use std::time::Duration;

use axum::{Router, extract::State, response::IntoResponse, routing::get};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use regex::Regex;

use super::config::MetricsConfig;
use crate::domain::RouteLabel;

static NUMERIC_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/\d+(/|$)").unwrap_or_else(|e| panic!("invalid path pattern: {e}"))
});

const MAX_PATH_LABEL_LEN: usize = 50;

/// Prometheus metrics handle for serving metrics endpoint
#[derive(Clone)]
pub struct PrometheusMetrics {
    handle: Arc<PrometheusHandle>,
}

impl std::fmt::Debug for PrometheusMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrometheusMetrics").finish_non_exhaustive()
    }
}

impl PrometheusMetrics {
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Installs the global Prometheus recorder. Returns `None` when disabled or
/// when a recorder is already installed.
pub fn init_metrics(config: &MetricsConfig) -> Option<PrometheusMetrics> {
    if !config.enabled {
        tracing::info!("Prometheus metrics disabled");
        return None;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            gauge!("ask_router_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
            tracing::info!(path = %config.path, "Prometheus metrics initialized");

            Some(PrometheusMetrics {
                handle: Arc::new(handle),
            })
        }
        Err(e) => {
            tracing::error!("Failed to initialize Prometheus metrics: {}", e);
            None
        }
    }
}

/// Serves the rendered metrics at `path`
pub fn create_metrics_router(metrics: PrometheusMetrics, path: &str) -> Router {
    Router::new()
        .route(path, get(metrics_handler))
        .with_state(metrics)
}

async fn metrics_handler(State(metrics): State<PrometheusMetrics>) -> impl IntoResponse {
    metrics.render()
}

pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    let labels = [
        ("method", method.to_string()),
        ("path", sanitize_path(path)),
        ("status", status.to_string()),
    ];

    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_seconds", &labels).record(duration.as_secs_f64());

    if status >= 500 {
        counter!("http_server_errors_total", &labels).increment(1);
    }
}

/// One answered question
pub fn record_ask(source: RouteLabel, cached: bool, duration: Duration) {
    let labels = [
        ("source", source.source_tag().to_string()),
        ("cached", cached.to_string()),
    ];

    counter!("ask_requests_total", &labels).increment(1);
    histogram!("ask_duration_seconds", &labels).record(duration.as_secs_f64());
}

/// A cache read or write that failed and was skipped
pub fn record_cache_unavailable(operation: &'static str) {
    counter!("cache_unavailable_total", "operation" => operation).increment(1);
}

pub fn record_adapter_error(source: RouteLabel, kind: &'static str) {
    counter!(
        "adapter_errors_total",
        "source" => source.source_tag(),
        "kind" => kind
    )
    .increment(1);
}

/// Replaces numeric ids so path labels stay low-cardinality
fn sanitize_path(path: &str) -> String {
    let path = NUMERIC_SEGMENT.replace_all(path, "/{id}$1");

    path.chars().take(MAX_PATH_LABEL_LEN).collect()
}
