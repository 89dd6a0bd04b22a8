use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;
use writer_desk::workflows::submissions::{
    status_legend, submission_router, FilterSortConfig, StatusLegendEntry, Submission,
    SubmissionHistoryView, SubmissionListProcessor, SubmissionRepository, SubmissionService,
};

/// Caller-supplied history plus the dashboard's current filter state.
#[derive(Debug, Deserialize)]
pub(crate) struct HistoryRequest {
    pub(crate) submissions: Vec<Submission>,
    #[serde(default)]
    pub(crate) config: FilterSortConfig,
}

pub(crate) fn with_submission_routes<R>(service: Arc<SubmissionService<R>>) -> axum::Router
where
    R: SubmissionRepository + 'static,
{
    submission_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/statuses", axum::routing::get(statuses_endpoint))
        .route(
            "/api/v1/submissions/history",
            axum::routing::post(history_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn statuses_endpoint() -> Json<Vec<StatusLegendEntry>> {
    Json(status_legend())
}

pub(crate) async fn history_endpoint(
    Json(payload): Json<HistoryRequest>,
) -> Json<SubmissionHistoryView> {
    let HistoryRequest {
        submissions,
        config,
    } = payload;

    let processed = SubmissionListProcessor::process(&submissions, &config);
    debug!(
        received = submissions.len(),
        returned = processed.results.len(),
        status_filter_reset = processed.status_filter_reset,
        "ad-hoc history processed"
    );

    Json(SubmissionHistoryView::from(&processed))
}
