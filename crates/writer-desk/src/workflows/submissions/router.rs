use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{parse_timestamp, SubmissionId};
use super::pipeline::{DateRange, FilterMode, FilterSortConfig, SortOrder};
use super::repository::{RepositoryError, SubmissionRepository};
use super::service::{NewSubmission, SubmissionService, SubmissionServiceError};
use super::views::SubmissionHistoryView;

/// Router builder exposing intake and history endpoints.
pub fn submission_router<R>(service: Arc<SubmissionService<R>>) -> Router
where
    R: SubmissionRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/submissions",
            get(history_handler::<R>).post(submit_handler::<R>),
        )
        .route("/api/v1/submissions/:submission_id", get(get_handler::<R>))
        .with_state(service)
}

/// Query string mirror of [`FilterSortConfig`].
#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub filter_mode: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
}

impl HistoryQuery {
    pub fn into_config(self) -> Result<FilterSortConfig, String> {
        let filter_mode = match self.filter_mode.as_deref() {
            Some(raw) => {
                FilterMode::parse(raw).ok_or_else(|| format!("unknown filter mode '{raw}'"))?
            }
            None => FilterMode::Unset,
        };
        let sort_order = match self.sort.as_deref() {
            Some(raw) => SortOrder::parse(raw).ok_or_else(|| format!("unknown sort order '{raw}'"))?,
            None => SortOrder::Desc,
        };

        Ok(FilterSortConfig {
            search_query: self.q.unwrap_or_default(),
            filter_mode,
            search_title: self.title.unwrap_or_default(),
            date_range: DateRange::new(range_bound(self.start)?, range_bound(self.end)?),
            status_filter: self.status.unwrap_or_default(),
            sort_order,
        })
    }
}

fn range_bound(raw: Option<String>) -> Result<Option<chrono::NaiveDateTime>, String> {
    match raw {
        Some(value) if value.trim().is_empty() => Ok(None),
        Some(value) => parse_timestamp(&value)
            .map(Some)
            .ok_or_else(|| format!("failed to parse '{value}' as a timestamp")),
        None => Ok(None),
    }
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<SubmissionService<R>>>,
    axum::Json(submission): axum::Json<NewSubmission>,
) -> Response
where
    R: SubmissionRepository + 'static,
{
    match service.submit(submission) {
        Ok(record) => (StatusCode::ACCEPTED, axum::Json(record.to_view())).into_response(),
        Err(SubmissionServiceError::Validation(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(SubmissionServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": "submission already exists",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn history_handler<R>(
    State(service): State<Arc<SubmissionService<R>>>,
    Query(query): Query<HistoryQuery>,
) -> Response
where
    R: SubmissionRepository + 'static,
{
    let config = match query.into_config() {
        Ok(config) => config,
        Err(message) => {
            let payload = json!({ "error": message });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    match service.history(&config) {
        Ok(processed) => {
            let view = SubmissionHistoryView::from(&processed);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn get_handler<R>(
    State(service): State<Arc<SubmissionService<R>>>,
    Path(submission_id): Path<String>,
) -> Response
where
    R: SubmissionRepository + 'static,
{
    let id = SubmissionId(submission_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record.to_view())).into_response(),
        Err(SubmissionServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": format!("submission {} not found", id),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

fn internal_error(error: SubmissionServiceError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
