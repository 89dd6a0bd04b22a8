use std::sync::{Arc, Mutex};

use axum::body::to_bytes;
use axum::response::Response;
use serde_json::Value;

use crate::workflows::submissions::domain::{Submission, SubmissionId};
use crate::workflows::submissions::repository::{RepositoryError, SubmissionRepository};
use crate::workflows::submissions::{submission_router, NewSubmission, SubmissionService};

pub(super) fn submission(id: &str, title: &str, status: Option<&str>, created_at: &str) -> Submission {
    Submission {
        id: SubmissionId::from(id),
        title: title.to_string(),
        approval_status: status.map(str::to_string),
        created_at: created_at.to_string(),
        google_doc_link: None,
        loom_url: None,
        trope: None,
        structure: None,
    }
}

/// Alpha (posted, Jan 1), Beta (rejected, Jan 3), Gamma (pending, Jan 2).
pub(super) fn sample_history() -> Vec<Submission> {
    vec![
        submission("1", "Alpha", Some("posted"), "2024-01-01"),
        submission("2", "Beta", Some("rejected"), "2024-01-03"),
        submission("3", "Gamma", Some("pending"), "2024-01-02"),
    ]
}

pub(super) fn titles(submissions: &[Submission]) -> Vec<&str> {
    submissions
        .iter()
        .map(|submission| submission.title.as_str())
        .collect()
}

pub(super) fn new_submission() -> NewSubmission {
    NewSubmission {
        title: "  The Lighthouse Keeper ".to_string(),
        trope: Some("Enemies to Lovers".to_string()),
        structure: Some("Three Act".to_string()),
        google_doc_link: Some("https://docs.google.com/document/d/abc123".to_string()),
    }
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    records: Mutex<Vec<Submission>>,
}

impl SubmissionRepository for MemoryRepository {
    fn insert(&self, submission: Submission) -> Result<Submission, RepositoryError> {
        let mut guard = self.records.lock().unwrap();
        if guard.iter().any(|existing| existing.id == submission.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(submission.clone());
        Ok(submission)
    }

    fn fetch(&self, id: &SubmissionId) -> Result<Option<Submission>, RepositoryError> {
        let guard = self.records.lock().unwrap();
        Ok(guard.iter().find(|existing| &existing.id == id).cloned())
    }

    fn all(&self) -> Result<Vec<Submission>, RepositoryError> {
        Ok(self.records.lock().unwrap().clone())
    }
}

pub(super) struct ConflictRepository;

impl SubmissionRepository for ConflictRepository {
    fn insert(&self, _submission: Submission) -> Result<Submission, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch(&self, _id: &SubmissionId) -> Result<Option<Submission>, RepositoryError> {
        Ok(None)
    }

    fn all(&self) -> Result<Vec<Submission>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl SubmissionRepository for UnavailableRepository {
    fn insert(&self, _submission: Submission) -> Result<Submission, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn fetch(&self, _id: &SubmissionId) -> Result<Option<Submission>, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn all(&self) -> Result<Vec<Submission>, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }
}

pub(super) fn build_service() -> (
    Arc<SubmissionService<MemoryRepository>>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let service = Arc::new(SubmissionService::new(repository.clone()));
    (service, repository)
}

pub(super) fn seeded_router() -> axum::Router {
    let (service, _) = build_service();
    service.seed(sample_history()).expect("seed succeeds");
    submission_router(service)
}

pub(super) async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}
