use chrono::NaiveDateTime;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use writer_desk::workflows::submissions::{
    parse_timestamp, RepositoryError, Submission, SubmissionId, SubmissionRepository,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local store; keeps submissions in arrival order.
#[derive(Default, Clone)]
pub(crate) struct InMemorySubmissionRepository {
    records: Arc<Mutex<Vec<Submission>>>,
}

impl InMemorySubmissionRepository {
    fn lock(&self) -> Result<MutexGuard<'_, Vec<Submission>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("submission store poisoned".to_string()))
    }
}

impl SubmissionRepository for InMemorySubmissionRepository {
    fn insert(&self, submission: Submission) -> Result<Submission, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.iter().any(|existing| existing.id == submission.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(submission.clone());
        Ok(submission)
    }

    fn fetch(&self, id: &SubmissionId) -> Result<Option<Submission>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.iter().find(|existing| &existing.id == id).cloned())
    }

    fn all(&self) -> Result<Vec<Submission>, RepositoryError> {
        Ok(self.lock()?.clone())
    }
}

pub(crate) fn parse_timestamp_arg(raw: &str) -> Result<NaiveDateTime, String> {
    parse_timestamp(raw).ok_or_else(|| {
        format!("failed to parse '{raw}' as YYYY-MM-DD or an RFC 3339 timestamp")
    })
}
