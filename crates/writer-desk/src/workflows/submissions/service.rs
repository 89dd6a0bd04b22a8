use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use tracing::{debug, info};

use super::domain::{Submission, SubmissionId};
use super::pipeline::{FilterSortConfig, ProcessedSubmissions, SubmissionListProcessor};
use super::repository::{RepositoryError, SubmissionRepository};

/// Raw status the review queue assigns to fresh intake.
pub const INTAKE_STATUS: &str = "Writer Submissions (QA)";

/// Script metadata sent from the submission form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewSubmission {
    pub title: String,
    #[serde(default)]
    pub trope: Option<String>,
    #[serde(default)]
    pub structure: Option<String>,
    #[serde(default)]
    pub google_doc_link: Option<String>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SubmissionValidationError {
    #[error("title must not be blank")]
    BlankTitle,
    #[error("document link '{0}' must be an http(s) URL")]
    InvalidDocumentLink(String),
}

impl NewSubmission {
    fn validate(&self) -> Result<(), SubmissionValidationError> {
        if self.title.trim().is_empty() {
            return Err(SubmissionValidationError::BlankTitle);
        }

        if let Some(link) = non_blank(&self.google_doc_link) {
            let has_host = link
                .strip_prefix("https://")
                .or_else(|| link.strip_prefix("http://"))
                .is_some_and(|rest| !rest.is_empty());
            if !has_host {
                return Err(SubmissionValidationError::InvalidDocumentLink(
                    link.to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Service tying intake and history rendering to a repository.
pub struct SubmissionService<R> {
    repository: Arc<R>,
}

static SUBMISSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_submission_id() -> SubmissionId {
    let id = SUBMISSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SubmissionId(format!("sub-{id:06}"))
}

/// Keeps generated ids clear of previously issued ones loaded from an export.
fn reserve_issued_id(id: &SubmissionId) {
    if let Some(issued) = id
        .0
        .strip_prefix("sub-")
        .and_then(|digits| digits.parse::<u64>().ok())
    {
        SUBMISSION_SEQUENCE.fetch_max(issued.saturating_add(1), Ordering::Relaxed);
    }
}

impl<R> SubmissionService<R>
where
    R: SubmissionRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Accept a new submission stamped with the current time.
    pub fn submit(&self, submission: NewSubmission) -> Result<Submission, SubmissionServiceError> {
        self.submit_at(submission, Utc::now())
    }

    pub fn submit_at(
        &self,
        submission: NewSubmission,
        now: DateTime<Utc>,
    ) -> Result<Submission, SubmissionServiceError> {
        submission.validate()?;

        let record = Submission {
            id: next_submission_id(),
            title: submission.title.trim().to_string(),
            approval_status: Some(INTAKE_STATUS.to_string()),
            created_at: now.to_rfc3339_opts(SecondsFormat::Secs, true),
            google_doc_link: non_blank(&submission.google_doc_link).map(str::to_string),
            loom_url: None,
            trope: non_blank(&submission.trope).map(str::to_string),
            structure: non_blank(&submission.structure).map(str::to_string),
        };

        let stored = self.repository.insert(record)?;
        info!(id = %stored.id, "submission accepted");
        Ok(stored)
    }

    /// Load pre-existing submissions, returning how many were stored.
    pub fn seed(&self, submissions: Vec<Submission>) -> Result<usize, SubmissionServiceError> {
        let mut stored = 0;
        for submission in submissions {
            reserve_issued_id(&submission.id);
            match self.repository.insert(submission) {
                Ok(_) => stored += 1,
                Err(RepositoryError::Conflict) => {
                    debug!("duplicate submission skipped while seeding");
                }
                Err(err) => return Err(err.into()),
            }
        }
        Ok(stored)
    }

    /// Fetch a submission by id.
    pub fn get(&self, id: &SubmissionId) -> Result<Submission, SubmissionServiceError> {
        let submission = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(submission)
    }

    /// Run the stored history through the filter/sort pipeline.
    pub fn history(
        &self,
        config: &FilterSortConfig,
    ) -> Result<ProcessedSubmissions, SubmissionServiceError> {
        let submissions = self.repository.all()?;
        Ok(SubmissionListProcessor::process(&submissions, config))
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionServiceError {
    #[error(transparent)]
    Validation(#[from] SubmissionValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
