use super::domain::{CanonicalStatus, Submission, SubmissionId};
use super::pipeline::ProcessedSubmissions;
use super::style::StatusStyle;
use serde::Serialize;

/// Submission as rendered in a writer's history.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionView {
    pub id: SubmissionId,
    pub title: String,
    pub status: CanonicalStatus,
    pub status_label: &'static str,
    pub style: StatusStyle,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_doc_link: Option<String>,
    /// Review recording, surfaced for rejected submissions only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loom_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structure: Option<String>,
}

impl Submission {
    pub fn to_view(&self) -> SubmissionView {
        let status = self.canonical_status();
        let loom_url = match status {
            CanonicalStatus::Rejected => self.loom_url.clone(),
            _ => None,
        };

        SubmissionView {
            id: self.id.clone(),
            title: self.title.clone(),
            status,
            status_label: status.label(),
            style: StatusStyle::for_status(status),
            created_at: self.created_at.clone(),
            google_doc_link: self.google_doc_link.clone(),
            loom_url,
            trope: self.trope.clone(),
            structure: self.structure.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionHistoryView {
    pub results: Vec<SubmissionView>,
    pub status_filter_reset: bool,
    pub total: usize,
}

impl From<&ProcessedSubmissions> for SubmissionHistoryView {
    fn from(processed: &ProcessedSubmissions) -> Self {
        Self {
            results: processed.results.iter().map(Submission::to_view).collect(),
            status_filter_reset: processed.status_filter_reset,
            total: processed.results.len(),
        }
    }
}

/// One row of the status legend.
#[derive(Debug, Clone, Serialize)]
pub struct StatusLegendEntry {
    pub status: CanonicalStatus,
    pub label: &'static str,
    pub style: StatusStyle,
}

pub fn status_legend() -> Vec<StatusLegendEntry> {
    CanonicalStatus::ordered()
        .into_iter()
        .map(|status| StatusLegendEntry {
            status,
            label: status.label(),
            style: StatusStyle::for_status(status),
        })
        .collect()
}
