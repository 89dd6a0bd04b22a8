//! Writer submission history: status normalization, filtering, sorting, and intake.

pub mod domain;
pub mod import;
pub mod pipeline;
pub mod repository;
pub mod router;
pub mod service;
pub mod status;
pub mod style;
pub mod views;

#[cfg(test)]
mod tests;

pub use domain::{parse_timestamp, CanonicalStatus, Submission, SubmissionId};
pub use import::{SubmissionImportError, SubmissionImporter};
pub use pipeline::{
    DateRange, FilterMode, FilterSortConfig, ProcessedSubmissions, SortOrder,
    SubmissionListProcessor,
};
pub use repository::{RepositoryError, SubmissionRepository};
pub use router::{submission_router, HistoryQuery};
pub use service::{
    NewSubmission, SubmissionService, SubmissionServiceError, SubmissionValidationError,
    INTAKE_STATUS,
};
pub use status::resolve;
pub use style::{style_for_key, StatusStyle, StatusTone};
pub use views::{status_legend, StatusLegendEntry, SubmissionHistoryView, SubmissionView};
