mod parser;

use super::domain::Submission;
use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Debug)]
pub enum SubmissionImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    UnsupportedFormat(String),
}

impl std::fmt::Display for SubmissionImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionImportError::Io(err) => {
                write!(f, "failed to read submission export: {}", err)
            }
            SubmissionImportError::Csv(err) => write!(f, "invalid submission CSV data: {}", err),
            SubmissionImportError::Json(err) => {
                write!(f, "invalid submission JSON data: {}", err)
            }
            SubmissionImportError::UnsupportedFormat(extension) => write!(
                f,
                "unsupported submission export format '{}': expected .json or .csv",
                extension
            ),
        }
    }
}

impl std::error::Error for SubmissionImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SubmissionImportError::Io(err) => Some(err),
            SubmissionImportError::Csv(err) => Some(err),
            SubmissionImportError::Json(err) => Some(err),
            SubmissionImportError::UnsupportedFormat(_) => None,
        }
    }
}

impl From<std::io::Error> for SubmissionImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for SubmissionImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<serde_json::Error> for SubmissionImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Loads submission exports, either a JSON array or a CSV sheet.
pub struct SubmissionImporter;

impl SubmissionImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Submission>, SubmissionImportError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let submissions = match extension.as_str() {
            "json" => Self::from_json_reader(std::fs::File::open(path)?)?,
            "csv" => Self::from_csv_reader(std::fs::File::open(path)?)?,
            _ => return Err(SubmissionImportError::UnsupportedFormat(extension)),
        };

        info!(
            path = %path.display(),
            count = submissions.len(),
            "submission export loaded"
        );
        Ok(submissions)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Vec<Submission>, SubmissionImportError> {
        Ok(parser::parse_json(reader)?)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Vec<Submission>, SubmissionImportError> {
        Ok(parser::parse_csv(reader)?)
    }
}
