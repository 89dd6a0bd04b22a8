use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Opaque submission identifier. Upstream exports use both numeric and string ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SubmissionId(pub String);

impl<'de> Deserialize<'de> for SubmissionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
            Float(f64),
        }

        let id = match RawId::deserialize(deserializer)? {
            RawId::Text(text) => text,
            RawId::Signed(value) => value.to_string(),
            RawId::Unsigned(value) => value.to_string(),
            RawId::Float(value) => value.to_string(),
        };
        Ok(Self(id))
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubmissionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Display-facing review state every submission is bucketed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalStatus {
    PendingApproval,
    ApprovedReadyForProduction,
    VideoCompletePendingUpload,
    StoryContinuation,
    Rejected,
    Posted,
}

impl CanonicalStatus {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::PendingApproval,
            Self::ApprovedReadyForProduction,
            Self::VideoCompletePendingUpload,
            Self::StoryContinuation,
            Self::Rejected,
            Self::Posted,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::PendingApproval => "Pending Approval",
            Self::ApprovedReadyForProduction => "Approved - Ready for Production",
            Self::VideoCompletePendingUpload => "Video Complete - Pending Upload",
            Self::StoryContinuation => "Story Continuation",
            Self::Rejected => "Rejected",
            Self::Posted => "Posted",
        }
    }

    /// Exact, case-sensitive lookup by display label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|status| status.label() == label)
    }
}

impl fmt::Display for CanonicalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A writer's script submission as supplied by the upstream system of record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: SubmissionId,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub approval_status: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_doc_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loom_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure: Option<String>,
}

impl Submission {
    pub fn canonical_status(&self) -> CanonicalStatus {
        super::status::resolve(self.approval_status.as_deref())
    }

    /// `None` when `created_at` is blank or not a recognized timestamp format.
    pub fn created_timestamp(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.created_at)
    }
}

/// Parses RFC 3339, naive ISO date-times, and bare `YYYY-MM-DD` dates (midnight).
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient {
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Option::<Lenient>::deserialize(deserializer)? {
        Some(Lenient::Text(text)) => Some(text),
        Some(Lenient::Other(_)) | None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn submission_accepts_numeric_ids_and_non_string_statuses() {
        let submission: Submission = serde_json::from_value(json!({
            "id": 42,
            "title": "Alpha",
            "approval_status": 7,
            "created_at": "2024-01-01"
        }))
        .expect("submission parses");

        assert_eq!(submission.id, SubmissionId::from("42"));
        assert!(submission.approval_status.is_none());
        assert_eq!(submission.canonical_status(), CanonicalStatus::PendingApproval);
    }

    #[test]
    fn parse_timestamp_supports_common_shapes() {
        let midnight = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_timestamp("2024-01-02"), Some(midnight));
        assert_eq!(parse_timestamp("2024-01-02T00:00:00Z"), Some(midnight));
        assert_eq!(parse_timestamp("2024-01-02T02:00:00+02:00"), Some(midnight));
        assert_eq!(parse_timestamp("2024-01-02T00:00:00.000"), Some(midnight));
        assert!(parse_timestamp("   ").is_none());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn from_label_is_exact() {
        assert_eq!(
            CanonicalStatus::from_label("Rejected"),
            Some(CanonicalStatus::Rejected)
        );
        assert!(CanonicalStatus::from_label("rejected").is_none());
    }
}
