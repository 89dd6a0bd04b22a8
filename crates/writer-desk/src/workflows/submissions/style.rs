use super::domain::CanonicalStatus;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTone {
    Neutral,
    Info,
    Success,
    Progress,
    Danger,
}

/// Badge presentation for a canonical status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusStyle {
    pub label: &'static str,
    pub badge: &'static str,
    pub tone: StatusTone,
}

const DEFAULT_STYLE: StatusStyle = StatusStyle {
    label: "Unknown",
    badge: "#9ca3af",
    tone: StatusTone::Neutral,
};

impl StatusStyle {
    pub const fn for_status(status: CanonicalStatus) -> Self {
        match status {
            CanonicalStatus::PendingApproval => Self {
                label: "Pending Approval",
                badge: "#f59e0b",
                tone: StatusTone::Info,
            },
            CanonicalStatus::ApprovedReadyForProduction => Self {
                label: "Approved - Ready for Production",
                badge: "#10b981",
                tone: StatusTone::Success,
            },
            CanonicalStatus::VideoCompletePendingUpload => Self {
                label: "Video Complete - Pending Upload",
                badge: "#3b82f6",
                tone: StatusTone::Progress,
            },
            CanonicalStatus::StoryContinuation => Self {
                label: "Story Continuation",
                badge: "#8b5cf6",
                tone: StatusTone::Progress,
            },
            CanonicalStatus::Rejected => Self {
                label: "Rejected",
                badge: "#ef4444",
                tone: StatusTone::Danger,
            },
            CanonicalStatus::Posted => Self {
                label: "Posted",
                badge: "#059669",
                tone: StatusTone::Success,
            },
        }
    }
}

/// Looks a style up by canonical label, falling back to a neutral badge.
pub fn style_for_key(key: &str) -> StatusStyle {
    CanonicalStatus::from_label(key)
        .map(StatusStyle::for_status)
        .unwrap_or(DEFAULT_STYLE)
}
