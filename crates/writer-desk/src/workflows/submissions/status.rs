use super::domain::CanonicalStatus;

/// Maps a raw upstream approval status onto its canonical display status.
///
/// Total: blank or unrecognized values fall back to `Pending Approval`.
pub fn resolve(raw: Option<&str>) -> CanonicalStatus {
    match raw {
        Some(value) => status_for_normalized(&normalize_status(value)),
        None => CanonicalStatus::PendingApproval,
    }
}

fn normalize_status(value: &str) -> String {
    value.trim().to_lowercase()
}

fn status_for_normalized(normalized: &str) -> CanonicalStatus {
    match normalized {
        "writer submissions (qa)" => CanonicalStatus::PendingApproval,
        "approved script. ready for production" => CanonicalStatus::ApprovedReadyForProduction,
        "finished video" => CanonicalStatus::VideoCompletePendingUpload,
        "pending" => CanonicalStatus::PendingApproval,
        "story continuation" => CanonicalStatus::StoryContinuation,
        "rejected" => CanonicalStatus::Rejected,
        "posted" => CanonicalStatus::Posted,
        _ => CanonicalStatus::PendingApproval,
    }
}
