use chrono::NaiveDateTime;
use clap::Args;
use std::path::PathBuf;
use writer_desk::error::AppError;
use writer_desk::workflows::submissions::{
    status_legend, DateRange, FilterMode, FilterSortConfig, ProcessedSubmissions, SortOrder,
    SubmissionImporter, SubmissionListProcessor,
};

#[derive(Args, Debug)]
pub(crate) struct HistoryArgs {
    /// Submission export to read (.json array or .csv sheet)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Case-insensitive title search applied before any other filter
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Secondary filter: "Show All", "Title", or "Custom"
    #[arg(long, value_parser = parse_filter_mode)]
    pub(crate) filter_mode: Option<FilterMode>,
    /// Title fragment used by the "Title" filter mode
    #[arg(long)]
    pub(crate) title: Option<String>,
    /// Range start for the "Custom" filter mode (YYYY-MM-DD or RFC 3339)
    #[arg(long, value_parser = crate::infra::parse_timestamp_arg)]
    pub(crate) start: Option<NaiveDateTime>,
    /// Range end for the "Custom" filter mode (YYYY-MM-DD or RFC 3339)
    #[arg(long, value_parser = crate::infra::parse_timestamp_arg)]
    pub(crate) end: Option<NaiveDateTime>,
    /// Canonical status label to keep, e.g. "Rejected"
    #[arg(long)]
    pub(crate) status: Option<String>,
    /// Sort direction on submission date: desc (default) or asc
    #[arg(long, value_parser = parse_sort_order)]
    pub(crate) sort: Option<SortOrder>,
}

impl HistoryArgs {
    fn config(&self) -> FilterSortConfig {
        FilterSortConfig {
            search_query: self.search.clone().unwrap_or_default(),
            filter_mode: self.filter_mode.unwrap_or_default(),
            search_title: self.title.clone().unwrap_or_default(),
            date_range: DateRange::new(self.start, self.end),
            status_filter: self.status.clone().unwrap_or_default(),
            sort_order: self.sort.unwrap_or_default(),
        }
    }
}

fn parse_filter_mode(raw: &str) -> Result<FilterMode, String> {
    FilterMode::parse(raw.trim())
        .ok_or_else(|| format!("unknown filter mode '{raw}' (expected Show All, Title, or Custom)"))
}

fn parse_sort_order(raw: &str) -> Result<SortOrder, String> {
    SortOrder::parse(raw).ok_or_else(|| format!("unknown sort order '{raw}' (expected asc or desc)"))
}

pub(crate) fn run_history(args: HistoryArgs) -> Result<(), AppError> {
    let submissions = SubmissionImporter::from_path(&args.input)?;
    let config = args.config();
    let processed = SubmissionListProcessor::process(&submissions, &config);

    println!("{}", render_history(&processed, submissions.len()));
    Ok(())
}

pub(crate) fn run_statuses() {
    println!("Submission statuses");
    for entry in status_legend() {
        println!(
            "- {} [{}] ({:?})",
            entry.label, entry.style.badge, entry.style.tone
        );
    }
}

fn render_history(processed: &ProcessedSubmissions, loaded: usize) -> String {
    let mut lines = vec![format!(
        "Submission history: {} of {} submissions",
        processed.results.len(),
        loaded
    )];

    if processed.status_filter_reset {
        lines.push("Status filter cleared (Show All keeps fetch order)".to_string());
    }

    if processed.results.is_empty() {
        lines.push("No submissions match the current filters".to_string());
    }

    for submission in &processed.results {
        let status = submission.canonical_status();
        let mut line = format!(
            "- {} | {} | {} | {}",
            submission.id, submission.title, submission.created_at, status
        );
        if let Some(link) = &submission.google_doc_link {
            line.push_str(&format!(" | doc {link}"));
        }
        if let Some(loom) = submission.to_view().loom_url {
            line.push_str(&format!(" | feedback {loom}"));
        }
        lines.push(line);
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use writer_desk::workflows::submissions::{Submission, SubmissionId};

    fn submission(id: &str, title: &str, status: &str, created_at: &str) -> Submission {
        Submission {
            id: SubmissionId::from(id),
            title: title.to_string(),
            approval_status: Some(status.to_string()),
            created_at: created_at.to_string(),
            google_doc_link: None,
            loom_url: Some(format!("https://loom.com/share/{id}")),
            trope: None,
            structure: None,
        }
    }

    #[test]
    fn render_lists_results_with_canonical_statuses() {
        let processed = ProcessedSubmissions {
            results: vec![
                submission("2", "Beta", "rejected", "2024-01-03"),
                submission("1", "Alpha", "posted", "2024-01-01"),
            ],
            status_filter_reset: false,
        };

        let output = render_history(&processed, 3);

        assert!(output.starts_with("Submission history: 2 of 3 submissions"));
        assert!(output.contains("- 2 | Beta | 2024-01-03 | Rejected | feedback https://loom.com/share/2"));
        assert!(output.contains("- 1 | Alpha | 2024-01-01 | Posted"));
        assert!(!output.contains("share/1"));
    }

    #[test]
    fn render_notes_status_reset_and_empty_results() {
        let processed = ProcessedSubmissions {
            results: Vec::new(),
            status_filter_reset: true,
        };

        let output = render_history(&processed, 0);

        assert!(output.contains("Status filter cleared"));
        assert!(output.contains("No submissions match"));
    }

    #[test]
    fn parsers_accept_menu_values() {
        assert_eq!(parse_filter_mode("Show All"), Ok(FilterMode::ShowAll));
        assert!(parse_filter_mode("Everything").is_err());
        assert_eq!(parse_sort_order("ASC"), Ok(SortOrder::Asc));
    }
}
