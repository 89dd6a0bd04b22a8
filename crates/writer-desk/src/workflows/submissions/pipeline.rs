use super::domain::{parse_timestamp, Submission};
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use tracing::debug;

/// Status filter values that disable status filtering.
const ALL_STATUSES: [&str; 2] = ["All", "All Statuses"];

/// Secondary, mutually exclusive filter stage selected from the filter menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterMode {
    #[default]
    #[serde(rename = "")]
    Unset,
    #[serde(rename = "Show All")]
    ShowAll,
    #[serde(rename = "Title")]
    Title,
    #[serde(rename = "Custom")]
    Custom,
}

impl FilterMode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unset => "",
            Self::ShowAll => "Show All",
            Self::Title => "Title",
            Self::Custom => "Custom",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        [Self::Unset, Self::ShowAll, Self::Title, Self::Custom]
            .into_iter()
            .find(|mode| mode.label() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Desc,
    Asc,
}

impl SortOrder {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "desc" => Some(Self::Desc),
            "asc" => Some(Self::Asc),
            _ => None,
        }
    }
}

/// Inclusive `created_at` window used by [`FilterMode::Custom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(
        default,
        serialize_with = "serialize_optional_timestamp",
        deserialize_with = "deserialize_optional_timestamp"
    )]
    pub start: Option<NaiveDateTime>,
    #[serde(
        default,
        serialize_with = "serialize_optional_timestamp",
        deserialize_with = "deserialize_optional_timestamp"
    )]
    pub end: Option<NaiveDateTime>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Self {
        Self { start, end }
    }

    fn bounds(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        self.start.zip(self.end)
    }
}

/// Query, filter, and sort state of the submission history view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSortConfig {
    #[serde(alias = "searchQuery")]
    pub search_query: String,
    #[serde(alias = "filterMode")]
    pub filter_mode: FilterMode,
    #[serde(alias = "searchTitle")]
    pub search_title: String,
    #[serde(alias = "dateRange")]
    pub date_range: DateRange,
    #[serde(alias = "statusFilter", deserialize_with = "null_as_empty")]
    pub status_filter: String,
    #[serde(alias = "sortOrder")]
    pub sort_order: SortOrder,
}

impl FilterSortConfig {
    /// The canonical status label to filter on, if status filtering is active.
    pub fn selected_status(&self) -> Option<&str> {
        let value = self.status_filter.as_str();
        if value.is_empty() || ALL_STATUSES.contains(&value) {
            None
        } else {
            Some(value)
        }
    }

    /// Applies the state changes a processing pass requested.
    pub fn reconcile(&mut self, outcome: &ProcessedSubmissions) {
        if outcome.status_filter_reset {
            self.status_filter.clear();
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedSubmissions {
    pub results: Vec<Submission>,
    /// Set when the pass cleared the caller's status filter (`Show All`).
    pub status_filter_reset: bool,
}

/// Search, mode filter, status filter, then sort a submission history.
pub struct SubmissionListProcessor;

impl SubmissionListProcessor {
    pub fn process(submissions: &[Submission], config: &FilterSortConfig) -> ProcessedSubmissions {
        let query = config.search_query.trim();
        let mut filtered: Vec<&Submission> = if query.is_empty() {
            submissions.iter().collect()
        } else {
            submissions
                .iter()
                .filter(|submission| title_contains(submission, query))
                .collect()
        };

        match config.filter_mode {
            FilterMode::ShowAll => {
                debug!(
                    input = submissions.len(),
                    output = filtered.len(),
                    "show all selected; status filter reset and sort skipped"
                );
                return ProcessedSubmissions {
                    results: filtered.into_iter().cloned().collect(),
                    status_filter_reset: true,
                };
            }
            FilterMode::Title => {
                filtered.retain(|submission| title_contains(submission, &config.search_title));
            }
            FilterMode::Custom => {
                if let Some((start, end)) = config.date_range.bounds() {
                    filtered.retain(|submission| {
                        submission
                            .created_timestamp()
                            .is_some_and(|created| start <= created && created <= end)
                    });
                }
            }
            FilterMode::Unset => {}
        }

        if let Some(label) = config.selected_status() {
            filtered.retain(|submission| submission.canonical_status().label() == label);
        }

        let order = config.sort_order;
        let mut keyed: Vec<(Option<NaiveDateTime>, &Submission)> = filtered
            .into_iter()
            .map(|submission| (submission.created_timestamp(), submission))
            .collect();
        keyed.sort_by(|(a, _), (b, _)| compare_created(*a, *b, order));

        debug!(
            input = submissions.len(),
            output = keyed.len(),
            mode = config.filter_mode.label(),
            ?order,
            "submission history processed"
        );

        ProcessedSubmissions {
            results: keyed
                .into_iter()
                .map(|(_, submission)| submission.clone())
                .collect(),
            status_filter_reset: false,
        }
    }
}

fn title_contains(submission: &Submission, needle: &str) -> bool {
    submission
        .title
        .to_lowercase()
        .contains(&needle.to_lowercase())
}

// Unparseable timestamps tie with each other and trail valid ones in either order.
fn compare_created(
    a: Option<NaiveDateTime>,
    b: Option<NaiveDateTime>,
    order: SortOrder,
) -> Ordering {
    match (a, b) {
        (Some(left), Some(right)) => match order {
            SortOrder::Desc => right.cmp(&left),
            SortOrder::Asc => left.cmp(&right),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn serialize_optional_timestamp<S>(
    value: &Option<NaiveDateTime>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(ts) => serializer.serialize_some(&ts.format("%Y-%m-%dT%H:%M:%S").to_string()),
        None => serializer.serialize_none(),
    }
}

fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt {
        Some(value) if value.trim().is_empty() => Ok(None),
        Some(value) => parse_timestamp(&value).map(Some).ok_or_else(|| {
            serde::de::Error::custom(format!("failed to parse '{value}' as a timestamp"))
        }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_mode_parses_menu_labels() {
        assert_eq!(FilterMode::parse("Show All"), Some(FilterMode::ShowAll));
        assert_eq!(FilterMode::parse(""), Some(FilterMode::Unset));
        assert_eq!(FilterMode::parse("show all"), None);
    }

    #[test]
    fn all_status_sentinels_disable_status_filter() {
        let mut config = FilterSortConfig::default();
        assert!(config.selected_status().is_none());

        for sentinel in ALL_STATUSES {
            config.status_filter = sentinel.to_string();
            assert!(config.selected_status().is_none());
        }

        config.status_filter = "Posted".to_string();
        assert_eq!(config.selected_status(), Some("Posted"));
    }

    #[test]
    fn config_deserializes_camel_case_client_state() {
        let config: FilterSortConfig = serde_json::from_str(
            r#"{"searchQuery":"alp","filterMode":"Custom","dateRange":{"start":"2024-01-02","end":null},"sortOrder":"asc"}"#,
        )
        .expect("config parses");

        assert_eq!(config.search_query, "alp");
        assert_eq!(config.filter_mode, FilterMode::Custom);
        assert!(config.date_range.start.is_some());
        assert!(config.date_range.end.is_none());
        assert_eq!(config.sort_order, SortOrder::Asc);
        assert!(config.status_filter.is_empty());
    }

    #[test]
    fn config_treats_null_status_filter_as_cleared() {
        let config: FilterSortConfig =
            serde_json::from_str(r#"{"statusFilter":null,"sortOrder":"asc"}"#)
                .expect("config parses");

        assert!(config.status_filter.is_empty());
        assert!(config.selected_status().is_none());
        assert_eq!(config.sort_order, SortOrder::Asc);
    }

    #[test]
    fn config_rejects_unparseable_range_bounds() {
        let result = serde_json::from_str::<FilterSortConfig>(
            r#"{"date_range":{"start":"soon","end":"2024-01-03"}}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn reconcile_clears_status_filter_only_when_requested() {
        let mut config = FilterSortConfig {
            status_filter: "Rejected".to_string(),
            ..FilterSortConfig::default()
        };

        config.reconcile(&ProcessedSubmissions {
            results: Vec::new(),
            status_filter_reset: false,
        });
        assert_eq!(config.status_filter, "Rejected");

        config.reconcile(&ProcessedSubmissions {
            results: Vec::new(),
            status_filter_reset: true,
        });
        assert!(config.status_filter.is_empty());
    }
}
