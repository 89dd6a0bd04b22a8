use super::super::domain::{Submission, SubmissionId};
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) fn parse_csv<R: Read>(reader: R) -> Result<Vec<Submission>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut submissions = Vec::new();

    for record in csv_reader.deserialize::<SubmissionRow>() {
        submissions.push(record?.into_submission());
    }

    Ok(submissions)
}

pub(crate) fn parse_json<R: Read>(reader: R) -> Result<Vec<Submission>, serde_json::Error> {
    serde_json::from_reader(reader)
}

#[derive(Debug, Deserialize)]
struct SubmissionRow {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    approval_status: Option<String>,
    #[serde(default)]
    created_at: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    google_doc_link: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    loom_url: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    trope: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    structure: Option<String>,
}

impl SubmissionRow {
    fn into_submission(self) -> Submission {
        Submission {
            id: SubmissionId(self.id),
            title: self.title,
            approval_status: self.approval_status,
            created_at: self.created_at,
            google_doc_link: self.google_doc_link,
            loom_url: self.loom_url,
            trope: self.trope,
            structure: self.structure,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
