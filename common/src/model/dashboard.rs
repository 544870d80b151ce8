use serde::{Deserialize, Serialize};

use super::record_id::RecordId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardTemplate {
    pub id: RecordId,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardOwner {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestSubmission {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub filled_pdf_url: Option<String>,
    #[serde(default)]
    pub anvil_submission_eid: Option<String>,
}

/// One row of the admin overview: a template, who owns it, and its newest submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardRow {
    pub template: DashboardTemplate,
    pub owner: DashboardOwner,
    #[serde(default)]
    pub latest_submission: Option<LatestSubmission>,
}

/// Where the PDF of a row's latest submission can be fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PdfSource {
    /// Key for `/api/submissions/{key}/download`.
    Submission(String),
    /// The stored `filled_pdf_url`, absolute or relative to the API base.
    Url(String),
}

impl PdfSource {
    /// Name the downloaded file is saved under.
    pub fn file_name(&self) -> String {
        match self {
            PdfSource::Submission(key) => format!("{key}.pdf"),
            PdfSource::Url(url) => {
                let last = url
                    .split(['?', '#'])
                    .next()
                    .and_then(|path| path.rsplit('/').next())
                    .filter(|name| !name.is_empty())
                    .unwrap_or("submission.pdf");
                if last.to_ascii_lowercase().ends_with(".pdf") {
                    last.to_string()
                } else {
                    format!("{last}.pdf")
                }
            }
        }
    }

    /// Stable identity used to track an in-flight download.
    pub fn key(&self) -> &str {
        match self {
            PdfSource::Submission(key) | PdfSource::Url(key) => key,
        }
    }
}

impl DashboardRow {
    /// PDF of the latest submission, if one was filled. Prefers the submission's
    /// download key and falls back to the stored URL.
    pub fn pdf_source(&self) -> Option<PdfSource> {
        let latest = self.latest_submission.as_ref()?;
        let url = latest.filled_pdf_url.as_deref().filter(|url| !url.is_empty())?;
        let key = latest
            .anvil_submission_eid
            .clone()
            .filter(|eid| !eid.is_empty())
            .or_else(|| latest.id.as_ref().map(ToString::to_string));
        Some(match key {
            Some(key) => PdfSource::Submission(key),
            None => PdfSource::Url(url.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(latest: &str) -> DashboardRow {
        serde_json::from_str(&format!(
            r#"{{"template":{{"id":"template1","title":"Test Template"}},
                "owner":{{"email":"agent@test.io"}},"latest_submission":{latest}}}"#
        ))
        .unwrap()
    }

    #[test]
    fn pdf_prefers_submission_eid() {
        let row = row(
            r#"{"id":5,"created_at":"2024-01-01","filled_pdf_url":"/test.pdf","anvil_submission_eid":"submission1"}"#,
        );
        assert_eq!(row.pdf_source(), Some(PdfSource::Submission("submission1".into())));
        assert_eq!(row.pdf_source().unwrap().file_name(), "submission1.pdf");
    }

    #[test]
    fn pdf_falls_back_to_submission_id() {
        let row = row(r#"{"id":5,"filled_pdf_url":"/test.pdf"}"#);
        assert_eq!(row.pdf_source(), Some(PdfSource::Submission("5".into())));
    }

    #[test]
    fn pdf_falls_back_to_stored_url() {
        let row = row(r#"{"created_at":"2024-01-01","filled_pdf_url":"/files/lease-7.pdf?sig=x"}"#);
        let source = row.pdf_source().unwrap();
        assert_eq!(source, PdfSource::Url("/files/lease-7.pdf?sig=x".into()));
        assert_eq!(source.file_name(), "lease-7.pdf");
    }

    #[test]
    fn no_pdf_without_filled_url() {
        assert_eq!(row("null").pdf_source(), None);
        assert_eq!(row(r#"{"id":5,"anvil_submission_eid":"e1"}"#).pdf_source(), None);
    }
}
