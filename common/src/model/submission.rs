use serde::{Deserialize, Serialize};

use super::record_id::RecordId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRef {
    #[serde(default)]
    pub id: Option<RecordId>,
    pub title: String,
}

/// A completed form, as listed by `GET /api/submissions`.
///
/// The backend has shipped two shapes over time (`template.title` vs
/// `template_title`, `filled_pdf_url` vs `pdf_url`); both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub id: RecordId,
    #[serde(default)]
    pub template_id: Option<RecordId>,
    #[serde(default)]
    pub template: Option<TemplateRef>,
    #[serde(default)]
    pub template_title: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub anvil_submission_eid: Option<String>,
    #[serde(default, alias = "pdf_url")]
    pub filled_pdf_url: Option<String>,
}

impl Submission {
    pub fn title(&self) -> &str {
        self.template
            .as_ref()
            .map(|t| t.title.as_str())
            .or(self.template_title.as_deref())
            .unwrap_or("Untitled form")
    }

    /// Whether a filled PDF exists for this submission.
    pub fn has_pdf(&self) -> bool {
        self.filled_pdf_url
            .as_deref()
            .is_some_and(|url| !url.is_empty())
    }

    /// Key used in `/api/submissions/{key}/download`.
    pub fn download_key(&self) -> String {
        self.anvil_submission_eid
            .clone()
            .unwrap_or_else(|| self.id.to_string())
    }
}
