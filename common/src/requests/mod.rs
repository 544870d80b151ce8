//! Request payloads and response envelopes of the backend API.

use serde::Deserialize;

use crate::error::ApiError;
use crate::model::dashboard::DashboardRow;
use crate::model::field::FieldDescriptor;
use crate::model::template::Template;

/// Form-encoded body of `POST /api/token`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

impl TokenRequest {
    pub fn form_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("username".to_string(), self.username.clone()),
            ("password".to_string(), self.password.clone()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Body of `GET /api/templates/{key}/fields`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldsResponse {
    #[serde(default)]
    pub fields: Option<Vec<FieldDescriptor>>,
}

/// Template lists come back either bare or as `{"templates": [...]}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TemplateList {
    Bare(Vec<Template>),
    Wrapped { templates: Vec<Template> },
}

impl From<TemplateList> for Vec<Template> {
    fn from(list: TemplateList) -> Self {
        match list {
            TemplateList::Bare(items) | TemplateList::Wrapped { templates: items } => items,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardData {
    pub templates: Vec<DashboardRow>,
}

/// Admin overview comes back bare or as `{"data": {"templates": [...]}}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DashboardList {
    Bare(Vec<DashboardRow>),
    Wrapped { data: DashboardData },
}

impl From<DashboardList> for Vec<DashboardRow> {
    fn from(list: DashboardList) -> Self {
        match list {
            DashboardList::Bare(rows) => rows,
            DashboardList::Wrapped { data } => data.templates,
        }
    }
}

/// Multipart upload of a template PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl TemplateUpload {
    /// Accepts a file when either its MIME type or its extension says PDF.
    pub fn is_pdf(content_type: &str, file_name: &str) -> bool {
        content_type.eq_ignore_ascii_case("application/pdf")
            || file_name.to_ascii_lowercase().ends_with(".pdf")
    }

    pub fn success_message(&self) -> String {
        format!("Template '{}' created successfully!", self.file_name)
    }
}

pub const UPLOAD_FALLBACK_ERROR: &str = "An error occurred.";

pub fn upload_error_message(err: &ApiError) -> String {
    format!("Error: {}", err.user_message(UPLOAD_FALLBACK_ERROR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_list_shapes() {
        let wrapped: TemplateList = serde_json::from_str(
            r#"{"templates":[{"id":"template1","title":"Test Template","created_at":"2024-01-01","updated_at":"2024-01-01"}]}"#,
        )
        .unwrap();
        assert_eq!(Vec::<Template>::from(wrapped).len(), 1);

        let bare: TemplateList = serde_json::from_str("[]").unwrap();
        assert!(Vec::<Template>::from(bare).is_empty());
    }

    #[test]
    fn dashboard_shapes() {
        let wrapped: DashboardList = serde_json::from_str(
            r#"{"data":{"templates":[{"template":{"id":"template1","title":"Test Template"},
                "owner":{"email":"agent@test.io"},"latest_submission":null}]}}"#,
        )
        .unwrap();
        let rows: Vec<DashboardRow> = wrapped.into();
        assert_eq!(rows[0].owner.email, "agent@test.io");
    }

    #[test]
    fn fields_response_tolerates_missing_list() {
        let resp: FieldsResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.fields.is_none());
    }

    #[test]
    fn upload_accepts_pdf_by_type_or_extension() {
        assert!(TemplateUpload::is_pdf("application/pdf", "contract"));
        assert!(TemplateUpload::is_pdf("", "Contract.PDF"));
        assert!(!TemplateUpload::is_pdf("image/png", "scan.png"));
    }

    #[test]
    fn upload_messages() {
        let upload = TemplateUpload {
            file_name: "lease.pdf".into(),
            bytes: vec![],
        };
        assert_eq!(upload.success_message(), "Template 'lease.pdf' created successfully!");
        assert_eq!(
            upload_error_message(&ApiError::Status {
                status: 400,
                detail: Some("File is not a PDF".into())
            }),
            "Error: File is not a PDF"
        );
        assert_eq!(
            upload_error_message(&ApiError::Transport("offline".into())),
            "Error: An error occurred."
        );
    }
}
