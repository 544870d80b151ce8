//! Typed client for the backend API.
//!
//! `ApiClient` knows the endpoints and their payloads; the bytes travel through an
//! `HttpTransport` supplied by the platform. Authenticated requests read the bearer
//! token from `SessionStorage` at send time, so a login or logout is picked up by
//! the next call without rebuilding the client.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::fmt;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::model::dashboard::{DashboardRow, PdfSource};
use crate::model::field::{FieldDescriptor, FormDraft};
use crate::model::submission::Submission;
use crate::model::template::Template;
use crate::model::user::User;
use crate::requests::{
    DashboardList, FieldsResponse, TemplateList, TemplateUpload, TokenRequest, TokenResponse,
};
use crate::storage::SessionStorage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    /// `application/x-www-form-urlencoded` pairs.
    Form(Vec<(String, String)>),
    /// `multipart/form-data` with a single file part.
    File {
        field: String,
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: String,
    pub bearer: Option<String>,
    pub body: RequestBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<R: DeserializeOwned>(&self) -> Result<R, ApiError> {
        serde_json::from_slice(&self.body).map_err(|err| ApiError::Decode(err.to_string()))
    }
}

/// Moves a request over the wire. Network failures map to `ApiError::Transport`;
/// non-2xx statuses are returned as ordinary responses.
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

enum Auth<'a> {
    None,
    Stored,
    Token(&'a str),
}

#[derive(Clone)]
pub struct ApiClient<T, S> {
    transport: T,
    storage: S,
    config: ClientConfig,
}

impl<T: HttpTransport, S: SessionStorage> ApiClient<T, S> {
    pub fn new(transport: T, storage: S, config: ClientConfig) -> Self {
        Self {
            transport,
            storage,
            config,
        }
    }

    /// API paths are joined to the base URL; absolute URLs pass through.
    fn resolve(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            self.config.url(path)
        }
    }

    async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        body: RequestBody,
        auth: Auth<'_>,
    ) -> Result<ApiResponse, ApiError> {
        let bearer = match auth {
            Auth::None => None,
            Auth::Stored => self.storage.load_token(),
            Auth::Token(token) => Some(token.to_string()),
        };
        let request = ApiRequest {
            method,
            url: self.resolve(path),
            bearer,
            body,
        };
        log::debug!("{} {}", request.method, request.url);

        let response = self.transport.send(request).await.map_err(|err| {
            log::warn!("{method} {path} failed: {err}");
            err
        })?;
        if response.is_success() {
            Ok(response)
        } else {
            let err = ApiError::from_status(response.status, &response.body);
            log::warn!("{method} {path} failed: {err}");
            Err(err)
        }
    }

    async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.execute(HttpMethod::Get, path, RequestBody::Empty, Auth::Stored)
            .await?
            .json()
    }

    /// `POST /api/token`: exchanges credentials for a bearer token.
    pub async fn request_token(&self, credentials: &TokenRequest) -> Result<TokenResponse, ApiError> {
        self.execute(
            HttpMethod::Post,
            "/api/token",
            RequestBody::Form(credentials.form_pairs()),
            Auth::None,
        )
        .await?
        .json()
    }

    /// `GET /api/users/me` with the stored token.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.get_json("/api/users/me").await
    }

    /// `GET /api/users/me` with a token that has not been persisted yet.
    pub async fn current_user_with_token(&self, token: &str) -> Result<User, ApiError> {
        self.execute(
            HttpMethod::Get,
            "/api/users/me",
            RequestBody::Empty,
            Auth::Token(token),
        )
        .await?
        .json()
    }

    /// `GET /api/templates`: templates owned by the signed-in agent.
    pub async fn list_templates(&self) -> Result<Vec<Template>, ApiError> {
        self.get_json::<TemplateList>("/api/templates")
            .await
            .map(Into::into)
    }

    /// `POST /api/templates` with the PDF as the `file` multipart part.
    pub async fn upload_template(&self, upload: TemplateUpload) -> Result<(), ApiError> {
        let body = RequestBody::File {
            field: "file".to_string(),
            file_name: upload.file_name,
            content_type: "application/pdf".to_string(),
            bytes: upload.bytes,
        };
        self.execute(HttpMethod::Post, "/api/templates", body, Auth::Stored)
            .await
            .map(|_| ())
    }

    /// `DELETE /api/templates/{id}`.
    pub async fn delete_template(&self, template_id: &str) -> Result<(), ApiError> {
        let path = format!("/api/templates/{}", encode_segment(template_id));
        self.execute(HttpMethod::Delete, &path, RequestBody::Empty, Auth::Stored)
            .await
            .map(|_| ())
    }

    /// `GET /api/templates/available`: every template a buyer may fill.
    pub async fn available_templates(&self) -> Result<Vec<Template>, ApiError> {
        self.get_json::<TemplateList>("/api/templates/available")
            .await
            .map(Into::into)
    }

    /// `GET /api/templates/{key}/fields`. A missing `fields` list reads as empty.
    pub async fn template_fields(&self, form_key: &str) -> Result<Vec<FieldDescriptor>, ApiError> {
        let path = format!("/api/templates/{}/fields", encode_segment(form_key));
        let response: FieldsResponse = self.get_json(&path).await?;
        Ok(response.fields.unwrap_or_default())
    }

    /// `POST /api/templates/{key}/submissions` with the draft as a flat JSON object.
    pub async fn submit_form(&self, form_key: &str, draft: &FormDraft) -> Result<(), ApiError> {
        let path = format!("/api/templates/{}/submissions", encode_segment(form_key));
        let body = serde_json::to_value(draft).map_err(|err| ApiError::Decode(err.to_string()))?;
        self.execute(HttpMethod::Post, &path, RequestBody::Json(body), Auth::Stored)
            .await
            .map(|_| ())
    }

    /// `GET /api/submissions`: the signed-in buyer's submissions.
    pub async fn list_submissions(&self) -> Result<Vec<Submission>, ApiError> {
        self.get_json("/api/submissions").await
    }

    /// `GET /api/submissions/{key}/download`: raw PDF bytes.
    pub async fn download_submission(&self, key: &str) -> Result<Vec<u8>, ApiError> {
        let path = format!("/api/submissions/{}/download", encode_segment(key));
        self.execute(HttpMethod::Get, &path, RequestBody::Empty, Auth::Stored)
            .await
            .map(|response| response.body)
    }

    /// Raw PDF bytes of a dashboard row's latest submission.
    pub async fn download_pdf(&self, source: &PdfSource) -> Result<Vec<u8>, ApiError> {
        match source {
            PdfSource::Submission(key) => self.download_submission(key).await,
            PdfSource::Url(url) => self
                .execute(HttpMethod::Get, url, RequestBody::Empty, Auth::Stored)
                .await
                .map(|response| response.body),
        }
    }

    /// `GET /api/dashboard`: admin overview.
    pub async fn dashboard(&self) -> Result<Vec<DashboardRow>, ApiError> {
        self.get_json::<DashboardList>("/api/dashboard")
            .await
            .map(Into::into)
    }
}

/// Percent-encodes a value for use as a single path segment.
pub fn encode_segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}
