use serde::Deserialize;

/// Failure of a call against the backend API.
///
/// Every variant is caught by the view that issued the request and turned into an
/// inline message; nothing here is meant to reach a global handler.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Transport(String),
    /// HTTP 401. Callers invalidate the session when they see this.
    #[error("unauthorized{}", detail_suffix(.detail))]
    Unauthorized { detail: Option<String> },
    /// Any other non-2xx response.
    #[error("request failed with status {status}{}", detail_suffix(.detail))]
    Status { status: u16, detail: Option<String> },
    /// The body could not be decoded into the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Builds the error for a non-2xx response, pulling `detail` out of a
    /// FastAPI-style `{"detail": "..."}` body when there is one.
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        let detail = extract_detail(body);
        if status == 401 {
            ApiError::Unauthorized { detail }
        } else {
            ApiError::Status { status, detail }
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { detail } | ApiError::Status { detail, .. } => {
                detail.as_deref()
            }
            ApiError::Transport(_) | ApiError::Decode(_) => None,
        }
    }

    /// Message to show the user: the server's detail when present, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail()
            .map(ToString::to_string)
            .unwrap_or_else(|| fallback.to_string())
    }
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_ref()
        .map(|d| format!(": {d}"))
        .unwrap_or_default()
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

fn extract_detail(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    match parsed.detail {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s),
        serde_json::Value::Null | serde_json::Value::String(_) => None,
        // FastAPI validation errors come back as a list of objects
        other => Some(other.to_string()),
    }
}

/// Failure of the persisted session storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("failed to write `{key}` to storage")]
    Write { key: String },
    #[error("stored value for `{key}` is corrupt: {reason}")]
    Corrupt { key: String, reason: String },
}
