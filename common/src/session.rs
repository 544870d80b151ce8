//! Auth session store.
//!
//! Lifecycle: `restore` from storage → (if a token was found) validate it against
//! `/api/users/me` → `establish` on login → `logout`. The store is the only owner of
//! the persisted token and identity; the API client only reads the token.
//!
//! The async steps (`authenticate`, `validate`) are free functions so a UI can run
//! them on a spawned task and hand the result back to the store through
//! `establish` or `complete_validation`. The store is never borrowed across an await.

use crate::api::{ApiClient, HttpTransport};
use crate::error::ApiError;
use crate::model::user::User;
use crate::requests::TokenRequest;
use crate::storage::SessionStorage;

pub const LOGIN_FAILED_MESSAGE: &str = "Failed to log in. Please check your credentials.";

/// Token plus the identity it resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub user: User,
}

/// Read-only view of the session handed to components.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    pub user: Option<User>,
    pub is_loading: bool,
}

impl SessionSnapshot {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

pub struct AuthSession<S> {
    storage: S,
    token: Option<String>,
    user: Option<User>,
    validating: bool,
}

impl<S: SessionStorage> AuthSession<S> {
    /// Loads token and cached identity. A cached identity without a token is discarded.
    pub fn restore(storage: S) -> Self {
        let token = storage.load_token();
        let user = match token {
            Some(_) => storage.load_user().unwrap_or_else(|err| {
                log::warn!("dropping cached identity: {err}");
                None
            }),
            None => None,
        };
        let validating = token.is_some();
        Self {
            storage,
            token,
            user,
            validating,
        }
    }

    /// Whether a persisted token still has to be checked against the backend.
    pub fn needs_validation(&self) -> bool {
        self.validating
    }

    /// Applies the outcome of [`validate`]. Any failure clears the session.
    pub fn complete_validation(&mut self, result: Result<User, ApiError>) {
        self.validating = false;
        match result {
            Ok(user) => {
                if let Err(err) = self.storage.persist_user(&user) {
                    log::warn!("could not cache identity: {err}");
                }
                self.user = Some(user);
            }
            Err(err) => {
                log::warn!("session expired or token is invalid: {err}");
                self.logout();
            }
        }
    }

    /// Stores a fresh login. The in-memory session is kept even if persisting fails.
    pub fn establish(&mut self, credentials: Credentials) {
        if let Err(err) = self
            .storage
            .persist_session(&credentials.token, &credentials.user)
        {
            log::warn!("could not persist session: {err}");
        }
        log::info!("signed in as {} ({})", credentials.user.email, credentials.user.role);
        self.token = Some(credentials.token);
        self.user = Some(credentials.user);
        self.validating = false;
    }

    pub fn logout(&mut self) {
        if let Err(err) = self.storage.clear_session() {
            log::warn!("could not clear stored session: {err}");
        }
        self.token = None;
        self.user = None;
        self.validating = false;
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.validating
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            user: self.user.clone(),
            is_loading: self.validating,
        }
    }
}

/// Exchanges credentials for a token and resolves the identity behind it.
///
/// Nothing is persisted here: a token whose identity cannot be fetched never
/// reaches storage.
pub async fn authenticate<T: HttpTransport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    email: &str,
    password: &str,
) -> Result<Credentials, ApiError> {
    let request = TokenRequest {
        username: email.trim().to_string(),
        password: password.to_string(),
    };
    let token = api.request_token(&request).await?.access_token;
    let user = api.current_user_with_token(&token).await?;
    Ok(Credentials { token, user })
}

/// Maps a login attempt to the credentials to establish or the message the
/// login form shows. The reason is logged, never shown.
pub fn login_outcome(result: Result<Credentials, ApiError>) -> Result<Credentials, &'static str> {
    result.map_err(|err| {
        log::warn!("login failed: {err}");
        LOGIN_FAILED_MESSAGE
    })
}

/// Resolves the identity of the stored token.
pub async fn validate<T: HttpTransport, S: SessionStorage>(
    api: &ApiClient<T, S>,
) -> Result<User, ApiError> {
    api.current_user().await
}
