//! Persisted session storage.
//!
//! The browser implementation wraps `window.localStorage`; tests use an in-memory
//! map. Only the session store and the API client's token lookup touch it.

use crate::error::StorageError;
use crate::model::user::User;

/// Key holding the bearer token.
pub const TOKEN_KEY: &str = "accessToken";
/// Key holding the JSON-encoded identity of the signed-in user.
pub const USER_KEY: &str = "user";

pub trait SessionStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;

    fn load_token(&self) -> Option<String> {
        match self.get_item(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(err) => {
                log::warn!("could not read stored token: {err}");
                None
            }
        }
    }

    fn load_user(&self) -> Result<Option<User>, StorageError> {
        let Some(raw) = self.get_item(USER_KEY)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|err| StorageError::Corrupt {
                key: USER_KEY.to_string(),
                reason: err.to_string(),
            })
    }

    fn persist_session(&self, token: &str, user: &User) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(user).map_err(|err| StorageError::Corrupt {
            key: USER_KEY.to_string(),
            reason: err.to_string(),
        })?;
        self.set_item(TOKEN_KEY, token)?;
        self.set_item(USER_KEY, &encoded)
    }

    fn persist_user(&self, user: &User) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(user).map_err(|err| StorageError::Corrupt {
            key: USER_KEY.to_string(),
            reason: err.to_string(),
        })?;
        self.set_item(USER_KEY, &encoded)
    }

    /// Removes token and identity. Both removals are attempted even if the first fails.
    fn clear_session(&self) -> Result<(), StorageError> {
        let token = self.remove_item(TOKEN_KEY);
        let user = self.remove_item(USER_KEY);
        token.and(user)
    }
}
