//! Staff login session and its on-disk persistence
//!
//! The session object is explicit state handed to the HTTP client; there
//! is no ambient global token. Persisting it lets the app restore the
//! login across restarts.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use shared::client::UserInfo;
use shared::LoginData;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Authenticated staff session
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Session {
    pub token: String,
    pub user: UserInfo,
    pub logged_in_at: DateTime<Utc>,
}

impl Session {
    /// Build a session from a successful login response
    pub fn from_login(data: LoginData) -> Self {
        Self {
            token: data.token,
            user: data.user,
            logged_in_at: Utc::now(),
        }
    }
}

/// File-backed session persistence
///
/// Stores the serialized session at `{dir}/auth/session.json`. A missing
/// or unreadable file simply means "not logged in".
pub struct SessionStore {
    file_path: PathBuf,
}

impl SessionStore {
    /// Create a store rooted at the given data directory
    pub fn new(data_dir: &Path) -> Self {
        Self {
            file_path: data_dir.join("auth/session.json"),
        }
    }

    /// Save the current session (called after login)
    pub fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.file_path, content)?;
        tracing::debug!(user = %session.user.email, "Session saved");
        Ok(())
    }

    /// Load the stored session, if any
    ///
    /// A corrupt file is cleared and treated as absent rather than
    /// surfaced as an error.
    pub fn load(&self) -> Result<Option<Session>, SessionStoreError> {
        if !self.file_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.file_path)?;
        match serde_json::from_str::<Session>(&content) {
            Ok(session) => {
                tracing::info!(user = %session.user.email, "Restored stored session");
                Ok(Some(session))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Stored session unreadable, clearing");
                let _ = std::fs::remove_file(&self.file_path);
                Ok(None)
            }
        }
    }

    /// Clear the stored session (called on logout)
    pub fn clear(&self) -> Result<(), SessionStoreError> {
        if self.file_path.exists() {
            std::fs::remove_file(&self.file_path)?;
            tracing::debug!("Stored session cleared");
        }
        Ok(())
    }

    /// Whether a stored session file exists
    pub fn exists(&self) -> bool {
        self.file_path.exists()
    }
}
