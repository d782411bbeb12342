//! On-disk token store used by the command line tool
//! (`~/.config/feedly/credentials.toml`).
//!
//! The library never touches this file; callers load it and hand the access
//! token to [`Session::activate`](crate::auth::Session::activate).
use crate::models::AccessTokenResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("Failed to access credentials file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid credentials file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize credentials: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Tokens persisted between runs.
///
/// SEC-015: Custom Debug impl masks both tokens.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredCredentials {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for StoredCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredCredentials")
            .field("access_token", &"[REDACTED]")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("user_id", &self.user_id)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl StoredCredentials {
    /// Build from a token response issued at `now`.
    ///
    /// Refresh responses carry no refresh token, so `previous_refresh_token`
    /// is kept when the response has none.
    pub fn from_token_response(
        response: &AccessTokenResponse,
        previous_refresh_token: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let expires_at = chrono::Duration::from_std(response.expires_in)
            .ok()
            .filter(|d| !d.is_zero())
            .and_then(|d| now.checked_add_signed(d));
        Self {
            access_token: response.access_token.clone(),
            refresh_token: response.refresh_token.clone().or(previous_refresh_token),
            user_id: response.user_id.clone(),
            expires_at,
        }
    }

    /// True once `expires_at` has passed. Unknown expiry counts as valid.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }

    /// Load credentials. A missing file is `Ok(None)`.
    pub fn load(path: &Path) -> Result<Option<Self>, CredentialsError> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No stored credentials");
                return Ok(None);
            }
            Err(e) => return Err(CredentialsError::Io(e)),
        };
        Ok(Some(toml::from_str(&content)?))
    }

    /// Write credentials atomically, readable by the owner only.
    pub fn save(&self, path: &Path) -> Result<(), CredentialsError> {
        let content = toml::to_string(self)?;

        // SEC-009: Randomized temp filename to prevent TOCTOU race conditions
        use std::time::{SystemTime, UNIX_EPOCH};
        let random_suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let temp_path = path.with_extension(format!("tmp.{:016x}", random_suffix));

        let mut options = std::fs::OpenOptions::new();
        // Fails atomically if the file exists (prevents symlink race)
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&temp_path)?;

        let written = file
            .write_all(content.as_bytes())
            .and_then(|()| file.sync_all());
        if let Err(e) = written {
            let _ = std::fs::remove_file(&temp_path);
            return Err(CredentialsError::Io(e));
        }
        drop(file);

        #[cfg(windows)]
        if path.exists() {
            std::fs::remove_file(path)?;
        }

        if let Err(e) = std::fs::rename(&temp_path, path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(CredentialsError::Io(e));
        }
        tracing::debug!(path = %path.display(), "Saved credentials");
        Ok(())
    }

    /// Remove the file; missing is fine.
    pub fn clear(path: &Path) -> Result<(), CredentialsError> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CredentialsError::Io(e)),
        }
    }
}
