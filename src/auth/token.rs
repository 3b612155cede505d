//! Persisted OAuth token (token.json).
//!
//! Uses Google's "authorized user" layout, so token files written by
//! google-auth based tools load as-is.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::warn;

use super::AuthError;
use super::secrets::default_token_uri;
use crate::util;

/// Treat a token as expired this many seconds before its actual expiry.
const EXPIRY_SKEW_SECS: i64 = 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Access token.
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
}

impl Token {
    /// Read a token file. `Ok(None)` if it does not exist.
    pub fn read(path: &Path) -> Result<Option<Token>, AuthError> {
        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let token: Token = serde_json::from_slice(&data).map_err(|e| AuthError::CorruptToken {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        if token.token.is_empty() && token.refresh_token.is_none() {
            return Err(AuthError::CorruptToken {
                path: path.to_path_buf(),
                reason: "no access or refresh token".to_string(),
            });
        }
        Ok(Some(token))
    }

    /// Like [`Token::read`], but an unreadable or corrupted file counts as absent.
    pub fn load(path: &Path) -> Option<Token> {
        match Self::read(path) {
            Ok(token) => token,
            Err(e) => {
                warn!("{}; ignoring stored token", e);
                None
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), AuthError> {
        let data = serde_json::to_vec_pretty(self).map_err(std::io::Error::other)?;
        util::write_private(path, &data)?;
        Ok(())
    }

    /// A token without an access string is unusable and counts as expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        if self.token.is_empty() {
            return true;
        }
        match self.expiry {
            Some(expiry) => expiry - Duration::seconds(EXPIRY_SKEW_SECS) <= now,
            None => false,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Whether the token was granted every scope in `required`.
    ///
    /// Tokens that record no scopes are assumed to cover the request.
    pub fn has_scopes(&self, required: &[String]) -> bool {
        self.scopes.is_empty() || required.iter().all(|s| self.scopes.contains(s))
    }

    pub fn can_refresh(&self) -> bool {
        self.refresh_token.as_deref().is_some_and(|r| !r.is_empty()) && !self.client_id.is_empty()
    }

    pub fn state(&self) -> TokenState {
        if self.is_expired() {
            TokenState::Expired {
                refreshable: self.can_refresh(),
            }
        } else {
            TokenState::Valid {
                expiry: self.expiry,
            }
        }
    }
}

/// Session state of a token file, as reported by `auth status`.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenState {
    Missing,
    Corrupted(String),
    Valid { expiry: Option<DateTime<Utc>> },
    Expired { refreshable: bool },
}

impl TokenState {
    /// Inspect a token file without touching the network.
    pub fn of_file(path: &Path) -> Self {
        match Token::read(path) {
            Ok(Some(token)) => token.state(),
            Ok(None) => TokenState::Missing,
            Err(e) => TokenState::Corrupted(e.to_string()),
        }
    }

    pub fn needs_login(&self) -> bool {
        matches!(
            self,
            TokenState::Missing
                | TokenState::Corrupted(_)
                | TokenState::Expired { refreshable: false }
        )
    }
}

impl fmt::Display for TokenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenState::Missing => write!(f, "inactive (login required)"),
            TokenState::Corrupted(_) => write!(f, "corrupted token (login required)"),
            TokenState::Valid { expiry: Some(at) } => {
                write!(f, "active (expires {})", at.format("%Y-%m-%d %H:%M:%S UTC"))
            }
            TokenState::Valid { expiry: None } => write!(f, "active"),
            TokenState::Expired { refreshable: true } => {
                write!(f, "expired (refreshed on next use)")
            }
            TokenState::Expired { refreshable: false } => write!(f, "expired (login required)"),
        }
    }
}
