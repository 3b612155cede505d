//! Google OAuth: client secrets, persisted tokens, and the bootstrap that
//! turns them into a usable access token.

pub mod bootstrap;
pub mod client;
pub mod flow;
pub mod login;
pub mod logout;
pub mod pkce;
pub mod secrets;
pub mod status;
pub mod token;

use anyhow::Result;
use std::path::PathBuf;
use thiserror::Error;

use crate::profile::ProfileManager;

use self::bootstrap::{Bootstrapper, CredentialPaths};
use self::client::OAuthClient;
use self::flow::LoopbackFlow;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Missing or unusable client secret. The user has to fix the file.
    #[error("{reason}: {}", path.display())]
    Configuration { path: PathBuf, reason: String },

    /// Network failure, denied consent, or a rejected grant.
    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Corrupted token file {}: {reason}", path.display())]
    CorruptToken { path: PathBuf, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AuthError {
    pub fn missing_client_secret(path: impl Into<PathBuf>) -> Self {
        AuthError::Configuration {
            path: path.into(),
            reason: "Client secret file not found. Download it from Google Cloud Console \
                     (Credentials → your Desktop app → Download JSON) and save it as"
                .to_string(),
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, AuthError::Configuration { .. })
    }

    pub fn is_authorization(&self) -> bool {
        matches!(self, AuthError::Authorization(_))
    }
}

/// Build the bootstrapper for the active profile from config.toml settings.
pub fn bootstrapper_for(manager: &ProfileManager) -> Result<Bootstrapper<LoopbackFlow>> {
    let config = manager.config();
    let (client_secrets, source) = manager.resolve_secrets_file()?;
    tracing::debug!(
        "profile '{}' uses {} client secret {}",
        manager.active_profile_name(),
        source,
        client_secrets.display()
    );
    let paths = CredentialPaths {
        token: manager.token_file()?,
        client_secrets,
    };
    let flow = LoopbackFlow::new(OAuthClient::new(), &config.oauth);
    Ok(Bootstrapper::new(paths, config.oauth.scopes.clone(), flow))
}
