//! client_secrets.json as downloaded from Google Cloud Console.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::AuthError;

pub const GOOGLE_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";
pub const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientSecret {
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default = "default_auth_uri")]
    pub auth_uri: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default)]
    pub redirect_uris: Vec<String>,
}

fn default_auth_uri() -> String {
    GOOGLE_AUTH_URI.to_string()
}

pub(crate) fn default_token_uri() -> String {
    GOOGLE_TOKEN_URI.to_string()
}

/// Desktop clients are wrapped in `installed`, web clients in `web`.
#[derive(Deserialize)]
struct ClientSecretFile {
    installed: Option<ClientSecret>,
    web: Option<ClientSecret>,
}

impl ClientSecret {
    /// Read and validate a client secret file.
    pub fn load(path: &Path) -> Result<Self, AuthError> {
        if !path.exists() {
            return Err(AuthError::missing_client_secret(path));
        }
        let content = std::fs::read_to_string(path).map_err(|e| AuthError::Configuration {
            path: path.to_path_buf(),
            reason: format!("Cannot read client secret file ({})", e),
        })?;
        Self::parse(&content).map_err(|reason| AuthError::Configuration {
            path: path.to_path_buf(),
            reason: format!("Invalid client secret file ({})", reason),
        })
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        let file: ClientSecretFile = serde_json::from_str(content).map_err(|e| e.to_string())?;
        let secret = file
            .installed
            .or(file.web)
            .ok_or_else(|| "expected an \"installed\" or \"web\" client".to_string())?;
        if secret.client_id.trim().is_empty() {
            return Err("client_id is empty".to_string());
        }
        Ok(secret)
    }
}
