//! Shared test fixtures and helpers.

#![allow(dead_code)]

use chrono::{Duration, Utc};
use std::cell::Cell;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use project_context::auth::AuthError;
use project_context::auth::flow::AuthorizationFlow;
use project_context::auth::secrets::ClientSecret;
use project_context::auth::token::Token;

pub const DRIVE_SCOPE: &str = "https://www.googleapis.com/auth/drive";

/// Create a temporary config root with the profiles/ layout.
pub fn temp_root() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let root = tmp.path().join("project_context");
    std::fs::create_dir_all(root.join("profiles")).unwrap();
    (tmp, root)
}

/// Write a desktop-app client_secrets.json pointing at `token_uri`.
pub fn write_client_secrets(path: &Path, token_uri: &str) {
    let content = format!(
        r#"{{"installed": {{
    "client_id": "test-client.apps.googleusercontent.com",
    "project_id": "test-project",
    "auth_uri": "https://accounts.google.com/o/oauth2/auth",
    "token_uri": "{token_uri}",
    "client_secret": "test-secret",
    "redirect_uris": ["http://localhost"]
}}}}"#,
        token_uri = token_uri,
    );
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

/// A token as the authorization server would have issued it.
pub fn sample_token(token_uri: &str, expires_in_secs: i64) -> Token {
    Token {
        token: "ya29.stored".to_string(),
        refresh_token: Some("1//stored-refresh".to_string()),
        token_uri: token_uri.to_string(),
        client_id: "test-client.apps.googleusercontent.com".to_string(),
        client_secret: "test-secret".to_string(),
        scopes: vec![DRIVE_SCOPE.to_string()],
        expiry: Some(Utc::now() + Duration::seconds(expires_in_secs)),
    }
}

/// Stand-in for the browser flow: counts calls and either grants or denies.
pub struct FakeFlow {
    pub calls: Cell<usize>,
    pub deny: bool,
}

impl FakeFlow {
    pub fn granting() -> Self {
        Self {
            calls: Cell::new(0),
            deny: false,
        }
    }

    pub fn denying() -> Self {
        Self {
            calls: Cell::new(0),
            deny: true,
        }
    }
}

impl AuthorizationFlow for FakeFlow {
    fn authorize(&self, secret: &ClientSecret, scopes: &[String]) -> Result<Token, AuthError> {
        self.calls.set(self.calls.get() + 1);
        if self.deny {
            return Err(AuthError::Authorization(
                "consent was not granted: access_denied".to_string(),
            ));
        }
        Ok(Token {
            token: "ya29.from-browser".to_string(),
            refresh_token: Some("1//from-browser".to_string()),
            token_uri: secret.token_uri.clone(),
            client_id: secret.client_id.clone(),
            client_secret: secret.client_secret.clone(),
            scopes: scopes.to_vec(),
            expiry: Some(Utc::now() + Duration::hours(1)),
        })
    }
}
