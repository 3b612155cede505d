//! Credential bootstrap: reuse, refresh, or (re)authorize, then persist.

use std::path::PathBuf;
use tracing::{info, warn};

use super::AuthError;
use super::client::OAuthClient;
use super::flow::AuthorizationFlow;
use super::secrets::ClientSecret;
use super::token::Token;

/// Fixed file locations for one profile.
#[derive(Debug, Clone)]
pub struct CredentialPaths {
    pub token: PathBuf,
    pub client_secrets: PathBuf,
}

/// How the returned token was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Stored,
    Refreshed,
    Authorized,
}

pub struct Bootstrapper<F> {
    paths: CredentialPaths,
    scopes: Vec<String>,
    flow: F,
    client: OAuthClient,
}

impl<F: AuthorizationFlow> Bootstrapper<F> {
    pub fn new(paths: CredentialPaths, scopes: Vec<String>, flow: F) -> Self {
        Self {
            paths,
            scopes,
            flow,
            client: OAuthClient::new(),
        }
    }

    pub fn paths(&self) -> &CredentialPaths {
        &self.paths
    }

    pub fn flow(&self) -> &F {
        &self.flow
    }

    /// Return a usable token, running the authorization flow only when the
    /// stored token is missing, corrupted, under-scoped, or unrefreshable.
    pub fn credentials(&self) -> Result<Token, AuthError> {
        self.run().map(|(token, _)| token)
    }

    pub fn run(&self) -> Result<(Token, Outcome), AuthError> {
        if let Some(dir) = self.paths.token.parent() {
            std::fs::create_dir_all(dir)?;
        }

        if let Some(token) = Token::load(&self.paths.token) {
            if !token.has_scopes(&self.scopes) {
                info!("stored token lacks the requested scopes; re-authorizing");
            } else if !token.is_expired() {
                return Ok((token, Outcome::Stored));
            } else if token.can_refresh() {
                match self.client.refresh(&token) {
                    Ok(fresh) => {
                        fresh.save(&self.paths.token)?;
                        info!("refreshed credentials saved to {}", self.paths.token.display());
                        return Ok((fresh, Outcome::Refreshed));
                    }
                    Err(e) => warn!("{}; re-authorization required", e),
                }
            } else {
                info!("stored token expired and cannot be refreshed");
            }
        }

        let secret = ClientSecret::load(&self.paths.client_secrets)?;
        info!("starting authorization flow for client {}", secret.client_id);
        let token = self.flow.authorize(&secret, &self.scopes)?;
        token.save(&self.paths.token)?;
        info!("credentials saved to {}", self.paths.token.display());
        Ok((token, Outcome::Authorized))
    }
}
