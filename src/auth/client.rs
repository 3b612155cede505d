//! Token endpoint calls: authorization-code exchange and refresh.

use chrono::{Duration, Utc};
use serde::Deserialize;
use std::time::Duration as StdDuration;
use tracing::{debug, info};

use super::AuthError;
use super::secrets::ClientSecret;
use super::token::Token;

const HTTP_TIMEOUT: StdDuration = StdDuration::from_secs(30);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    scope: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Client identity and endpoint a token is bound to.
struct Grantee<'a> {
    token_uri: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
}

pub struct OAuthClient {
    agent: ureq::Agent,
}

impl Default for OAuthClient {
    fn default() -> Self {
        Self::new()
    }
}

impl OAuthClient {
    pub fn new() -> Self {
        let agent = ureq::AgentBuilder::new().timeout(HTTP_TIMEOUT).build();
        Self { agent }
    }

    /// Exchange an authorization code (plus PKCE verifier) for a token.
    pub fn exchange_code(
        &self,
        secret: &ClientSecret,
        code: &str,
        code_verifier: &str,
        redirect_uri: &str,
        scopes: &[String],
    ) -> Result<Token, AuthError> {
        info!("exchanging authorization code at {}", secret.token_uri);
        let mut form = vec![
            ("grant_type", "authorization_code"),
            ("code", code),
            ("code_verifier", code_verifier),
            ("redirect_uri", redirect_uri),
            ("client_id", secret.client_id.as_str()),
        ];
        if !secret.client_secret.is_empty() {
            form.push(("client_secret", secret.client_secret.as_str()));
        }
        let response = self.post_form(&secret.token_uri, &form)?;
        let grantee = Grantee {
            token_uri: &secret.token_uri,
            client_id: &secret.client_id,
            client_secret: &secret.client_secret,
        };
        Ok(into_token(response, &grantee, None, scopes))
    }

    /// Use the refresh token to get a fresh access token.
    pub fn refresh(&self, token: &Token) -> Result<Token, AuthError> {
        let refresh_token = token
            .refresh_token
            .as_deref()
            .filter(|r| !r.is_empty())
            .ok_or_else(|| AuthError::Authorization("token has no refresh token".to_string()))?;
        info!("refreshing access token at {}", token.token_uri);

        let mut form = vec![
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", token.client_id.as_str()),
        ];
        if !token.client_secret.is_empty() {
            form.push(("client_secret", token.client_secret.as_str()));
        }
        let response = self.post_form(&token.token_uri, &form)?;
        let grantee = Grantee {
            token_uri: &token.token_uri,
            client_id: &token.client_id,
            client_secret: &token.client_secret,
        };
        Ok(into_token(
            response,
            &grantee,
            Some(refresh_token),
            &token.scopes,
        ))
    }

    fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<TokenResponse, AuthError> {
        match self
            .agent
            .post(url)
            .set("Accept", "application/json")
            .send_form(form)
        {
            Ok(response) => response.into_json::<TokenResponse>().map_err(|e| {
                AuthError::Authorization(format!("unreadable token response from {}: {}", url, e))
            }),
            Err(ureq::Error::Status(status, response)) => {
                let body: ErrorResponse = response.into_json().unwrap_or_default();
                debug!("token endpoint answered {} ({})", status, body.error);
                let detail = match (body.error.is_empty(), body.error_description) {
                    (true, _) => String::new(),
                    (false, Some(desc)) => format!(": {} ({})", body.error, desc),
                    (false, None) => format!(": {}", body.error),
                };
                Err(AuthError::Authorization(format!(
                    "token endpoint returned HTTP {}{}",
                    status, detail
                )))
            }
            Err(e) => Err(AuthError::Authorization(format!(
                "could not reach {}: {}",
                url, e
            ))),
        }
    }
}

fn into_token(
    response: TokenResponse,
    grantee: &Grantee<'_>,
    previous_refresh: Option<&str>,
    fallback_scopes: &[String],
) -> Token {
    let scopes = match response.scope {
        Some(ref s) if !s.trim().is_empty() => s.split_whitespace().map(String::from).collect(),
        _ => fallback_scopes.to_vec(),
    };
    Token {
        token: response.access_token,
        refresh_token: response
            .refresh_token
            .or_else(|| previous_refresh.map(String::from)),
        token_uri: grantee.token_uri.to_string(),
        client_id: grantee.client_id.to_string(),
        client_secret: grantee.client_secret.to_string(),
        scopes,
        expiry: response
            .expires_in
            .map(|secs| Utc::now() + Duration::seconds(secs)),
    }
}
