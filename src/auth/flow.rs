//! Interactive authorization: send the user to the consent page and catch
//! the redirect on a loopback HTTP server.

use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use url::Url;

use super::AuthError;
use super::client::OAuthClient;
use super::pkce::{self, PkceChallenge};
use super::secrets::ClientSecret;
use super::token::Token;
use crate::app_config::OAuthSettings;

/// Obtains a brand-new token from the user. Swapped out in tests.
pub trait AuthorizationFlow {
    fn authorize(&self, secret: &ClientSecret, scopes: &[String]) -> Result<Token, AuthError>;
}

/// Query parameters of a redirect hitting the loopback server.
#[derive(Debug, Clone, PartialEq)]
pub enum Callback {
    Code {
        code: String,
        state: Option<String>,
    },
    Error {
        error: String,
        description: Option<String>,
    },
}

/// Parse the request target (`/?code=...&state=...`). `None` for requests
/// that carry neither a code nor an error, e.g. `/favicon.ico`.
pub fn parse_callback(target: &str) -> Option<Callback> {
    let url = Url::parse("http://127.0.0.1").ok()?.join(target).ok()?;
    let mut code = None;
    let mut state = None;
    let mut error = None;
    let mut description = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "code" => code = Some(value.into_owned()),
            "state" => state = Some(value.into_owned()),
            "error" => error = Some(value.into_owned()),
            "error_description" => description = Some(value.into_owned()),
            _ => {}
        }
    }
    if let Some(error) = error {
        return Some(Callback::Error { error, description });
    }
    code.map(|code| Callback::Code { code, state })
}

/// Consent page URL for the given client, scopes and PKCE challenge.
pub fn authorization_url(
    secret: &ClientSecret,
    scopes: &[String],
    redirect_uri: &str,
    pkce: &PkceChallenge,
    state: &str,
) -> Result<String, AuthError> {
    let mut url = Url::parse(&secret.auth_uri).map_err(|e| AuthError::Configuration {
        path: "client_secrets.json".into(),
        reason: format!("Invalid auth_uri '{}' ({})", secret.auth_uri, e),
    })?;
    url.query_pairs_mut()
        .append_pair("response_type", "code")
        .append_pair("client_id", &secret.client_id)
        .append_pair("redirect_uri", redirect_uri)
        .append_pair("scope", &scopes.join(" "))
        .append_pair("state", state)
        .append_pair("code_challenge", &pkce.challenge)
        .append_pair("code_challenge_method", PkceChallenge::METHOD)
        .append_pair("access_type", "offline");
    Ok(url.to_string())
}

const SUCCESS_PAGE: &str = "<html><body><h3>Authorization complete.</h3>\
    <p>You can close this window and return to the terminal.</p></body></html>";
const FAILURE_PAGE: &str = "<html><body><h3>Authorization failed.</h3>\
    <p>Return to the terminal for details.</p></body></html>";

/// Authorization-code flow with PKCE and a 127.0.0.1 redirect.
pub struct LoopbackFlow {
    client: OAuthClient,
    port: u16,
    open_browser: bool,
    timeout: Duration,
}

impl LoopbackFlow {
    pub fn new(client: OAuthClient, settings: &OAuthSettings) -> Self {
        Self {
            client,
            port: settings.port,
            open_browser: settings.open_browser,
            timeout: Duration::from_secs(settings.timeout_secs),
        }
    }

    /// Serve until a redirect carrying a code or an error arrives.
    fn wait_for_code(&self, server: &tiny_http::Server, expected_state: &str) -> Result<String, AuthError> {
        let deadline = Instant::now() + self.timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(AuthError::Authorization(format!(
                    "no response from the browser within {}s",
                    self.timeout.as_secs()
                )));
            }
            let request = match server.recv_timeout(remaining) {
                Ok(Some(request)) => request,
                Ok(None) => continue,
                Err(e) => {
                    return Err(AuthError::Authorization(format!(
                        "loopback server failed: {}",
                        e
                    )));
                }
            };

            debug!("loopback request: {}", request.url());
            match parse_callback(request.url()) {
                None => {
                    let _ = request.respond(
                        tiny_http::Response::from_string("Not found")
                            .with_status_code(tiny_http::StatusCode(404)),
                    );
                }
                Some(Callback::Error { error, description }) => {
                    respond_html(request, FAILURE_PAGE);
                    let detail = description.map(|d| format!(" ({})", d)).unwrap_or_default();
                    return Err(AuthError::Authorization(format!(
                        "consent was not granted: {}{}",
                        error, detail
                    )));
                }
                Some(Callback::Code { code, state }) => {
                    if state.as_deref() != Some(expected_state) {
                        respond_html(request, FAILURE_PAGE);
                        return Err(AuthError::Authorization(
                            "state mismatch in redirect; possible CSRF attempt".to_string(),
                        ));
                    }
                    respond_html(request, SUCCESS_PAGE);
                    return Ok(code);
                }
            }
        }
    }
}

impl AuthorizationFlow for LoopbackFlow {
    fn authorize(&self, secret: &ClientSecret, scopes: &[String]) -> Result<Token, AuthError> {
        let server = tiny_http::Server::http(("127.0.0.1", self.port)).map_err(|e| {
            AuthError::Authorization(format!(
                "cannot listen on 127.0.0.1:{} for the redirect: {}",
                self.port, e
            ))
        })?;
        let port = server
            .server_addr()
            .to_ip()
            .map(|addr| addr.port())
            .ok_or_else(|| AuthError::Authorization("loopback server has no IP address".to_string()))?;
        let redirect_uri = format!("http://127.0.0.1:{}/", port);

        let pkce = PkceChallenge::generate();
        let state = pkce::random_state();
        let url = authorization_url(secret, scopes, &redirect_uri, &pkce, &state)?;

        println!("Please visit this URL to authorize this application:");
        println!("  {}", url);
        if self.open_browser {
            if let Err(e) = open::that(&url) {
                warn!("could not open a browser: {}", e);
            }
        }
        info!("waiting for redirect on {}", redirect_uri);

        let code = self.wait_for_code(&server, &state)?;
        self.client
            .exchange_code(secret, &code, &pkce.verifier, &redirect_uri, scopes)
    }
}

fn respond_html(request: tiny_http::Request, body: &str) {
    let mut response = tiny_http::Response::from_string(body);
    if let Ok(header) =
        tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"text/html; charset=utf-8"[..])
    {
        response = response.with_header(header);
    }
    if let Err(e) = request.respond(response) {
        debug!("could not answer the browser: {}", e);
    }
}
