//! X (Twitter) platform implementation
//!
//! Talks to the X API v2 with OAuth 1.0a user-context authentication.
//! The v2 endpoints used here take JSON bodies, so the OAuth signature
//! covers only the `oauth_*` protocol parameters (RFC 5849 excludes
//! non-form bodies from the signature base string).

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Deserialize;
use sha1::Sha1;
use tracing::{debug, info};

use crate::config::Credentials;
use crate::error::{PlatformError, Result};
use crate::platforms::Platform;

type HmacSha1 = Hmac<Sha1>;

const DEFAULT_API_BASE: &str = "https://api.x.com";
const CHARACTER_LIMIT: usize = 280;

/// X API v2 client
pub struct XClient {
    http: reqwest::Client,
    credentials: Credentials,
    api_base: String,

    /// Display name of the authenticated account, set by `authenticate`
    account_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsersMeResponse {
    data: UserData,
}

#[derive(Debug, Deserialize)]
struct UserData {
    name: String,
    username: String,
}

#[derive(Debug, Deserialize)]
struct CreateTweetResponse {
    data: TweetData,
}

#[derive(Debug, Deserialize)]
struct TweetData {
    id: String,
}

impl XClient {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            http: reqwest::Client::new(),
            credentials,
            api_base: DEFAULT_API_BASE.to_string(),
            account_name: None,
        }
    }

    /// Point the client at a different API base URL (used by tests to
    /// target a local server)
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Display name of the authenticated account, if known
    pub fn account_name(&self) -> Option<&str> {
        self.account_name.as_deref()
    }

    /// Build the `Authorization: OAuth ...` header for a request
    fn authorization_header(&self, method: &str, url: &str) -> String {
        let nonce: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect();
        let timestamp = chrono::Utc::now().timestamp().to_string();
        build_authorization_header(&self.credentials, method, url, &nonce, &timestamp)
    }
}

#[async_trait]
impl Platform for XClient {
    async fn authenticate(&mut self) -> Result<()> {
        let url = format!("{}/2/users/me", self.api_base);
        let authorization = self.authorization_header("GET", &url);

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, authorization)
            .send()
            .await
            .map_err(|e| PlatformError::Network(format!("X authentication failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Any rejection during credential verification is an auth
            // failure, whatever the status code says
            return Err(PlatformError::Authentication(format!(
                "X rejected credentials (HTTP {}): {}",
                status.as_u16(),
                body
            ))
            .into());
        }

        let me: UsersMeResponse = response.json().await.map_err(|e| {
            PlatformError::Authentication(format!("Unexpected response from X: {}", e))
        })?;

        info!("Authenticated as {} (@{})", me.data.name, me.data.username);
        self.account_name = Some(me.data.name);
        Ok(())
    }

    async fn post(&self, text: &str) -> Result<String> {
        self.validate_content(text)?;

        let url = format!("{}/2/tweets", self.api_base);
        let authorization = self.authorization_header("POST", &url);

        let response = self
            .http
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, authorization)
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await
            .map_err(|e| PlatformError::Network(format!("X request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_http_error(status, &body).into());
        }

        let created: CreateTweetResponse = response.json().await.map_err(|e| {
            PlatformError::Posting(format!("Unexpected response from X: {}", e))
        })?;

        debug!("Created post {}", created.data.id);
        Ok(created.data.id)
    }

    fn validate_content(&self, content: &str) -> Result<()> {
        if content.trim().is_empty() {
            return Err(PlatformError::Validation("Content cannot be empty".to_string()).into());
        }

        let char_count = content.chars().count();
        if char_count > CHARACTER_LIMIT {
            return Err(PlatformError::Validation(format!(
                "Content exceeds X's {} character limit (current: {} characters)",
                CHARACTER_LIMIT, char_count
            ))
            .into());
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "x"
    }

    fn character_limit(&self) -> Option<usize> {
        Some(CHARACTER_LIMIT)
    }

    fn is_configured(&self) -> bool {
        // Credentials were validated as non-empty when loaded
        true
    }
}

/// Map a failed HTTP response to a PlatformError
///
/// - 401/403 -> `Authentication` (token rejected or missing scope)
/// - 429 -> `RateLimit`
/// - 5xx -> `Network` (server-side trouble)
/// - anything else -> `Posting`
fn map_http_error(status: reqwest::StatusCode, body: &str) -> PlatformError {
    let message = format!("HTTP {}: {}", status.as_u16(), body);
    match status.as_u16() {
        401 | 403 => PlatformError::Authentication(message),
        429 => PlatformError::RateLimit(message),
        500..=599 => PlatformError::Network(message),
        _ => PlatformError::Posting(message),
    }
}

/// Assemble the OAuth 1.0a Authorization header value
///
/// Split out from the client (with nonce and timestamp injected) so the
/// signing pipeline is deterministic under test.
fn build_authorization_header(
    credentials: &Credentials,
    method: &str,
    url: &str,
    nonce: &str,
    timestamp: &str,
) -> String {
    let oauth_params = [
        ("oauth_consumer_key", credentials.consumer_key.as_str()),
        ("oauth_nonce", nonce),
        ("oauth_signature_method", "HMAC-SHA1"),
        ("oauth_timestamp", timestamp),
        ("oauth_token", credentials.access_token.as_str()),
        ("oauth_version", "1.0"),
    ];

    let base_string = signature_base_string(method, url, &oauth_params);
    let signing_key = format!(
        "{}&{}",
        percent_encode(&credentials.consumer_secret),
        percent_encode(&credentials.access_token_secret)
    );

    let mut mac =
        HmacSha1::new_from_slice(signing_key.as_bytes()).expect("HMAC accepts any key length");
    mac.update(base_string.as_bytes());
    let signature = BASE64.encode(mac.finalize().into_bytes());

    let mut header_params: Vec<(&str, String)> = oauth_params
        .iter()
        .map(|(k, v)| (*k, percent_encode(v)))
        .collect();
    header_params.push(("oauth_signature", percent_encode(&signature)));
    header_params.sort_by(|a, b| a.0.cmp(b.0));

    let joined = header_params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, v))
        .collect::<Vec<_>>()
        .join(", ");

    format!("OAuth {}", joined)
}

/// RFC 5849 §3.4.1 signature base string
fn signature_base_string(method: &str, url: &str, params: &[(&str, &str)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();

    let normalized = encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(url),
        percent_encode(&normalized)
    )
}

/// RFC 3986 percent-encoding (unreserved characters only left bare), as
/// OAuth 1.0a requires
fn percent_encode(input: &str) -> String {
    urlencoding::encode(input).into_owned()
}
