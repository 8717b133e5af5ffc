//! Credential loading for xpost
//!
//! The X API is accessed with OAuth 1.0a user-context credentials: a
//! consumer key/secret pair for the application and an access token/secret
//! pair for the posting account. All four are read from the process
//! environment, with an optional local `.env` file loaded first.

use crate::error::{ConfigError, Result};

/// OAuth 1.0a user-context credentials for the X API
#[derive(Debug, Clone)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl Credentials {
    /// Load credentials from the process environment
    ///
    /// Reads `CONSUMER_KEY`, `CONSUMER_SECRET`, `ACCESS_TOKEN` and
    /// `ACCESS_TOKEN_SECRET`. A `.env` file in the working directory is
    /// loaded first if present, so secrets can live in a local untracked
    /// file instead of the shell environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingCredential` naming the first variable
    /// that is absent or empty.
    pub fn from_env() -> Result<Self> {
        // Ignore a missing .env file; the variables may be set directly.
        let _ = dotenvy::dotenv();

        Ok(Self {
            consumer_key: require_var("CONSUMER_KEY")?,
            consumer_secret: require_var("CONSUMER_SECRET")?,
            access_token: require_var("ACCESS_TOKEN")?,
            access_token_secret: require_var("ACCESS_TOKEN_SECRET")?,
        })
    }
}

fn require_var(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingCredential(name.to_string()).into()),
    }
}
