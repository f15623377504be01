//! Configuration loaded from environment variables.

use std::env;

use anyhow::{Context, Result};

/// Default token lifetime in hours.
const DEFAULT_TOKEN_EXPIRATION_HOURS: i64 = 24;

/// Application configuration.
///
/// Loaded once at startup; the signing secret is passed explicitly
/// into the token codec rather than read ambiently.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server-held secret for signing authentication tokens.
    pub auth_secret: String,

    /// Token lifetime in hours (default: 24).
    pub token_expiration_hours: i64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let auth_secret =
            env::var("AUTH_SECRET").context("AUTH_SECRET environment variable is required")?;

        let token_expiration_hours = env::var("TOKEN_EXPIRATION_HOURS")
            .unwrap_or_else(|_| DEFAULT_TOKEN_EXPIRATION_HOURS.to_string())
            .parse()
            .context("TOKEN_EXPIRATION_HOURS must be a valid i64")?;

        Ok(Self {
            auth_secret,
            token_expiration_hours,
        })
    }
}
