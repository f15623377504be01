//! Signed bearer-token issuance and verification.
//!
//! Tokens are self-contained: a JSON claim bundle plus an HMAC-SHA256
//! tag, each base64url-encoded and joined with a dot. The server holds
//! no session state; identity is reconstructed per request from the
//! signature and expiry alone.

use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use uuid::Uuid;

use crate::models::AccountCategory;

/// Claim bundle embedded in a token before signing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Owner (subject) account id.
    pub sub: Uuid,
    pub email: String,
    pub category: AccountCategory,
    /// Issued-at, unix seconds.
    pub iat: i64,
    /// Expires-at, unix seconds.
    pub exp: i64,
}

/// Stateless token codec over a server-held signing secret.
#[derive(Clone)]
pub struct TokenCodec {
    secret: Vec<u8>,
    expiration_hours: i64,
}

impl TokenCodec {
    /// Create a codec with the given signing secret and token lifetime.
    pub fn new(secret: &str, expiration_hours: i64) -> Self {
        Self {
            secret: secret.as_bytes().to_vec(),
            expiration_hours,
        }
    }

    /// Issue a signed token for the given identity.
    pub fn issue(&self, owner_id: Uuid, email: &str, category: AccountCategory) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            sub: owner_id,
            email: email.to_string(),
            category,
            iat: now,
            exp: now + self.expiration_hours * 3600,
        };

        let payload = serde_json::to_vec(&claims).context("failed to serialize token claims")?;
        let tag = self.sign(&payload)?;

        Ok(format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(&payload),
            URL_SAFE_NO_PAD.encode(tag)
        ))
    }

    /// Verify a token and recover the subject account id.
    ///
    /// Fail-closed: any malformed, tampered, or expired token yields
    /// `None`, with no distinction between the failure modes.
    pub fn verify(&self, token: &str) -> Option<Uuid> {
        let mut segments = token.split('.');
        let (payload_b64, tag_b64) = match (segments.next(), segments.next(), segments.next()) {
            (Some(payload), Some(tag), None) => (payload, tag),
            _ => return None,
        };

        let payload = URL_SAFE_NO_PAD.decode(payload_b64).ok()?;
        let tag = URL_SAFE_NO_PAD.decode(tag_b64).ok()?;

        // Full-length comparison regardless of where the first
        // mismatching byte sits.
        let expected = self.sign(&payload).ok()?;
        if !bool::from(expected.as_slice().ct_eq(tag.as_slice())) {
            return None;
        }

        let claims: TokenClaims = serde_json::from_slice(&payload).ok()?;
        if Utc::now().timestamp() >= claims.exp {
            return None;
        }

        Some(claims.sub)
    }

    fn sign(&self, payload: &[u8]) -> Result<Vec<u8>> {
        let mut mac =
            Hmac::<Sha256>::new_from_slice(&self.secret).context("invalid signing secret")?;
        mac.update(payload);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}
