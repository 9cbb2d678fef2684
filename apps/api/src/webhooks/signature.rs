//! Svix webhook signatures.
//!
//! Clerk delivers webhooks through Svix. Each delivery carries three headers:
//! a message id, a unix timestamp (seconds) and a space-separated list of
//! `<version>,<base64>` signatures. The `v1` signature is the HMAC-SHA256 of
//! `"{id}.{timestamp}.{body}"` keyed with the decoded endpoint secret.

use std::fmt;

use axum::http::HeaderMap;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

pub const HEADER_ID: &str = "svix-id";
pub const HEADER_TIMESTAMP: &str = "svix-timestamp";
pub const HEADER_SIGNATURE: &str = "svix-signature";

/// Maximum clock skew accepted between the sender and us, in either direction.
pub const DEFAULT_TOLERANCE_SECS: u64 = 300;

const SECRET_PREFIX: &str = "whsec_";
const SIGNATURE_VERSION: &str = "v1";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("webhook secret is empty")]
    EmptySecret,

    #[error("webhook secret is not valid base64")]
    InvalidSecret,

    #[error("invalid svix-timestamp header: {0:?}")]
    InvalidTimestamp(String),

    #[error("message timestamp too old")]
    TimestampTooOld,

    #[error("message timestamp too new")]
    TimestampTooNew,

    #[error("no matching signature found")]
    NoMatchingSignature,
}

/// Decoded signing key for a webhook endpoint.
#[derive(Clone)]
pub struct WebhookSecret(Vec<u8>);

impl WebhookSecret {
    /// Accepts the dashboard form (`whsec_<base64>`) or the bare base64 key.
    pub fn parse(raw: &str) -> Result<Self, SignatureError> {
        let raw = raw.trim();
        let encoded = raw.strip_prefix(SECRET_PREFIX).unwrap_or(raw);
        if encoded.is_empty() {
            return Err(SignatureError::EmptySecret);
        }

        let key = STANDARD
            .decode(encoded)
            .map_err(|_| SignatureError::InvalidSecret)?;
        Ok(Self(key))
    }
}

impl fmt::Debug for WebhookSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WebhookSecret(..)")
    }
}

/// The three Svix headers of a delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookHeaders {
    pub id: String,
    pub timestamp: String,
    pub signature: String,
}

impl WebhookHeaders {
    /// Returns `None` if any header is absent, empty or not valid UTF-8.
    pub fn from_header_map(headers: &HeaderMap) -> Option<Self> {
        let get = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_owned)
        };

        Some(Self {
            id: get(HEADER_ID)?,
            timestamp: get(HEADER_TIMESTAMP)?,
            signature: get(HEADER_SIGNATURE)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct WebhookVerifier {
    secret: WebhookSecret,
    tolerance_secs: u64,
}

impl WebhookVerifier {
    pub fn new(secret: WebhookSecret) -> Self {
        Self {
            secret,
            tolerance_secs: DEFAULT_TOLERANCE_SECS,
        }
    }

    pub fn with_tolerance(mut self, tolerance_secs: u64) -> Self {
        self.tolerance_secs = tolerance_secs;
        self
    }

    /// Verifies a delivery against the current wall clock.
    pub fn verify(&self, headers: &WebhookHeaders, body: &[u8]) -> Result<(), SignatureError> {
        self.verify_at(headers, body, chrono::Utc::now().timestamp())
    }

    /// Verifies a delivery as if the current unix time were `now`.
    pub fn verify_at(
        &self,
        headers: &WebhookHeaders,
        body: &[u8],
        now: i64,
    ) -> Result<(), SignatureError> {
        let timestamp = headers
            .timestamp
            .parse::<i64>()
            .map_err(|_| SignatureError::InvalidTimestamp(headers.timestamp.clone()))?;

        if now.abs_diff(timestamp) > self.tolerance_secs {
            return Err(if timestamp < now {
                SignatureError::TimestampTooOld
            } else {
                SignatureError::TimestampTooNew
            });
        }

        let mac = self.mac(&headers.id, timestamp, body)?;

        // Several signatures are sent while a secret is being rotated; any match wins.
        for entry in headers.signature.split_whitespace() {
            let Some((version, encoded)) = entry.split_once(',') else {
                continue;
            };
            if version != SIGNATURE_VERSION {
                continue;
            }
            let Ok(candidate) = STANDARD.decode(encoded) else {
                continue;
            };
            if mac.clone().verify_slice(&candidate).is_ok() {
                return Ok(());
            }
        }

        Err(SignatureError::NoMatchingSignature)
    }

    /// Produces a `v1,<base64>` signature for the given delivery.
    #[cfg(test)]
    pub fn sign(&self, id: &str, timestamp: i64, body: &[u8]) -> Result<String, SignatureError> {
        let mac = self.mac(id, timestamp, body)?;
        Ok(format!(
            "{SIGNATURE_VERSION},{}",
            STANDARD.encode(mac.finalize().into_bytes())
        ))
    }

    fn mac(&self, id: &str, timestamp: i64, body: &[u8]) -> Result<HmacSha256, SignatureError> {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret.0).map_err(|_| SignatureError::InvalidSecret)?;
        mac.update(id.as_bytes());
        mac.update(b".");
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(body);
        Ok(mac)
    }
}
