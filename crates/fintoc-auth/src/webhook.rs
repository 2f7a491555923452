//! Webhook signature verification
//!
//! Fintoc signs webhook deliveries with a `Fintoc-Signature` header of the
//! form `t=<unix_ts>,v1=<hex_hmac_sha256>`. Verification recomputes
//! `HMAC-SHA256(secret, "{t}.{payload}")` and compares it against the `v1`
//! value in constant time, after checking the timestamp is not older than
//! the configured tolerance.

use std::time::{SystemTime, UNIX_EPOCH};

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::error::WebhookError;

type HmacSha256 = Hmac<Sha256>;

/// Verifies `Fintoc-Signature` webhook headers
///
/// # Example
///
/// ```no_run
/// use fintoc_auth::WebhookSignature;
///
/// # fn handle(payload: &str, header: &str) -> Result<(), fintoc_auth::WebhookError> {
/// WebhookSignature::verify_header(
///     payload,
///     header,
///     "whsec_...",
///     Some(WebhookSignature::DEFAULT_TOLERANCE),
/// )
/// # }
/// ```
pub struct WebhookSignature;

impl WebhookSignature {
    /// Signature scheme consumed by this verifier
    pub const EXPECTED_SCHEME: &'static str = "v1";

    /// Default timestamp tolerance, in seconds
    pub const DEFAULT_TOLERANCE: u64 = 300;

    /// Verify a webhook signature header against the raw request body
    ///
    /// `tolerance` is the maximum accepted age of the signed timestamp in
    /// seconds; pass `None` to skip the timestamp check entirely.
    pub fn verify_header(
        payload: &str,
        header: &str,
        secret: &str,
        tolerance: Option<u64>,
    ) -> Result<(), WebhookError> {
        Self::verify_at(payload, header, secret, tolerance, unix_now())
    }

    /// Verification against an explicit clock, so callers (and tests) can
    /// pin `now` instead of reading the system time.
    pub fn verify_at(
        payload: &str,
        header: &str,
        secret: &str,
        tolerance: Option<u64>,
        now: u64,
    ) -> Result<(), WebhookError> {
        let (timestamp, signature) = Self::parse_header(header)?;

        if let Some(tolerance) = tolerance {
            if timestamp < now.saturating_sub(tolerance) {
                warn!(timestamp, now, "webhook timestamp outside tolerance");
                return Err(WebhookError::TimestampTooOld { timestamp });
            }
        }

        let expected = Self::compute_signature(payload, timestamp, secret);
        if !constant_time_eq(expected.as_bytes(), signature.as_bytes()) {
            warn!("webhook signature mismatch");
            return Err(WebhookError::SignatureMismatch);
        }

        Ok(())
    }

    /// Hex HMAC-SHA256 over `"{timestamp}.{payload}"`
    pub fn compute_signature(payload: &str, timestamp: u64, secret: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(format!("{timestamp}.{payload}").as_bytes());
        mac.finalize()
            .into_bytes()
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect()
    }

    /// Split `t=<ts>,v1=<hex>,...` into the timestamp and the v1 signature.
    /// Pairs under other schemes are ignored.
    fn parse_header(header: &str) -> Result<(u64, String), WebhookError> {
        let mut timestamp = None;
        let mut signature = None;

        for part in header.split(',') {
            let (key, value) = part.split_once('=').ok_or(WebhookError::MalformedHeader)?;
            match key {
                "t" => {
                    timestamp = Some(
                        value
                            .parse::<u64>()
                            .map_err(|_| WebhookError::MalformedHeader)?,
                    )
                }
                scheme if scheme == Self::EXPECTED_SCHEME => {
                    signature = Some(value.to_string())
                }
                _ => {}
            }
        }

        let timestamp = timestamp.ok_or(WebhookError::MalformedHeader)?;
        let signature = signature.ok_or(WebhookError::MissingSignature {
            scheme: Self::EXPECTED_SCHEME,
        })?;

        Ok((timestamp, signature))
    }
}

/// Constant-time comparison that leaks neither content nor length: both
/// inputs are hashed to fixed-size digests before the `subtle` comparison.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let ha = Sha256::digest(a);
    let hb = Sha256::digest(b);
    ha.ct_eq(&hb).into()
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_secs()
}
