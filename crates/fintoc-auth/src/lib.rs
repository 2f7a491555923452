//! Request signing and webhook verification for the Fintoc API
//!
//! This crate holds the two cryptographic surfaces of the SDK:
//!
//! - [`JwsSigner`] produces the detached-JWS `Fintoc-JWS-Signature` header
//!   that binds mutating request bodies to a fresh nonce and timestamp
//!   (RSASSA-PKCS1-v1_5 / SHA-256).
//! - [`WebhookSignature`] verifies the `t=<ts>,v1=<hex>` signature header
//!   of incoming webhook deliveries (HMAC-SHA256, constant-time compare).
//!
//! # Example
//!
//! ```no_run
//! use fintoc_auth::{JwsSigner, WebhookSignature};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let signer = JwsSigner::from_env()?;
//! let header = signer.generate_header(r#"{"amount":1000}"#)?;
//!
//! WebhookSignature::verify_header(
//!     "raw-webhook-body",
//!     "t=1743890251,v1=...",
//!     "whsec_...",
//!     Some(WebhookSignature::DEFAULT_TOLERANCE),
//! )?;
//! # Ok(())
//! # }
//! ```

mod error;
mod jws;
mod webhook;

pub use error::{SignatureError, SignatureResult, WebhookError};
pub use jws::JwsSigner;
pub use webhook::WebhookSignature;
