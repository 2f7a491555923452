//! Error types for signing and webhook verification

/// Errors raised while loading a signing key or producing a signature
#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    /// The private key could not be parsed as PEM (PKCS#8 or PKCS#1)
    #[error("Invalid private key: {0}")]
    InvalidKey(String),

    /// The private key file could not be read
    #[error("Unable to read private key file: {0}")]
    KeyFile(#[from] std::io::Error),

    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    /// The signature operation itself failed
    #[error("Signing failed: {0}")]
    Signing(String),
}

/// Errors raised while verifying a webhook signature header
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WebhookError {
    /// The header is not a `t=<ts>,v1=<hex>` pair list
    #[error("Unable to extract timestamp and signatures from header")]
    MalformedHeader,

    /// The header carries no signature under the expected scheme
    #[error("No {scheme} signature found")]
    MissingSignature {
        /// Scheme that was looked up (currently always `v1`)
        scheme: &'static str,
    },

    /// The signed timestamp is older than the allowed tolerance
    #[error("Timestamp outside the tolerance zone ({timestamp})")]
    TimestampTooOld {
        /// Unix timestamp found in the header
        timestamp: u64,
    },

    /// The recomputed signature does not match the header
    #[error("Signature mismatch")]
    SignatureMismatch,
}

/// Result type for signing operations
pub type SignatureResult<T> = Result<T, SignatureError>;
