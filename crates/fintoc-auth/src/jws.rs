//! Detached JWS signature generation for Fintoc API requests
//!
//! Fintoc requires mutating requests from signing-enabled accounts to carry a
//! `Fintoc-JWS-Signature` header binding the request body to a fresh nonce
//! and timestamp. The header is a detached JWS: the base64url-encoded
//! protected header and signature, dot-joined, with the payload omitted.
//! Verifiers reconstruct the signing input from the raw request body.
//!
//! # Security
//!
//! The RSA private key never leaves this struct, and the `Debug` impl does
//! not expose it. Nonces are 16 cryptographically random bytes per call, so
//! two signatures over the same body are never identical.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::RngCore;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs1v15::SigningKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::sha2::Sha256;
use rsa::signature::{SignatureEncoding, Signer};
use rsa::RsaPrivateKey;
use serde::Serialize;

use crate::error::{SignatureError, SignatureResult};

/// JWS algorithm advertised in the protected header
const ALGORITHM: &str = "RS256";

/// Protected header of the detached JWS
///
/// Field order matters on the wire, so this struct must keep its declaration
/// order (serde serializes struct fields in order).
#[derive(Debug, Serialize)]
struct ProtectedHeader {
    alg: &'static str,
    nonce: String,
    ts: u64,
    crit: [&'static str; 2],
}

/// Signs request bodies with RSASSA-PKCS1-v1_5 / SHA-256
///
/// # Example
///
/// ```no_run
/// use fintoc_auth::JwsSigner;
///
/// # fn main() -> Result<(), fintoc_auth::SignatureError> {
/// let signer = JwsSigner::from_pem_file("private_key.pem")?;
/// let header = signer.generate_header(r#"{"amount":1000,"currency":"CLP"}"#)?;
/// // Attach as the `Fintoc-JWS-Signature` request header.
/// # Ok(())
/// # }
/// ```
pub struct JwsSigner {
    signing_key: SigningKey<Sha256>,
}

impl JwsSigner {
    /// Create a signer from a PEM-encoded RSA private key
    ///
    /// Accepts both PKCS#8 (`BEGIN PRIVATE KEY`) and PKCS#1
    /// (`BEGIN RSA PRIVATE KEY`) encodings.
    pub fn from_pem(pem: &str) -> SignatureResult<Self> {
        let key = RsaPrivateKey::from_pkcs8_pem(pem)
            .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
            .map_err(|e| SignatureError::InvalidKey(e.to_string()))?;

        Ok(Self {
            signing_key: SigningKey::<Sha256>::new(key),
        })
    }

    /// Create a signer from a PEM key file on disk
    pub fn from_pem_file(path: impl AsRef<Path>) -> SignatureResult<Self> {
        let pem = std::fs::read_to_string(path)?;
        Self::from_pem(&pem)
    }

    /// Create a signer from the `FINTOC_JWS_PRIVATE_KEY` environment variable
    ///
    /// The variable must hold the PEM key itself, not a path.
    pub fn from_env() -> SignatureResult<Self> {
        let pem = std::env::var("FINTOC_JWS_PRIVATE_KEY")
            .map_err(|_| SignatureError::EnvVarNotSet("FINTOC_JWS_PRIVATE_KEY".to_string()))?;
        Self::from_pem(&pem)
    }

    /// Generate the `Fintoc-JWS-Signature` header value for a request body
    ///
    /// The signing input is `{b64url(protected)}.{b64url(raw_body)}`; the
    /// returned header is `{b64url(protected)}.{b64url(signature)}` with the
    /// payload segment omitted.
    pub fn generate_header(&self, raw_body: &str) -> SignatureResult<String> {
        let protected = ProtectedHeader {
            alg: ALGORITHM,
            nonce: random_nonce(),
            ts: unix_now(),
            crit: ["ts", "nonce"],
        };

        let protected_json = serde_json::to_vec(&protected)
            .map_err(|e| SignatureError::Signing(e.to_string()))?;
        let protected_b64 = URL_SAFE_NO_PAD.encode(protected_json);
        let payload_b64 = URL_SAFE_NO_PAD.encode(raw_body.as_bytes());

        let signing_input = format!("{protected_b64}.{payload_b64}");
        let signature = self
            .signing_key
            .try_sign(signing_input.as_bytes())
            .map_err(|e| SignatureError::Signing(e.to_string()))?;
        let signature_b64 = URL_SAFE_NO_PAD.encode(signature.to_bytes());

        Ok(format!("{protected_b64}.{signature_b64}"))
    }
}

impl std::fmt::Debug for JwsSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwsSigner")
            .field("signing_key", &"[REDACTED]")
            .finish()
    }
}

/// 16 random bytes, hex-encoded (32 chars)
fn random_nonce() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsa::pkcs1v15::{Signature, VerifyingKey};
    use rsa::pkcs8::{EncodePrivateKey, LineEnding};
    use rsa::signature::Verifier;
    use std::sync::OnceLock;

    // Key generation is slow, share one across the module.
    fn test_key() -> &'static RsaPrivateKey {
        static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
        KEY.get_or_init(|| {
            RsaPrivateKey::new(&mut rand::thread_rng(), 2048).expect("key generation")
        })
    }

    fn test_signer() -> JwsSigner {
        JwsSigner {
            signing_key: SigningKey::<Sha256>::new(test_key().clone()),
        }
    }

    fn decode_protected(header: &str) -> serde_json::Value {
        let (protected_b64, _) = header.split_once('.').unwrap();
        let bytes = URL_SAFE_NO_PAD.decode(protected_b64).unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_from_pem_roundtrip() {
        let pem = test_key().to_pkcs8_pem(LineEnding::LF).unwrap();
        assert!(JwsSigner::from_pem(&pem).is_ok());
    }

    #[test]
    fn test_from_pem_rejects_garbage() {
        let err = JwsSigner::from_pem("not a pem").unwrap_err();
        assert!(matches!(err, SignatureError::InvalidKey(_)));
    }

    #[test]
    fn test_protected_header_shape() {
        let signer = test_signer();
        let header = signer.generate_header(r#"{"amount":1000}"#).unwrap();
        let protected = decode_protected(&header);

        assert_eq!(protected["alg"], "RS256");
        assert_eq!(protected["crit"], serde_json::json!(["ts", "nonce"]));
        assert!(protected["ts"].as_u64().is_some());

        let nonce = protected["nonce"].as_str().unwrap();
        assert_eq!(nonce.len(), 32);
        assert!(nonce.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_nonces_differ_between_calls() {
        let signer = test_signer();
        let body = r#"{"amount":1000}"#;
        let first = decode_protected(&signer.generate_header(body).unwrap());
        let second = decode_protected(&signer.generate_header(body).unwrap());
        assert_ne!(first["nonce"], second["nonce"]);
    }

    #[test]
    fn test_signature_verifies_against_public_key() {
        let signer = test_signer();
        let body = r#"{"amount":1000,"currency":"CLP"}"#;
        let verifying_key = VerifyingKey::<Sha256>::new(test_key().to_public_key());

        // Two signatures over the same body differ (fresh nonce) but both
        // must verify once the signing input is reconstructed.
        let headers = [
            signer.generate_header(body).unwrap(),
            signer.generate_header(body).unwrap(),
        ];
        assert_ne!(headers[0], headers[1]);

        for header in &headers {
            let (protected_b64, signature_b64) = header.split_once('.').unwrap();
            let payload_b64 = URL_SAFE_NO_PAD.encode(body.as_bytes());
            let signing_input = format!("{protected_b64}.{payload_b64}");

            let signature_bytes = URL_SAFE_NO_PAD.decode(signature_b64).unwrap();
            let signature = Signature::try_from(signature_bytes.as_slice()).unwrap();
            verifying_key
                .verify(signing_input.as_bytes(), &signature)
                .expect("signature must verify");
        }
    }

    #[test]
    fn test_debug_redacts_key() {
        let debug = format!("{:?}", test_signer());
        assert!(debug.contains("[REDACTED]"));
    }
}
