//! Immutable client context threaded through managers and resources

use std::collections::HashMap;
use std::sync::Arc;

use fintoc_auth::JwsSigner;

/// Everything a request needs besides its own parameters
///
/// A context is immutable; scoping (e.g. pinning a `link_token`) is done by
/// deriving a copy with [`ClientContext::with_param`], never by mutation.
/// Derived copies share no state with the context they came from; only the
/// HTTP client on the owning [`Transport`](crate::transport::Transport) is
/// shared.
#[derive(Clone)]
pub struct ClientContext {
    /// API origin, e.g. `https://api.fintoc.com`
    pub base_url: String,
    /// Secret API key, sent raw in the `Authorization` header
    pub api_key: String,
    /// Optional `Fintoc-Version` header value
    pub api_version: Option<String>,
    /// `User-Agent` header value
    pub user_agent: String,
    /// Default query parameters merged into every request
    pub params: HashMap<String, String>,
    /// Request signer, when JWS signing is configured
    pub signer: Option<Arc<JwsSigner>>,
}

impl ClientContext {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        api_version: Option<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            api_version,
            user_agent: user_agent.into(),
            params: HashMap::new(),
            signer: None,
        }
    }

    /// Derived copy with one extra default query parameter
    pub fn with_param(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut derived = self.clone();
        derived.params.insert(key.into(), value.into());
        derived
    }

    /// Derived copy with the default query parameters replaced
    pub fn with_params(&self, params: HashMap<String, String>) -> Self {
        let mut derived = self.clone();
        derived.params = params;
        derived
    }

    /// Derived copy with a signer attached
    pub fn with_signer(&self, signer: Arc<JwsSigner>) -> Self {
        let mut derived = self.clone();
        derived.signer = Some(signer);
        derived
    }
}

impl std::fmt::Debug for ClientContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientContext")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("api_version", &self.api_version)
            .field("user_agent", &self.user_agent)
            .field("params", &self.params)
            .field("has_signer", &self.signer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> ClientContext {
        ClientContext::new(
            "https://test.com",
            "super_secret_api_key",
            None,
            "fintoc-rust/test",
        )
    }

    #[test]
    fn test_with_param_does_not_touch_original() {
        let ctx = context();
        let derived = ctx.with_param("link_token", "tok_123");
        assert!(ctx.params.is_empty());
        assert_eq!(derived.params.get("link_token").unwrap(), "tok_123");
        assert_eq!(derived.base_url, ctx.base_url);
    }

    #[test]
    fn test_with_params_replaces() {
        let ctx = context().with_param("a", "1");
        let derived = ctx.with_params(HashMap::from([("b".to_string(), "2".to_string())]));
        assert!(!derived.params.contains_key("a"));
        assert_eq!(derived.params.get("b").unwrap(), "2");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let debug = format!("{:?}", context());
        assert!(!debug.contains("super_secret_api_key"));
        assert!(debug.contains("[REDACTED]"));
    }
}
