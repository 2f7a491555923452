//! HTTP transport: header assembly, query merging, error translation
//!
//! The transport owns everything that is uniform across endpoints: the
//! `Authorization`/`User-Agent`/`Fintoc-Version` headers, idempotency keys
//! for POSTs, JWS signing of mutating bodies, default query parameters, and
//! the translation of non-2xx responses into the error taxonomy. The actual
//! HTTP client is injected behind the [`HttpClient`] trait so the whole SDK
//! can be driven against a recorded transport in tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::context::ClientContext;
use crate::error::{ApiError, ErrorEnvelope, FintocError, RestResult};
use crate::paginator::{parse_link_header, Page, PageTarget};

/// Default request timeout for the built-in reqwest client
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP methods used by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Patch => "patch",
            Self::Put => "put",
            Self::Delete => "delete",
        }
    }

    /// Methods whose bodies are JWS-signed when a signer is configured
    fn is_mutation(&self) -> bool {
        matches!(self, Self::Post | Self::Patch | Self::Put)
    }
}

/// A fully assembled request, ready for an [`HttpClient`]
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    /// Absolute URL without the query string
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// Query parameters, already merged and ordered
    pub query: Vec<(String, String)>,
    /// Serialized JSON body, when present
    pub body: Option<String>,
}

impl HttpRequest {
    /// First header value under `name`, case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// First query value under `key`
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A raw response as seen by the transport
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// First header value under `name`, case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// The injected HTTP client seam
///
/// Production code uses [`ReqwestClient`]; tests substitute a recording
/// implementation. Implementations only move bytes — header assembly and
/// error translation stay in [`Transport`].
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> RestResult<HttpResponse>;
}

/// [`HttpClient`] backed by `reqwest`
#[derive(Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(secs))
            .build()
            .expect("Failed to create HTTP client");
        Self { client }
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn execute(&self, request: HttpRequest) -> RestResult<HttpResponse> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self
            .client
            .request(method, &request.url)
            .query(&request.query);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.header("Content-Type", "application/json").body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.bytes().await?.to_vec();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Client context plus an injected HTTP client
///
/// Cloning a transport (or deriving a scoped copy) shares the underlying
/// HTTP client; the context itself is copied.
#[derive(Clone)]
pub struct Transport {
    http: Arc<dyn HttpClient>,
    ctx: ClientContext,
}

impl Transport {
    pub fn new(http: Arc<dyn HttpClient>, ctx: ClientContext) -> Self {
        Self { http, ctx }
    }

    pub fn ctx(&self) -> &ClientContext {
        &self.ctx
    }

    /// Derived transport with one extra default query parameter, sharing
    /// the HTTP client
    pub fn with_param(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            http: Arc::clone(&self.http),
            ctx: self.ctx.with_param(key, value),
        }
    }

    /// Derived transport with a replacement context, sharing the HTTP client
    pub fn with_ctx(&self, ctx: ClientContext) -> Self {
        Self {
            http: Arc::clone(&self.http),
            ctx,
        }
    }

    /// Perform a request and decode its JSON body
    ///
    /// Non-2xx responses are translated through the error taxonomy. A 2xx
    /// response with an empty body decodes to an empty JSON object, so
    /// bodyless `delete` endpoints flow through uniformly.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        params: &HashMap<String, String>,
        json: Option<&Value>,
        idempotency_key: Option<&str>,
    ) -> RestResult<Value> {
        let response = self
            .send(method, path, Some(params), json, idempotency_key, true)
            .await?;
        if response.body.is_empty() {
            return Ok(Value::Object(serde_json::Map::new()));
        }
        Ok(serde_json::from_slice(&response.body)?)
    }

    /// Fetch one page of a collection, returning its elements and the
    /// `rel="next"` URL from the `Link` header, if any
    pub async fn get_page(&self, target: PageTarget) -> RestResult<Page> {
        let response = match &target {
            PageTarget::Path { path, params } => {
                self.send(Method::Get, path, Some(params), None, None, true)
                    .await?
            }
            // A `next` URL is self-contained: no default params re-merged.
            PageTarget::Url(url) => self.send(Method::Get, url, None, None, None, false).await?,
        };

        let next = match response.header("link") {
            Some(header) => parse_link_header(header)?
                .into_iter()
                .find(|(rel, _)| rel == "next")
                .map(|(_, url)| url),
            None => None,
        };
        let elements: Vec<Value> = serde_json::from_slice(&response.body)?;

        Ok(Page { elements, next })
    }

    async fn send(
        &self,
        method: Method,
        target: &str,
        params: Option<&HashMap<String, String>>,
        json: Option<&Value>,
        idempotency_key: Option<&str>,
        merge_defaults: bool,
    ) -> RestResult<HttpResponse> {
        let url = if target.starts_with("http://") || target.starts_with("https://") {
            target.to_string()
        } else {
            format!("{}{}", self.ctx.base_url, target)
        };

        // Default params first, explicit params win on collision.
        let mut merged: HashMap<String, String> = if merge_defaults {
            self.ctx.params.clone()
        } else {
            HashMap::new()
        };
        if let Some(params) = params {
            merged.extend(params.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        let mut query: Vec<(String, String)> = merged.into_iter().collect();
        query.sort();

        let body = json.map(serde_json::to_string).transpose()?;

        let mut headers = vec![
            ("Authorization".to_string(), self.ctx.api_key.clone()),
            ("User-Agent".to_string(), self.ctx.user_agent.clone()),
        ];
        if let Some(version) = &self.ctx.api_version {
            headers.push(("Fintoc-Version".to_string(), version.clone()));
        }
        if method == Method::Post {
            let key = idempotency_key
                .map(str::to_string)
                .unwrap_or_else(|| Uuid::new_v4().to_string());
            headers.push(("Idempotency-Key".to_string(), key));
        }
        if let (Some(signer), Some(raw_body)) = (&self.ctx.signer, &body) {
            if method.is_mutation() {
                headers.push((
                    "Fintoc-JWS-Signature".to_string(),
                    signer.generate_header(raw_body)?,
                ));
            }
        }

        debug!(method = method.as_str(), %url, "sending request");

        let response = self
            .http
            .execute(HttpRequest {
                method,
                url,
                headers,
                query,
                body,
            })
            .await?;

        if !(200..300).contains(&response.status) {
            return Err(Self::translate_error(response));
        }
        Ok(response)
    }

    /// Map a non-2xx response onto the server taxonomy when its body is a
    /// decodable error payload, or keep it opaque otherwise
    fn translate_error(response: HttpResponse) -> FintocError {
        match serde_json::from_slice::<ErrorEnvelope>(&response.body) {
            Ok(envelope) => FintocError::Api(ApiError::from_payload(envelope.error)),
            Err(_) => FintocError::Http {
                status: response.status,
                body: (!response.body.is_empty())
                    .then(|| String::from_utf8_lossy(&response.body).into_owned()),
            },
        }
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport").field("ctx", &self.ctx).finish()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[tokio::test]
    async fn test_base_headers() {
        let client = RecordingClient::new(vec![]);
        let transport = transport_with(Arc::clone(&client));

        transport
            .request(Method::Get, "/v1/links", &HashMap::new(), None, None)
            .await
            .unwrap();

        let request = &client.recorded()[0];
        assert_eq!(request.url, "https://test.com/v1/links");
        assert_eq!(request.header("Authorization"), Some("super_secret_api_key"));
        assert_eq!(request.header("User-Agent"), Some("fintoc-rust/test"));
        assert_eq!(request.header("Fintoc-Version"), None);
        assert_eq!(request.header("Idempotency-Key"), None);
    }

    #[tokio::test]
    async fn test_api_version_header() {
        let client = RecordingClient::new(vec![]);
        let ctx = ClientContext::new(
            "https://test.com",
            "key",
            Some("2023-01-01".to_string()),
            "fintoc-rust/test",
        );
        let transport = Transport::new(Arc::clone(&client) as Arc<dyn HttpClient>, ctx);

        transport
            .request(Method::Get, "/v1/links", &HashMap::new(), None, None)
            .await
            .unwrap();

        assert_eq!(
            client.recorded()[0].header("Fintoc-Version"),
            Some("2023-01-01")
        );
    }

    #[tokio::test]
    async fn test_post_gets_generated_idempotency_key() {
        let client = RecordingClient::new(vec![]);
        let transport = transport_with(Arc::clone(&client));

        transport
            .request(
                Method::Post,
                "/v1/charges",
                &HashMap::new(),
                Some(&serde_json::json!({"amount": 1000})),
                None,
            )
            .await
            .unwrap();

        let key = client.recorded()[0]
            .header("Idempotency-Key")
            .expect("POST must carry an idempotency key")
            .to_string();
        // v4 UUID shape
        assert_eq!(key.len(), 36);
        assert_eq!(key.matches('-').count(), 4);
    }

    #[tokio::test]
    async fn test_caller_supplied_idempotency_key_wins() {
        let client = RecordingClient::new(vec![]);
        let transport = transport_with(Arc::clone(&client));

        transport
            .request(
                Method::Post,
                "/v1/charges",
                &HashMap::new(),
                Some(&serde_json::json!({})),
                Some("my-key"),
            )
            .await
            .unwrap();

        assert_eq!(client.recorded()[0].header("Idempotency-Key"), Some("my-key"));
    }

    #[tokio::test]
    async fn test_explicit_params_win_over_defaults() {
        let client = RecordingClient::new(vec![]);
        let transport = transport_with(Arc::clone(&client)).with_param("link_token", "default");

        let params = HashMap::from([
            ("link_token".to_string(), "explicit".to_string()),
            ("page".to_string(), "2".to_string()),
        ]);
        transport
            .request(Method::Get, "/v1/accounts", &params, None, None)
            .await
            .unwrap();

        let request = &client.recorded()[0];
        assert_eq!(request.query_param("link_token"), Some("explicit"));
        assert_eq!(request.query_param("page"), Some("2"));
    }

    #[tokio::test]
    async fn test_empty_body_decodes_to_empty_object() {
        let client = RecordingClient::new(vec![json_response(204, "")]);
        let transport = transport_with(Arc::clone(&client));

        let value = transport
            .request(Method::Delete, "/v1/links/tok", &HashMap::new(), None, None)
            .await
            .unwrap();
        assert_eq!(value, serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_error_body_is_translated() {
        let body = r#"{"error":{"type":"invalid_request_error","code":"missing_resource","message":"nope"}}"#;
        let client = RecordingClient::new(vec![json_response(404, body)]);
        let transport = transport_with(Arc::clone(&client));

        let err = transport
            .request(Method::Get, "/v1/links/missing", &HashMap::new(), None, None)
            .await
            .unwrap_err();
        assert_eq!(err.api_kind(), Some(crate::error::ApiErrorKind::MissingResource));
    }

    #[tokio::test]
    async fn test_undecodable_error_body_stays_opaque() {
        let client = RecordingClient::new(vec![json_response(502, "<html>bad gateway</html>")]);
        let transport = transport_with(Arc::clone(&client));

        let err = transport
            .request(Method::Get, "/v1/links", &HashMap::new(), None, None)
            .await
            .unwrap_err();
        match err {
            FintocError::Http { status, body } => {
                assert_eq!(status, 502);
                assert!(body.unwrap().contains("bad gateway"));
            }
            other => panic!("expected opaque HTTP error, got {other:?}"),
        }
    }
}
