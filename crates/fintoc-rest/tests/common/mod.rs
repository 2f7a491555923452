//! Common test utilities for integration tests
//!
//! Provides a scripted HTTP client that replays canned API responses and
//! records every request the SDK assembles.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use fintoc_rest::{
    Fintoc, FintocConfig, HttpClient, HttpRequest, HttpResponse, Method, RestResult,
};

pub const BASE_URL: &str = "https://api.test.fintoc.com";
pub const API_KEY: &str = "sk_test_api_key";

/// Route SDK traces to the test output when `RUST_LOG` is set
pub fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

struct Route {
    method: Method,
    url: String,
    response: HttpResponse,
}

/// Scripted API double: routes are matched on method and full URL
pub struct MockApi {
    requests: Mutex<Vec<HttpRequest>>,
    routes: Mutex<Vec<Route>>,
}

impl MockApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            routes: Mutex::new(Vec::new()),
        })
    }

    /// Stub a JSON response for `method` on `BASE_URL + path` (or an
    /// absolute URL)
    pub fn stub(&self, method: Method, path: &str, status: u16, body: &str) {
        self.stub_with_headers(method, path, status, vec![], body);
    }

    pub fn stub_with_headers(
        &self,
        method: Method,
        path: &str,
        status: u16,
        headers: Vec<(String, String)>,
        body: &str,
    ) {
        let url = if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{BASE_URL}{path}")
        };
        self.routes.lock().unwrap().push(Route {
            method,
            url,
            response: HttpResponse {
                status,
                headers,
                body: body.as_bytes().to_vec(),
            },
        });
    }

    /// Stub a paginated collection: one route per page, chained through
    /// `Link` headers
    pub fn stub_pages(&self, path: &str, pages: Vec<Vec<Value>>) {
        let total = pages.len();
        for (index, page) in pages.into_iter().enumerate() {
            let url = if index == 0 {
                path.to_string()
            } else {
                format!("{path}?page={}", index + 1)
            };
            let headers = if index + 1 < total {
                let next = format!("{BASE_URL}{path}?page={}", index + 2);
                vec![("Link".to_string(), format!("<{next}>; rel=\"next\""))]
            } else {
                vec![]
            };
            let body = Value::Array(page).to_string();
            self.stub_with_headers(Method::Get, &url, 200, headers, &body);
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpClient for MockApi {
    async fn execute(&self, request: HttpRequest) -> RestResult<HttpResponse> {
        self.requests.lock().unwrap().push(request.clone());
        let routes = self.routes.lock().unwrap();
        let route = routes
            .iter()
            .find(|route| route.method == request.method && route.url == request.url)
            .unwrap_or_else(|| {
                panic!(
                    "no stub for {} {}",
                    request.method.as_str(),
                    request.url
                )
            });
        Ok(route.response.clone())
    }
}

/// Client wired to a scripted API
pub fn client_with(api: Arc<MockApi>) -> Fintoc {
    init_tracing();
    Fintoc::with_config(
        FintocConfig::new(API_KEY)
            .with_base_url(BASE_URL)
            .with_http_client(api),
    )
}
