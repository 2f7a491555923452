//! The top-level client and its configuration

use std::sync::Arc;

use tracing::info;

use fintoc_auth::JwsSigner;

use crate::context::ClientContext;
use crate::error::{FintocError, RestResult};
use crate::manager::Manager;
use crate::managers::charges::ChargesManager;
use crate::managers::checkout_sessions::CheckoutSessionsManager;
use crate::managers::links::LinksManager;
use crate::managers::payment_intents::PaymentIntentsManager;
use crate::managers::payment_links::PaymentLinksManager;
use crate::managers::refunds::RefundsManager;
use crate::managers::subscription_intents::SubscriptionIntentsManager;
use crate::managers::subscriptions::SubscriptionsManager;
use crate::managers::v2;
use crate::managers::webhook_endpoints::WebhookEndpointsManager;
use crate::transport::{HttpClient, ReqwestClient, Transport};

const DEFAULT_BASE_URL: &str = "https://api.fintoc.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const API_KEY_ENV_VAR: &str = "FINTOC_API_KEY";

fn default_user_agent() -> String {
    format!("fintoc-rust/{}", env!("CARGO_PKG_VERSION"))
}

/// Client configuration with builder-style setters
#[derive(Clone)]
pub struct FintocConfig {
    api_key: String,
    base_url: String,
    api_version: Option<String>,
    user_agent: String,
    timeout_secs: u64,
    signer: Option<Arc<JwsSigner>>,
    http_client: Option<Arc<dyn HttpClient>>,
}

impl FintocConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: None,
            user_agent: default_user_agent(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            signer: None,
            http_client: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Pin requests to an API version via the `Fintoc-Version` header
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Sign mutating request bodies with this JWS key
    pub fn with_signer(mut self, signer: JwsSigner) -> Self {
        self.signer = Some(Arc::new(signer));
        self
    }

    /// Substitute the HTTP client, e.g. with a recording one in tests
    pub fn with_http_client(mut self, http_client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(http_client);
        self
    }
}

impl std::fmt::Debug for FintocConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FintocConfig")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("user_agent", &self.user_agent)
            .field("timeout_secs", &self.timeout_secs)
            .field("signer", &self.signer.is_some())
            .finish()
    }
}

/// The Fintoc API client
///
/// Every endpoint family is a field; managers are cheap handles over a
/// shared transport, so the client can be cloned freely.
///
/// ```no_run
/// use fintoc_rest::Fintoc;
///
/// # async fn run() -> Result<(), fintoc_rest::FintocError> {
/// let fintoc = Fintoc::new("sk_test_...");
/// let link = fintoc.links.get("link_token_...", &[]).await?;
/// let accounts = link.accounts().list_all(&[]).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Fintoc {
    pub links: LinksManager,
    pub webhook_endpoints: WebhookEndpointsManager,
    pub payment_intents: PaymentIntentsManager,
    pub charges: ChargesManager,
    pub checkout_sessions: CheckoutSessionsManager,
    pub payment_links: PaymentLinksManager,
    pub refunds: RefundsManager,
    pub subscriptions: SubscriptionsManager,
    pub subscription_intents: SubscriptionIntentsManager,
    pub v2: V2,
}

/// Managers for the v2 (treasury) surface
#[derive(Debug, Clone)]
pub struct V2 {
    pub transfers: v2::transfers::TransfersManager,
    pub accounts: v2::accounts::AccountsManager,
    pub account_numbers: v2::account_numbers::AccountNumbersManager,
    pub account_verifications: v2::account_verifications::AccountVerificationsManager,
    pub entities: v2::entities::EntitiesManager,
    pub simulate: v2::simulate::SimulateManager,
}

impl Fintoc {
    /// Client with default configuration
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_config(FintocConfig::new(api_key))
    }

    /// Client keyed from the `FINTOC_API_KEY` environment variable
    pub fn from_env() -> RestResult<Self> {
        let api_key = std::env::var(API_KEY_ENV_VAR)
            .map_err(|_| FintocError::EnvVarNotSet(API_KEY_ENV_VAR.to_string()))?;
        Ok(Self::new(api_key))
    }

    pub fn with_config(config: FintocConfig) -> Self {
        let http = config
            .http_client
            .unwrap_or_else(|| Arc::new(ReqwestClient::with_timeout(config.timeout_secs)));
        let mut ctx = ClientContext::new(
            config.base_url,
            config.api_key,
            config.api_version,
            config.user_agent,
        );
        if let Some(signer) = config.signer {
            ctx = ctx.with_signer(signer);
        }

        info!(base_url = %ctx.base_url, "Fintoc client initialized");

        let transport = Transport::new(http, ctx);
        Self {
            links: Manager::new(transport.clone()),
            webhook_endpoints: Manager::new(transport.clone()),
            payment_intents: Manager::new(transport.clone()),
            charges: Manager::new(transport.clone()),
            checkout_sessions: Manager::new(transport.clone()),
            payment_links: Manager::new(transport.clone()),
            refunds: Manager::new(transport.clone()),
            subscriptions: Manager::new(transport.clone()),
            subscription_intents: Manager::new(transport.clone()),
            v2: V2 {
                transfers: Manager::new(transport.clone()),
                accounts: Manager::new(transport.clone()),
                account_numbers: Manager::new(transport.clone()),
                account_verifications: Manager::new(transport.clone()),
                entities: Manager::new(transport.clone()),
                simulate: Manager::new(transport),
            },
        }
    }
}
