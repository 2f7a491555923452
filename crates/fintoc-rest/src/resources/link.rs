//! The link wrapper and its sub-managers

use std::ops::Deref;
use std::sync::OnceLock;

use crate::manager::Manager;
use crate::managers::accounts::AccountsManager;
use crate::managers::invoices::InvoicesManager;
use crate::managers::refresh_intents::RefreshIntentsManager;
use crate::managers::subscriptions::SubscriptionsManager;
use crate::managers::tax_returns::TaxReturnsManager;
use crate::resource::Resource;

/// A link resource plus the managers scoped to it
///
/// A link fetched with `get` carries its token as a default query parameter
/// on its transport; every manager built here inherits that scope, and so do
/// the resources those managers yield. Sub-managers are built once, on first
/// access.
#[derive(Debug, Clone)]
pub struct Link {
    resource: Resource,
    accounts: OnceLock<AccountsManager>,
    subscriptions: OnceLock<SubscriptionsManager>,
    tax_returns: OnceLock<TaxReturnsManager>,
    invoices: OnceLock<InvoicesManager>,
    refresh_intents: OnceLock<RefreshIntentsManager>,
}

impl Link {
    /// Bank accounts under this link
    pub fn accounts(&self) -> &AccountsManager {
        self.accounts
            .get_or_init(|| Manager::new(self.resource.transport().clone()))
    }

    /// Subscriptions paid through this link
    pub fn subscriptions(&self) -> &SubscriptionsManager {
        self.subscriptions
            .get_or_init(|| Manager::new(self.resource.transport().clone()))
    }

    /// Tax returns filed by this link's holder
    pub fn tax_returns(&self) -> &TaxReturnsManager {
        self.tax_returns
            .get_or_init(|| Manager::new(self.resource.transport().clone()))
    }

    /// Invoices issued to or by this link's holder
    pub fn invoices(&self) -> &InvoicesManager {
        self.invoices
            .get_or_init(|| Manager::new(self.resource.transport().clone()))
    }

    /// Refresh intents for this link
    pub fn refresh_intents(&self) -> &RefreshIntentsManager {
        self.refresh_intents
            .get_or_init(|| Manager::new(self.resource.transport().clone()))
    }

    pub fn into_resource(self) -> Resource {
        self.resource
    }
}

impl From<Resource> for Link {
    fn from(resource: Resource) -> Self {
        Self {
            resource,
            accounts: OnceLock::new(),
            subscriptions: OnceLock::new(),
            tax_returns: OnceLock::new(),
            invoices: OnceLock::new(),
            refresh_intents: OnceLock::new(),
        }
    }
}

impl Deref for Link {
    type Target = Resource;

    fn deref(&self) -> &Resource {
        &self.resource
    }
}
