//! One module per endpoint family
//!
//! Each module declares a [`ManagerKind`](crate::manager::ManagerKind) for
//! its family and, where the API exposes named actions (`expire`, `cancel`,
//! ...), adds inherent methods on the corresponding
//! [`Manager`](crate::manager::Manager).

pub mod accounts;
pub mod charges;
pub mod checkout_sessions;
pub mod invoices;
pub mod links;
pub mod movements;
pub mod payment_intents;
pub mod payment_links;
pub mod refresh_intents;
pub mod refunds;
pub mod subscription_intents;
pub mod subscriptions;
pub mod tax_returns;
pub mod v2;
pub mod webhook_endpoints;

use crate::resource::Resource;
use crate::transport::Transport;

/// Stamp a resource with the link token its transport is scoped to
///
/// Managers that operate under a link carry the token as a default query
/// parameter; the resources they yield inherit it so nested lookups stay
/// scoped.
pub(crate) fn adopt_link_token(transport: &Transport, mut resource: Resource) -> Resource {
    if let Some(token) = transport.ctx().params.get("link_token") {
        resource.set_link_token(token.clone());
    }
    resource
}
