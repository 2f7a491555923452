//! Webhook endpoint registration

use crate::manager::{Manager, ManagerKind, Operation};
use crate::resolver::ResourceKind;
use crate::resource::Resource;

pub struct WebhookEndpointsKind;

impl ManagerKind for WebhookEndpointsKind {
    const NAME: &'static str = "WebhookEndpointsManager";
    const RESOURCE: ResourceKind = ResourceKind::WebhookEndpoint;
    const PATH: &'static str = "/v1/webhook_endpoints";
    const OPERATIONS: &'static [Operation] = &[
        Operation::List,
        Operation::Get,
        Operation::Create,
        Operation::Update,
        Operation::Delete,
    ];
    type Output = Resource;
}

pub type WebhookEndpointsManager = Manager<WebhookEndpointsKind>;
