//! Hosted checkout sessions

use serde_json::json;

use crate::error::RestResult;
use crate::manager::{Manager, ManagerKind, Operation};
use crate::resolver::ResourceKind;
use crate::resource::Resource;

pub struct CheckoutSessionsKind;

impl ManagerKind for CheckoutSessionsKind {
    const NAME: &'static str = "CheckoutSessionsManager";
    const RESOURCE: ResourceKind = ResourceKind::CheckoutSession;
    const PATH: &'static str = "/v1/checkout_sessions";
    const OPERATIONS: &'static [Operation] = &[
        Operation::Create,
        Operation::Get,
        Operation::Expire,
    ];
    type Output = Resource;
}

pub type CheckoutSessionsManager = Manager<CheckoutSessionsKind>;

impl CheckoutSessionsManager {
    /// Expire a session before its natural timeout
    pub async fn expire(&self, identifier: &str) -> RestResult<Resource> {
        self.ensure(Operation::Expire)?;
        let path = format!("{}/{identifier}/expire", self.path());
        self.post_to(&path, json!({}), None).await
    }
}
