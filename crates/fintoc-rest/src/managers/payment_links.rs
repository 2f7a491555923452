//! Shareable payment links

use serde_json::json;

use crate::error::RestResult;
use crate::manager::{Manager, ManagerKind, Operation};
use crate::resolver::ResourceKind;
use crate::resource::Resource;

pub struct PaymentLinksKind;

impl ManagerKind for PaymentLinksKind {
    const NAME: &'static str = "PaymentLinksManager";
    const RESOURCE: ResourceKind = ResourceKind::PaymentLink;
    const PATH: &'static str = "/v1/payment_links";
    const OPERATIONS: &'static [Operation] = &[
        Operation::List,
        Operation::Get,
        Operation::Create,
        Operation::Cancel,
    ];
    type Output = Resource;
}

pub type PaymentLinksManager = Manager<PaymentLinksKind>;

impl PaymentLinksManager {
    /// Cancel a link so it stops accepting payments
    pub async fn cancel(&self, identifier: &str) -> RestResult<Resource> {
        self.ensure(Operation::Cancel)?;
        let path = format!("{}/{identifier}/cancel", self.path());
        self.post_to(&path, json!({}), None).await
    }
}
