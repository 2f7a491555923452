//! Refunds of settled payments

use serde_json::json;

use crate::error::RestResult;
use crate::manager::{Manager, ManagerKind, Operation};
use crate::resolver::ResourceKind;
use crate::resource::Resource;

pub struct RefundsKind;

impl ManagerKind for RefundsKind {
    const NAME: &'static str = "RefundsManager";
    const RESOURCE: ResourceKind = ResourceKind::Refund;
    const PATH: &'static str = "/v1/refunds";
    const OPERATIONS: &'static [Operation] = &[
        Operation::List,
        Operation::Get,
        Operation::Create,
        Operation::Cancel,
    ];
    type Output = Resource;
}

pub type RefundsManager = Manager<RefundsKind>;

impl RefundsManager {
    /// Cancel a refund that has not yet been executed
    pub async fn cancel(&self, identifier: &str) -> RestResult<Resource> {
        self.ensure(Operation::Cancel)?;
        let path = format!("{}/{identifier}/cancel", self.path());
        self.post_to(&path, json!({}), None).await
    }
}
