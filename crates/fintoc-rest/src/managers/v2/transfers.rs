//! Outbound and inbound transfers between treasury accounts

use serde_json::Value;

use crate::error::RestResult;
use crate::manager::{Manager, ManagerKind, Operation};
use crate::resolver::ResourceKind;
use crate::resource::Resource;

pub struct TransfersKind;

impl ManagerKind for TransfersKind {
    const NAME: &'static str = "TransfersManager";
    const RESOURCE: ResourceKind = ResourceKind::Transfer;
    const PATH: &'static str = "/v2/transfers";
    const OPERATIONS: &'static [Operation] = &[
        Operation::List,
        Operation::Get,
        Operation::Create,
        Operation::Return,
    ];
    type Output = Resource;
}

pub type TransfersManager = Manager<TransfersKind>;

impl TransfersManager {
    /// Return a received transfer to its sender
    pub async fn return_transfer(&self, fields: Value) -> RestResult<Resource> {
        self.ensure(Operation::Return)?;
        let path = format!("{}/return", self.path());
        self.post_to(&path, fields, None).await
    }
}
