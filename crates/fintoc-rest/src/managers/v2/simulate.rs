//! Sandbox-only simulation endpoints

use serde_json::Value;

use crate::error::RestResult;
use crate::manager::{Manager, ManagerKind, Operation};
use crate::resolver::ResourceKind;
use crate::resource::Resource;

pub struct SimulateKind;

impl ManagerKind for SimulateKind {
    const NAME: &'static str = "SimulateManager";
    const RESOURCE: ResourceKind = ResourceKind::Transfer;
    const PATH: &'static str = "/v2/simulate";
    const OPERATIONS: &'static [Operation] = &[Operation::ReceiveTransfer];
    type Output = Resource;
}

pub type SimulateManager = Manager<SimulateKind>;

impl SimulateManager {
    /// Simulate an incoming transfer into a sandbox account
    pub async fn receive_transfer(&self, fields: Value) -> RestResult<Resource> {
        self.ensure(Operation::ReceiveTransfer)?;
        let path = format!("{}/receive_transfer", self.path());
        self.post_to(&path, fields, None).await
    }
}
