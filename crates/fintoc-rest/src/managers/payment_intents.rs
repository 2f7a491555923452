//! Payment intents: single transfers initiated by the payer

use serde_json::{json, Value};

use crate::error::RestResult;
use crate::manager::{Manager, ManagerKind, Operation};
use crate::resolver::ResourceKind;
use crate::resource::Resource;

pub struct PaymentIntentsKind;

impl ManagerKind for PaymentIntentsKind {
    const NAME: &'static str = "PaymentIntentsManager";
    const RESOURCE: ResourceKind = ResourceKind::PaymentIntent;
    const PATH: &'static str = "/v1/payment_intents";
    const OPERATIONS: &'static [Operation] = &[
        Operation::List,
        Operation::Get,
        Operation::Create,
        Operation::Expire,
        Operation::CheckEligibility,
    ];
    type Output = Resource;
}

pub type PaymentIntentsManager = Manager<PaymentIntentsKind>;

impl PaymentIntentsManager {
    /// Expire a pending intent so it can no longer be paid
    pub async fn expire(&self, identifier: &str) -> RestResult<Resource> {
        self.ensure(Operation::Expire)?;
        let path = format!("{}/{identifier}/expire", self.path());
        self.post_to(&path, json!({}), None).await
    }

    /// Ask which payment methods a prospective payer is eligible for
    pub async fn check_eligibility(&self, fields: Value) -> RestResult<Resource> {
        self.ensure(Operation::CheckEligibility)?;
        let path = format!("{}/check_eligibility", self.path());
        self.post_to(&path, fields, None).await
    }
}
