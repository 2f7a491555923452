//! Subscription enrollment flows

use crate::manager::{Manager, ManagerKind, Operation};
use crate::resolver::ResourceKind;
use crate::resource::Resource;

pub struct SubscriptionIntentsKind;

impl ManagerKind for SubscriptionIntentsKind {
    const NAME: &'static str = "SubscriptionIntentsManager";
    const RESOURCE: ResourceKind = ResourceKind::SubscriptionIntent;
    const PATH: &'static str = "/v1/subscription_intents";
    const OPERATIONS: &'static [Operation] =
        &[Operation::List, Operation::Get, Operation::Create];
    type Output = Resource;
}

pub type SubscriptionIntentsManager = Manager<SubscriptionIntentsKind>;
