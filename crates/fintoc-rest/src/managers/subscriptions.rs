//! Recurring payment subscriptions

use crate::manager::{Manager, ManagerKind, Operation};
use crate::resolver::ResourceKind;
use crate::resource::Resource;

pub struct SubscriptionsKind;

impl ManagerKind for SubscriptionsKind {
    const NAME: &'static str = "SubscriptionsManager";
    const RESOURCE: ResourceKind = ResourceKind::Subscription;
    const PATH: &'static str = "/v1/subscriptions";
    const OPERATIONS: &'static [Operation] = &[Operation::List, Operation::Get];
    type Output = Resource;
}

pub type SubscriptionsManager = Manager<SubscriptionsKind>;
