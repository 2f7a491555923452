//! Third-party bank account verifications

use crate::manager::{Manager, ManagerKind, Operation};
use crate::resolver::ResourceKind;
use crate::resource::Resource;

pub struct AccountVerificationsKind;

impl ManagerKind for AccountVerificationsKind {
    const NAME: &'static str = "AccountVerificationsManager";
    const RESOURCE: ResourceKind = ResourceKind::AccountVerification;
    const PATH: &'static str = "/v2/account_verifications";
    const OPERATIONS: &'static [Operation] =
        &[Operation::List, Operation::Get, Operation::Create];
    type Output = Resource;
}

pub type AccountVerificationsManager = Manager<AccountVerificationsKind>;
