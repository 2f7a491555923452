//! Account numbers addressing a treasury account

use crate::manager::{Manager, ManagerKind, Operation};
use crate::resolver::ResourceKind;
use crate::resource::Resource;

pub struct AccountNumbersKind;

impl ManagerKind for AccountNumbersKind {
    const NAME: &'static str = "AccountNumbersManager";
    const RESOURCE: ResourceKind = ResourceKind::AccountNumber;
    const PATH: &'static str = "/v2/account_numbers";
    const OPERATIONS: &'static [Operation] = &[
        Operation::List,
        Operation::Get,
        Operation::Create,
        Operation::Update,
        Operation::Delete,
    ];
    type Output = Resource;
}

pub type AccountNumbersManager = Manager<AccountNumbersKind>;
