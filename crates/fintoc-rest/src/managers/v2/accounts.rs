//! Treasury accounts

use crate::manager::{Manager, ManagerKind, Operation};
use crate::resolver::ResourceKind;
use crate::resource::Resource;

use super::movements::{MovementsKind, MovementsManager};

pub struct AccountsKind;

impl ManagerKind for AccountsKind {
    const NAME: &'static str = "AccountsManager";
    const RESOURCE: ResourceKind = ResourceKind::Account;
    const PATH: &'static str = "/v2/accounts";
    const OPERATIONS: &'static [Operation] = &[
        Operation::List,
        Operation::Get,
        Operation::Create,
        Operation::Update,
    ];
    type Output = Resource;
}

pub type AccountsManager = Manager<AccountsKind>;

impl AccountsManager {
    /// Movements of one treasury account
    pub fn movements(&self, account_id: &str) -> MovementsManager {
        Manager::<MovementsKind>::with_path(
            self.transport().clone(),
            format!("{}/{account_id}/movements", self.path()),
        )
    }
}
