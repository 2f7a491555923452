//! Bank accounts under a link

use crate::manager::{Manager, ManagerKind, Operation};
use crate::resolver::ResourceKind;
use crate::resource::Resource;
use crate::resources::Account;
use crate::transport::Transport;

pub struct AccountsKind;

impl ManagerKind for AccountsKind {
    const NAME: &'static str = "AccountsManager";
    const RESOURCE: ResourceKind = ResourceKind::Account;
    const PATH: &'static str = "/v1/accounts";
    const OPERATIONS: &'static [Operation] = &[Operation::List, Operation::Get];
    type Output = Account;

    fn post_list(transport: &Transport, resource: Resource) -> Resource {
        super::adopt_link_token(transport, resource)
    }

    fn post_get(transport: &Transport, resource: Resource, _identifier: &str) -> Resource {
        super::adopt_link_token(transport, resource)
    }
}

pub type AccountsManager = Manager<AccountsKind>;
