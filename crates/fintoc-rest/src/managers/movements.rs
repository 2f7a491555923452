//! Movements of a bank account, scoped to a link

use crate::manager::{Manager, ManagerKind, Operation};
use crate::resolver::ResourceKind;
use crate::resource::Resource;
use crate::transport::Transport;

pub struct MovementsKind;

impl ManagerKind for MovementsKind {
    const NAME: &'static str = "MovementsManager";
    const RESOURCE: ResourceKind = ResourceKind::Movement;
    const PATH: &'static str = "/v1/accounts/{account_id}/movements";
    const OPERATIONS: &'static [Operation] = &[Operation::List, Operation::Get];
    type Output = Resource;

    fn post_list(transport: &Transport, resource: Resource) -> Resource {
        super::adopt_link_token(transport, resource)
    }

    fn post_get(transport: &Transport, resource: Resource, _identifier: &str) -> Resource {
        super::adopt_link_token(transport, resource)
    }
}

pub type MovementsManager = Manager<MovementsKind>;
