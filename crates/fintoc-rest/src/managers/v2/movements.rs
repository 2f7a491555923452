//! Movements of a treasury account

use crate::manager::{Manager, ManagerKind, Operation};
use crate::resolver::ResourceKind;
use crate::resource::Resource;

pub struct MovementsKind;

impl ManagerKind for MovementsKind {
    const NAME: &'static str = "MovementsManager";
    const RESOURCE: ResourceKind = ResourceKind::Movement;
    const PATH: &'static str = "/v2/accounts/{account_id}/movements";
    const OPERATIONS: &'static [Operation] = &[Operation::List, Operation::Get];
    type Output = Resource;
}

pub type MovementsManager = Manager<MovementsKind>;
