//! Legal entities operating treasury accounts

use crate::manager::{Manager, ManagerKind, Operation};
use crate::resolver::ResourceKind;
use crate::resource::Resource;

pub struct EntitiesKind;

impl ManagerKind for EntitiesKind {
    const NAME: &'static str = "EntitiesManager";
    const RESOURCE: ResourceKind = ResourceKind::Entity;
    const PATH: &'static str = "/v2/entities";
    const OPERATIONS: &'static [Operation] = &[Operation::List, Operation::Get];
    type Output = Resource;
}

pub type EntitiesManager = Manager<EntitiesKind>;
