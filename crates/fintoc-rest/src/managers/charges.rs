//! Direct charges against enrolled payment methods

use crate::manager::{Manager, ManagerKind, Operation};
use crate::resolver::ResourceKind;
use crate::resource::Resource;

pub struct ChargesKind;

impl ManagerKind for ChargesKind {
    const NAME: &'static str = "ChargesManager";
    const RESOURCE: ResourceKind = ResourceKind::Charge;
    const PATH: &'static str = "/v1/charges";
    const OPERATIONS: &'static [Operation] =
        &[Operation::List, Operation::Get, Operation::Create];
    type Output = Resource;
}

pub type ChargesManager = Manager<ChargesKind>;
