//! Tax returns under a fiscal link

use crate::manager::{Manager, ManagerKind, Operation};
use crate::resolver::ResourceKind;
use crate::resource::Resource;
use crate::transport::Transport;

pub struct TaxReturnsKind;

impl ManagerKind for TaxReturnsKind {
    const NAME: &'static str = "TaxReturnsManager";
    const RESOURCE: ResourceKind = ResourceKind::TaxReturn;
    const PATH: &'static str = "/v1/tax_returns";
    const OPERATIONS: &'static [Operation] = &[Operation::List, Operation::Get];
    type Output = Resource;

    fn post_list(transport: &Transport, resource: Resource) -> Resource {
        super::adopt_link_token(transport, resource)
    }

    fn post_get(transport: &Transport, resource: Resource, _identifier: &str) -> Resource {
        super::adopt_link_token(transport, resource)
    }
}

pub type TaxReturnsManager = Manager<TaxReturnsKind>;
