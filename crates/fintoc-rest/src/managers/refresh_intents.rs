//! On-demand data refreshes for a link

use crate::manager::{Manager, ManagerKind, Operation};
use crate::resolver::ResourceKind;
use crate::resource::Resource;
use crate::transport::Transport;

pub struct RefreshIntentsKind;

impl ManagerKind for RefreshIntentsKind {
    const NAME: &'static str = "RefreshIntentsManager";
    const RESOURCE: ResourceKind = ResourceKind::RefreshIntent;
    const PATH: &'static str = "/v1/refresh_intents";
    const OPERATIONS: &'static [Operation] =
        &[Operation::List, Operation::Get, Operation::Create];
    type Output = Resource;

    fn post_list(transport: &Transport, resource: Resource) -> Resource {
        super::adopt_link_token(transport, resource)
    }

    fn post_get(transport: &Transport, resource: Resource, _identifier: &str) -> Resource {
        super::adopt_link_token(transport, resource)
    }

    fn post_create(transport: &Transport, resource: Resource) -> Resource {
        super::adopt_link_token(transport, resource)
    }
}

pub type RefreshIntentsManager = Manager<RefreshIntentsKind>;
