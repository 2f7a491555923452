//! Links between the API and one user's bank credentials
//!
//! A link is addressed by its token, not its id, and every resource that
//! hangs off a link is fetched with that token as a query parameter. Getting
//! or updating a link therefore rebinds the resource to a transport scoped
//! with `link_token`, so the sub-managers it exposes inherit the scope.

use crate::manager::{Manager, ManagerKind, Operation};
use crate::resolver::ResourceKind;
use crate::resource::Resource;
use crate::resources::Link;
use crate::transport::Transport;

pub struct LinksKind;

fn scope_to_token(transport: &Transport, mut resource: Resource, token: &str) -> Resource {
    resource.set_transport(transport.with_param("link_token", token));
    resource.set_link_token(token);
    resource
}

impl ManagerKind for LinksKind {
    const NAME: &'static str = "LinksManager";
    const RESOURCE: ResourceKind = ResourceKind::Link;
    const PATH: &'static str = "/v1/links";
    const OPERATIONS: &'static [Operation] = &[
        Operation::List,
        Operation::Get,
        Operation::Update,
        Operation::Delete,
    ];
    type Output = Link;

    fn post_get(transport: &Transport, resource: Resource, identifier: &str) -> Resource {
        scope_to_token(transport, resource, identifier)
    }

    fn post_update(transport: &Transport, resource: Resource, identifier: &str) -> Resource {
        scope_to_token(transport, resource, identifier)
    }
}

pub type LinksManager = Manager<LinksKind>;
