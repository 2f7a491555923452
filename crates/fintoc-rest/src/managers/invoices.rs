//! Tax-service invoices under a fiscal link

use crate::manager::{Manager, ManagerKind, Operation};
use crate::resolver::ResourceKind;
use crate::resource::Resource;
use crate::transport::Transport;

pub struct InvoicesKind;

impl ManagerKind for InvoicesKind {
    const NAME: &'static str = "InvoicesManager";
    const RESOURCE: ResourceKind = ResourceKind::Invoice;
    const PATH: &'static str = "/v1/invoices";
    const OPERATIONS: &'static [Operation] = &[Operation::List];
    type Output = Resource;

    fn post_list(transport: &Transport, resource: Resource) -> Resource {
        super::adopt_link_token(transport, resource)
    }
}

pub type InvoicesManager = Manager<InvoicesKind>;
