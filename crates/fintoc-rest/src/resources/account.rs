//! The bank account wrapper and its movements

use std::ops::Deref;
use std::sync::OnceLock;

use crate::error::RestResult;
use crate::manager::Manager;
use crate::managers::movements::{MovementsKind, MovementsManager};
use crate::resource::Resource;

/// A bank account plus its lazily built movements manager
#[derive(Debug, Clone)]
pub struct Account {
    resource: Resource,
    movements: OnceLock<MovementsManager>,
}

impl Account {
    /// Movements of this account, scoped to the same link
    ///
    /// Fails with [`FintocError::MissingIdentifier`](crate::FintocError) if
    /// the account payload carried no `id` to build the path from.
    pub fn movements(&self) -> RestResult<&MovementsManager> {
        let id = self.resource.identifier()?;
        Ok(self.movements.get_or_init(|| {
            Manager::<MovementsKind>::with_path(
                self.resource.transport().clone(),
                format!("/v1/accounts/{id}/movements"),
            )
        }))
    }

    pub fn into_resource(self) -> Resource {
        self.resource
    }
}

impl From<Resource> for Account {
    fn from(resource: Resource) -> Self {
        Self {
            resource,
            movements: OnceLock::new(),
        }
    }
}

impl Deref for Account {
    type Target = Resource;

    fn deref(&self) -> &Resource {
        &self.resource
    }
}
