//! The generic manager engine behind every endpoint family
//!
//! Each endpoint family (`/v1/links`, `/v2/transfers`, ...) is described by a
//! [`ManagerKind`]: its path, the resource kind it yields, and the operations
//! it declares. [`Manager`] implements the CRUD verbs once, generically, and
//! rejects any verb a kind does not declare with an error naming both the
//! manager and the operation. Kinds can override post-operation hooks to
//! rewire scoping (link-token adoption) without touching the engine.

use std::collections::HashMap;
use std::marker::PhantomData;

use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::{FintocError, RestResult};
use crate::paginator::paginate;
use crate::resource::Resource;
use crate::resolver::ResourceKind;
use crate::transport::{Method, Transport};

/// Every verb a manager can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
    Expire,
    Cancel,
    CheckEligibility,
    Return,
    ReceiveTransfer,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Get => "get",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Expire => "expire",
            Self::Cancel => "cancel",
            Self::CheckEligibility => "check_eligibility",
            Self::Return => "return",
            Self::ReceiveTransfer => "receive_transfer",
        }
    }
}

/// Static description of one endpoint family
///
/// The default hooks are identity; kinds that scope their resources (links
/// and everything under a link) override them.
pub trait ManagerKind: Send + Sync + 'static {
    /// Manager name used in error messages, e.g. `LinksManager`
    const NAME: &'static str;
    /// Kind of the resources this manager yields
    const RESOURCE: ResourceKind;
    /// Collection path, possibly with `{placeholder}` segments
    const PATH: &'static str;
    /// Verbs this manager declares
    const OPERATIONS: &'static [Operation];

    /// What callers receive; plain [`Resource`] unless a wrapper adds
    /// sub-managers
    type Output: From<Resource> + Send + 'static;

    fn post_list(transport: &Transport, resource: Resource) -> Resource {
        let _ = transport;
        resource
    }

    fn post_get(transport: &Transport, resource: Resource, identifier: &str) -> Resource {
        let _ = (transport, identifier);
        resource
    }

    fn post_create(transport: &Transport, resource: Resource) -> Resource {
        let _ = transport;
        resource
    }

    fn post_update(transport: &Transport, resource: Resource, identifier: &str) -> Resource {
        let _ = (transport, identifier);
        resource
    }

    fn post_delete(transport: &Transport, identifier: String) -> String {
        let _ = transport;
        identifier
    }
}

/// Endpoint-family handle generic over its [`ManagerKind`]
pub struct Manager<K: ManagerKind> {
    transport: Transport,
    path: String,
    _kind: PhantomData<K>,
}

impl<K: ManagerKind> Clone for Manager<K> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            path: self.path.clone(),
            _kind: PhantomData,
        }
    }
}

impl<K: ManagerKind> std::fmt::Debug for Manager<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(K::NAME).field("path", &self.path).finish()
    }
}

impl<K: ManagerKind> Manager<K> {
    pub(crate) fn new(transport: Transport) -> Self {
        Self::with_path(transport, K::PATH.to_string())
    }

    /// Manager over a concrete path, for sub-managers whose placeholders are
    /// already resolved
    pub(crate) fn with_path(transport: Transport, path: String) -> Self {
        Self {
            transport,
            path,
            _kind: PhantomData,
        }
    }

    pub(crate) fn transport(&self) -> &Transport {
        &self.transport
    }

    pub(crate) fn path(&self) -> &str {
        &self.path
    }

    pub(crate) fn ensure(&self, operation: Operation) -> RestResult<()> {
        if K::OPERATIONS.contains(&operation) {
            return Ok(());
        }
        Err(FintocError::UnsupportedOperation {
            manager: K::NAME,
            operation: operation.as_str(),
        })
    }

    /// Substitute `{placeholder}` path segments from the filters, consuming
    /// the ones used; everything left over becomes query parameters
    fn build_path(&self, filters: &[(&str, &str)]) -> (String, HashMap<String, String>) {
        let mut params: HashMap<String, String> = filters
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let path = self
            .path
            .split('/')
            .map(|segment| {
                segment
                    .strip_prefix('{')
                    .and_then(|s| s.strip_suffix('}'))
                    .and_then(|name| params.remove(name))
                    .unwrap_or_else(|| segment.to_string())
            })
            .collect::<Vec<_>>()
            .join("/");
        (path, params)
    }

    /// Stream the collection lazily, one element at a time
    ///
    /// Pages are fetched only as the stream is polled past them, so
    /// `.take(n)` requests no more pages than `n` needs. A declaration
    /// failure is yielded as the single element of the stream.
    pub fn list(&self, filters: &[(&str, &str)]) -> BoxStream<'static, RestResult<K::Output>> {
        if let Err(err) = self.ensure(Operation::List) {
            return stream::once(async move { Err(err) }).boxed();
        }
        let (path, params) = self.build_path(filters);
        debug!(manager = K::NAME, %path, "listing collection");
        let transport = self.transport.clone();
        paginate(transport.clone(), path.clone(), params)
            .map_ok(move |value| {
                let resource =
                    Resource::hydrate(&transport, K::RESOURCE, value, K::OPERATIONS, &path);
                K::Output::from(K::post_list(&transport, resource))
            })
            .boxed()
    }

    /// Collect the whole collection eagerly
    pub async fn list_all(&self, filters: &[(&str, &str)]) -> RestResult<Vec<K::Output>> {
        self.list(filters).try_collect().await
    }

    #[deprecated(note = "use `list` or `list_all`")]
    pub fn all(&self, filters: &[(&str, &str)]) -> BoxStream<'static, RestResult<K::Output>> {
        self.list(filters)
    }

    /// Fetch one resource by identifier
    #[instrument(skip(self))]
    pub async fn get(&self, identifier: &str, filters: &[(&str, &str)]) -> RestResult<K::Output> {
        self.ensure(Operation::Get)?;
        let (path, params) = self.build_path(filters);
        let value = self
            .transport
            .request(
                Method::Get,
                &format!("{path}/{identifier}"),
                &params,
                None,
                None,
            )
            .await?;
        let resource = Resource::hydrate(&self.transport, K::RESOURCE, value, K::OPERATIONS, &path);
        Ok(K::Output::from(K::post_get(
            &self.transport,
            resource,
            identifier,
        )))
    }

    /// Create a resource
    ///
    /// A caller-supplied idempotency key replaces the generated one.
    #[instrument(skip(self, fields))]
    pub async fn create(
        &self,
        fields: Value,
        idempotency_key: Option<&str>,
    ) -> RestResult<K::Output> {
        self.ensure(Operation::Create)?;
        self.post_to(&self.path, fields, idempotency_key).await
    }

    /// POST to an action path under this manager; callers gate the named
    /// operation themselves
    pub(crate) async fn post_to(
        &self,
        path: &str,
        fields: Value,
        idempotency_key: Option<&str>,
    ) -> RestResult<K::Output> {
        let value = self
            .transport
            .request(
                Method::Post,
                path,
                &HashMap::new(),
                Some(&fields),
                idempotency_key,
            )
            .await?;
        let resource =
            Resource::hydrate(&self.transport, K::RESOURCE, value, K::OPERATIONS, &self.path);
        Ok(K::Output::from(K::post_create(&self.transport, resource)))
    }

    /// Update one resource by identifier, returning the updated copy
    #[instrument(skip(self, fields))]
    pub async fn update(&self, identifier: &str, fields: Value) -> RestResult<K::Output> {
        self.ensure(Operation::Update)?;
        let value = self
            .transport
            .request(
                Method::Patch,
                &format!("{}/{identifier}", self.path),
                &HashMap::new(),
                Some(&fields),
                None,
            )
            .await?;
        let resource =
            Resource::hydrate(&self.transport, K::RESOURCE, value, K::OPERATIONS, &self.path);
        Ok(K::Output::from(K::post_update(
            &self.transport,
            resource,
            identifier,
        )))
    }

    /// Delete one resource by identifier, returning the identifier
    #[instrument(skip(self))]
    pub async fn delete(&self, identifier: &str, filters: &[(&str, &str)]) -> RestResult<String> {
        self.ensure(Operation::Delete)?;
        let (path, params) = self.build_path(filters);
        let result = self
            .transport
            .request(
                Method::Delete,
                &format!("{path}/{identifier}"),
                &params,
                None,
                None,
            )
            .await;
        match result {
            // Some delete endpoints answer with a non-JSON body.
            Ok(_) | Err(FintocError::Decode(_)) => {
                Ok(K::post_delete(&self.transport, identifier.to_string()))
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::testing::{transport_with, RecordingClient};

    struct ReadOnlyKind;

    impl ManagerKind for ReadOnlyKind {
        const NAME: &'static str = "ReadOnlyManager";
        const RESOURCE: ResourceKind = ResourceKind::Movement;
        const PATH: &'static str = "/v2/accounts/{account_id}/movements";
        const OPERATIONS: &'static [Operation] = &[Operation::List, Operation::Get];
        type Output = Resource;
    }

    fn manager() -> Manager<ReadOnlyKind> {
        Manager::new(transport_with(RecordingClient::new(vec![])))
    }

    #[test]
    fn test_build_path_consumes_placeholder_filters() {
        let (path, params) =
            manager().build_path(&[("account_id", "acc_1"), ("since", "2023-01-01")]);
        assert_eq!(path, "/v2/accounts/acc_1/movements");
        assert_eq!(params.len(), 1);
        assert_eq!(params["since"], "2023-01-01");
    }

    #[test]
    fn test_build_path_keeps_unresolved_placeholders() {
        let (path, params) = manager().build_path(&[]);
        assert_eq!(path, "/v2/accounts/{account_id}/movements");
        assert!(params.is_empty());
    }

    #[tokio::test]
    async fn test_undeclared_operation_is_rejected_by_name() {
        let err = manager()
            .create(serde_json::json!({}), None)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "ReadOnlyManager has no operation 'create'"
        );
    }

    #[tokio::test]
    async fn test_list_on_undeclared_manager_yields_one_error() {
        struct NoListKind;
        impl ManagerKind for NoListKind {
            const NAME: &'static str = "NoListManager";
            const RESOURCE: ResourceKind = ResourceKind::Charge;
            const PATH: &'static str = "/v1/charges";
            const OPERATIONS: &'static [Operation] = &[Operation::Get];
            type Output = Resource;
        }
        let manager: Manager<NoListKind> = Manager::new(transport_with(RecordingClient::new(vec![])));
        let results: Vec<_> = manager.list(&[]).collect().await;
        assert_eq!(results.len(), 1);
        assert!(matches!(
            &results[0],
            Err(FintocError::UnsupportedOperation { manager: "NoListManager", operation: "list" })
        ));
    }
}
