//! Hydrated API resources
//!
//! A [`Resource`] is the typed form of one JSON object from the API: every
//! field is classified through the resolver, nested objects become resources
//! of their own, timestamp strings become [`DateTime<Utc>`], and everything
//! else stays a raw scalar. A resource keeps the transport it was fetched
//! through, so the ones that declare `update`/`delete` can act on themselves.

use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use crate::error::{FintocError, RestResult};
use crate::manager::Operation;
use crate::resolver::{self, Resolved, ResourceKind};
use crate::transport::{Method, Transport};

/// One hydrated field of a resource
#[derive(Debug, Clone)]
pub enum Field {
    /// A nested resource
    Resource(Box<Resource>),
    /// A list, each element hydrated on its own
    List(Vec<Field>),
    /// An ISO-8601 timestamp
    DateTime(DateTime<Utc>),
    /// Any other JSON value
    Value(Value),
}

impl Field {
    pub fn as_resource(&self) -> Option<&Resource> {
        match self {
            Self::Resource(resource) => Some(resource),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Field]> {
        match self {
            Self::List(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_value().and_then(Value::as_str)
    }

    /// Back to raw JSON; timestamps serialize as UTC RFC 3339 with a `Z`
    pub fn to_value(&self) -> Value {
        match self {
            Self::Resource(resource) => resource.serialize(),
            Self::List(fields) => Value::Array(fields.iter().map(Field::to_value).collect()),
            Self::DateTime(dt) => {
                Value::String(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            Self::Value(value) => value.clone(),
        }
    }
}

/// A typed API object tied to the transport it came from
#[derive(Debug, Clone)]
pub struct Resource {
    kind: ResourceKind,
    attributes: HashMap<String, Field>,
    transport: Transport,
    operations: &'static [Operation],
    path: String,
    link_token: Option<String>,
}

impl Resource {
    /// Build a resource from a raw JSON object, recursively
    ///
    /// Nested resources share the transport but carry no operations or path:
    /// only top-level resources fetched through a manager can act on
    /// themselves.
    pub(crate) fn hydrate(
        transport: &Transport,
        kind: ResourceKind,
        value: Value,
        operations: &'static [Operation],
        path: &str,
    ) -> Self {
        let raw = match value {
            Value::Object(map) => map,
            other => {
                // Non-object payloads keep their value under a single key.
                let mut map = serde_json::Map::new();
                map.insert("value".to_string(), other);
                map
            }
        };

        let mut attributes = HashMap::with_capacity(raw.len());
        for (name, value) in raw {
            let field = Self::hydrate_field(transport, kind, &name, value);
            attributes.insert(name, field);
        }

        Self {
            kind,
            attributes,
            transport: transport.clone(),
            operations,
            path: path.to_string(),
            link_token: None,
        }
    }

    fn hydrate_field(transport: &Transport, parent: ResourceKind, name: &str, value: Value) -> Field {
        match resolver::resolve(parent, name, &value) {
            Resolved::Resource(kind) => {
                Field::Resource(Box::new(Self::hydrate(transport, kind, value, &[], "")))
            }
            Resolved::ListOf(kind) => {
                let Value::Array(elements) = value else { unreachable!() };
                let fields = elements
                    .into_iter()
                    .map(|element| match element {
                        Value::Object(_) => Field::Resource(Box::new(Self::hydrate(
                            transport,
                            kind,
                            element,
                            &[],
                            "",
                        ))),
                        Value::String(ref raw) => match resolver::parse_iso_datetime(raw) {
                            Some(dt) => Field::DateTime(dt),
                            None => Field::Value(element),
                        },
                        _ => Field::Value(element),
                    })
                    .collect();
                Field::List(fields)
            }
            Resolved::DateTime => {
                let Value::String(raw) = &value else { unreachable!() };
                match resolver::parse_iso_datetime(raw) {
                    Some(dt) => Field::DateTime(dt),
                    None => Field::Value(value),
                }
            }
            Resolved::Scalar => Field::Value(value),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// One attribute by name
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.attributes.get(name)
    }

    /// The `id` attribute, when it is a string
    pub fn id(&self) -> Option<&str> {
        self.get("id").and_then(Field::as_str)
    }

    /// The value that identifies this resource in URLs
    ///
    /// Links are addressed by their token rather than their id.
    pub fn identifier(&self) -> RestResult<String> {
        if self.kind == ResourceKind::Link {
            return self
                .link_token
                .clone()
                .ok_or(FintocError::MissingIdentifier {
                    kind: "link",
                    field: "link_token",
                });
        }
        self.id()
            .map(str::to_string)
            .ok_or(FintocError::MissingIdentifier {
                kind: self.kind.name(),
                field: "id",
            })
    }

    pub fn link_token(&self) -> Option<&str> {
        self.link_token.as_deref()
    }

    pub(crate) fn set_link_token(&mut self, token: impl Into<String>) {
        self.link_token = Some(token.into());
    }

    pub(crate) fn transport(&self) -> &Transport {
        &self.transport
    }

    pub(crate) fn set_transport(&mut self, transport: Transport) {
        self.transport = transport;
    }

    /// Back to the raw JSON shape the API sent
    pub fn serialize(&self) -> Value {
        let map = self
            .attributes
            .iter()
            .map(|(name, field)| (name.clone(), field.to_value()))
            .collect();
        Value::Object(map)
    }

    /// Update this resource on the server, returning the updated copy
    pub async fn update(&self, fields: Value) -> RestResult<Resource> {
        self.ensure(Operation::Update)?;
        let identifier = self.identifier()?;
        let path = format!("{}/{}", self.path, identifier);
        let value = self
            .transport
            .request(Method::Patch, &path, &HashMap::new(), Some(&fields), None)
            .await?;
        let mut updated =
            Resource::hydrate(&self.transport, self.kind, value, self.operations, &self.path);
        if let Some(token) = &self.link_token {
            updated.set_link_token(token.clone());
        }
        Ok(updated)
    }

    /// Delete this resource on the server, returning its identifier
    pub async fn delete(&self) -> RestResult<String> {
        self.ensure(Operation::Delete)?;
        let identifier = self.identifier()?;
        let path = format!("{}/{}", self.path, identifier);
        match self
            .transport
            .request(Method::Delete, &path, &HashMap::new(), None, None)
            .await
        {
            // Some delete endpoints answer with a non-JSON body.
            Ok(_) | Err(FintocError::Decode(_)) => Ok(identifier),
            Err(err) => Err(err),
        }
    }

    fn ensure(&self, operation: Operation) -> RestResult<()> {
        if self.operations.contains(&operation) {
            return Ok(());
        }
        Err(FintocError::UnsupportedOperation {
            manager: self.kind.name(),
            operation: operation.as_str(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::testing::{transport_with, RecordingClient};
    use serde_json::json;

    fn hydrate(kind: ResourceKind, value: Value) -> Resource {
        let transport = transport_with(RecordingClient::new(vec![]));
        Resource::hydrate(&transport, kind, value, &[], "")
    }

    #[test]
    fn test_scalars_stay_raw() {
        let account = hydrate(
            ResourceKind::Account,
            json!({"id": "acc_1", "balance_amount": 4200, "holder_name": "Ada"}),
        );
        assert_eq!(account.id(), Some("acc_1"));
        assert_eq!(
            account.get("balance_amount").unwrap().as_value(),
            Some(&json!(4200))
        );
    }

    #[test]
    fn test_nested_object_becomes_resource() {
        let account = hydrate(
            ResourceKind::Account,
            json!({"id": "acc_1", "institution": {"id": "cl_banco", "country": "cl"}}),
        );
        let institution = account.get("institution").unwrap().as_resource().unwrap();
        assert_eq!(institution.kind(), ResourceKind::Institution);
        assert_eq!(institution.id(), Some("cl_banco"));
    }

    #[test]
    fn test_list_hydrates_per_element() {
        let link = hydrate(
            ResourceKind::Link,
            json!({"accounts": [{"id": "acc_1"}, {"id": "acc_2"}], "tags": ["a", "b"]}),
        );
        let accounts = link.get("accounts").unwrap().as_list().unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[1].as_resource().unwrap().kind(), ResourceKind::Account);
        let tags = link.get("tags").unwrap().as_list().unwrap();
        assert_eq!(tags[0].as_value(), Some(&json!("a")));
    }

    #[test]
    fn test_timestamps_become_datetimes() {
        let movement = hydrate(
            ResourceKind::Movement,
            json!({"id": "mov_1", "post_date": "2023-01-15T10:30:00.123Z"}),
        );
        let dt = movement.get("post_date").unwrap().as_datetime().unwrap();
        assert_eq!(dt.timestamp(), 1673778600);
    }

    #[test]
    fn test_movement_accounts_use_transfer_account_kind() {
        let movement = hydrate(
            ResourceKind::Movement,
            json!({"recipient_account": {"holder_id": "1-9"}, "sender_account": {"holder_id": "2-7"}}),
        );
        for field in ["recipient_account", "sender_account"] {
            let nested = movement.get(field).unwrap().as_resource().unwrap();
            assert_eq!(nested.kind(), ResourceKind::TransferAccount);
        }
    }

    #[test]
    fn test_serialize_roundtrips_the_payload() {
        let payload = json!({
            "id": "mov_1",
            "amount": 59400,
            "post_date": "2023-01-15T10:30:00Z",
            "recipient_account": {"holder_id": "1-9", "institution": {"id": "cl_banco"}},
            "comments": null,
        });
        let movement = hydrate(ResourceKind::Movement, payload.clone());
        assert_eq!(movement.serialize(), payload);
    }

    #[test]
    fn test_identifier_of_link_requires_token() {
        let mut link = hydrate(ResourceKind::Link, json!({"id": "lnk_1"}));
        assert!(matches!(
            link.identifier(),
            Err(FintocError::MissingIdentifier { field: "link_token", .. })
        ));
        link.set_link_token("link_token_abc");
        assert_eq!(link.identifier().unwrap(), "link_token_abc");
    }

    #[test]
    fn test_update_requires_declared_operation() {
        let charge = hydrate(ResourceKind::Charge, json!({"id": "chg_1"}));
        let err = futures::executor::block_on(charge.update(json!({}))).unwrap_err();
        assert!(matches!(err, FintocError::UnsupportedOperation { .. }));
    }
}
