use enola_types::Id;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Declares one class of entities.
///
/// `id` is in kind form: its path segments name the placeholders of the
/// route template (`demo.bar/{foo}/{name}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityKind {
    pub id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Related kinds by relation name. Only the path-stripped id must name
    /// a known kind; the path may point at a specific instance.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub related: BTreeMap<String, Id>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, DataDecl>,
    /// Link templates by link name. Variables are `path.<segment>`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub links: BTreeMap<String, String>,
    /// Run in this order when an entity of this kind is resolved.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub connectors: Vec<ConnectorSpec>,
}

impl EntityKind {
    pub fn new(id: Id) -> Self {
        Self {
            id,
            label: None,
            related: BTreeMap::new(),
            data: BTreeMap::new(),
            links: BTreeMap::new(),
            connectors: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_related(mut self, name: impl Into<String>, target: Id) -> Self {
        self.related.insert(name.into(), target);
        self
    }

    #[must_use]
    pub fn with_data(mut self, name: impl Into<String>, decl: DataDecl) -> Self {
        self.data.insert(name.into(), decl);
        self
    }

    #[must_use]
    pub fn with_link(mut self, name: impl Into<String>, template: impl Into<String>) -> Self {
        self.links.insert(name.into(), template.into());
        self
    }

    #[must_use]
    pub fn with_connector(mut self, connector: ConnectorSpec) -> Self {
        self.connectors.push(connector);
        self
    }
}

/// Declares one data field of an entity kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataDecl {
    /// Human readable label; mandatory.
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_url: Option<String>,
}

impl DataDecl {
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            type_url: None,
        }
    }

    #[must_use]
    pub fn with_type_url(mut self, type_url: impl Into<String>) -> Self {
        self.type_url = Some(type_url.into());
        self
    }
}

/// How one connector of an entity kind is declared.
///
/// Only `Error` is implemented by the core itself; the other variants are
/// bound to external [`Connector`](crate::Connector) implementations when a
/// service is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectorSpec {
    /// Always fails with `message`. Used to inject failures in tests.
    Error { message: String },
    /// Reads entities from a store, e.g. a directory of YAML files.
    StoredResource { locator: String, format: String },
    /// Delegates to a networked backend.
    RemoteService { endpoint: String },
    /// Opaque handler registered by name.
    Custom { handler: String },
}

impl ConnectorSpec {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn custom(handler: impl Into<String>) -> Self {
        Self::Custom {
            handler: handler.into(),
        }
    }

    /// Short variant name, for diagnostics and logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Error { .. } => "error",
            Self::StoredResource { .. } => "stored_resource",
            Self::RemoteService { .. } => "remote_service",
            Self::Custom { .. } => "custom",
        }
    }
}
