use chrono::{DateTime, Utc};
use enola_types::Id;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A resolved entity.
///
/// Produced by running an entity kind's connectors over an
/// [`EntityBuilder`]; read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    id: Id,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    links: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    data: BTreeMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    related: BTreeMap<String, Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ts: Option<DateTime<Utc>>,
}

impl Entity {
    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn links(&self) -> &BTreeMap<String, String> {
        &self.links
    }

    pub fn link(&self, name: &str) -> Option<&str> {
        self.links.get(name).map(String::as_str)
    }

    pub fn data(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.data
    }

    /// Extract a value from one data field using a JSON pointer (e.g., "/title").
    pub fn data_pointer(&self, name: &str, pointer: &str) -> Option<&serde_json::Value> {
        self.data.get(name).and_then(|v| v.pointer(pointer))
    }

    pub fn related(&self) -> &BTreeMap<String, Id> {
        &self.related
    }

    pub fn ts(&self) -> Option<DateTime<Utc>> {
        self.ts
    }
}

/// The accumulator connectors write into while an entity is resolved.
///
/// One builder is shared by all connectors of one pipeline run, so a
/// connector sees everything earlier connectors set.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityBuilder {
    id: Id,
    links: BTreeMap<String, String>,
    data: BTreeMap<String, serde_json::Value>,
    related: BTreeMap<String, Id>,
    ts: Option<DateTime<Utc>>,
}

impl EntityBuilder {
    pub fn new(id: Id) -> Self {
        Self {
            id,
            links: BTreeMap::new(),
            data: BTreeMap::new(),
            related: BTreeMap::new(),
            ts: None,
        }
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn put_link(&mut self, name: impl Into<String>, uri: impl Into<String>) -> &mut Self {
        self.links.insert(name.into(), uri.into());
        self
    }

    pub fn link(&self, name: &str) -> Option<&str> {
        self.links.get(name).map(String::as_str)
    }

    pub fn links(&self) -> &BTreeMap<String, String> {
        &self.links
    }

    pub fn put_data(&mut self, name: impl Into<String>, value: serde_json::Value) -> &mut Self {
        self.data.insert(name.into(), value);
        self
    }

    pub fn data(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.data
    }

    pub fn put_related(&mut self, name: impl Into<String>, target: Id) -> &mut Self {
        self.related.insert(name.into(), target);
        self
    }

    pub fn related(&self) -> &BTreeMap<String, Id> {
        &self.related
    }

    pub fn set_ts(&mut self, ts: DateTime<Utc>) -> &mut Self {
        self.ts = Some(ts);
        self
    }

    pub fn ts(&self) -> Option<DateTime<Utc>> {
        self.ts
    }

    pub fn build(self) -> Entity {
        Entity {
            id: self.id,
            links: self.links,
            data: self.data,
            related: self.related,
            ts: self.ts,
        }
    }
}
