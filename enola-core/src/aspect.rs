//! The steps of an entity kind's resolution pipeline.

use chrono::Utc;
use enola_model::{
    Connector, ConnectorError, EntityBuilder, EntityKind, EntityKindRepository, Listing,
};
use enola_template::expand;
use enola_types::{path_map, Id};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::builtin;

/// One step of a pipeline.
///
/// The kind's declared connectors come first, followed by the built-in
/// aspects enabled in [`CoreConfig`](crate::CoreConfig).
pub enum Aspect {
    /// Always fails with `message`.
    Error { message: String },
    StoredResource {
        locator: String,
        format: String,
        connector: Arc<dyn Connector>,
    },
    RemoteService {
        endpoint: String,
        connector: Arc<dyn Connector>,
    },
    Custom {
        handler: String,
        connector: Arc<dyn Connector>,
    },
    /// Serves the model itself as `enola.entity_kind` entities.
    KindCatalog(Arc<EntityKindRepository>),
    /// Link name to RFC 6570 template over `path.<segment>` variables.
    Links(BTreeMap<String, String>),
    Timestamp,
    Validation,
}

impl Aspect {
    pub fn name(&self) -> &'static str {
        match self {
            Aspect::Error { .. } => "error",
            Aspect::StoredResource { .. } => "stored_resource",
            Aspect::RemoteService { .. } => "remote_service",
            Aspect::Custom { .. } => "custom",
            Aspect::KindCatalog(_) => "kind_catalog",
            Aspect::Links(_) => "links",
            Aspect::Timestamp => "timestamp",
            Aspect::Validation => "validation",
        }
    }

    /// Contributes to one entity.
    pub fn augment(
        &self,
        entity: &mut EntityBuilder,
        kind: &EntityKind,
    ) -> Result<(), ConnectorError> {
        match self {
            Aspect::Error { message } => Err(ConnectorError::new(message.clone())),
            Aspect::StoredResource { connector, .. }
            | Aspect::RemoteService { connector, .. }
            | Aspect::Custom { connector, .. } => connector.augment(entity, kind),
            Aspect::KindCatalog(repository) => describe_kind(repository, entity),
            Aspect::Links(templates) => expand_links(templates, entity, kind),
            Aspect::Timestamp => {
                if entity.ts().is_none() {
                    entity.set_ts(Utc::now());
                }
                Ok(())
            }
            Aspect::Validation => check_declared(entity, kind),
        }
    }

    /// Lists entities in batch, or defers to per-entity [`Aspect::augment`].
    pub fn list(
        &self,
        query: &Id,
        kind: &EntityKind,
        entities: &mut Vec<EntityBuilder>,
    ) -> Result<Listing, ConnectorError> {
        match self {
            Aspect::Error { message } => Err(ConnectorError::new(message.clone())),
            Aspect::StoredResource { connector, .. }
            | Aspect::RemoteService { connector, .. }
            | Aspect::Custom { connector, .. } => connector.list(query, kind, entities),
            Aspect::KindCatalog(repository) => {
                for described in repository.list() {
                    let id = kind.id.with_paths([described.id.without_path().to_string()]);
                    let mut entity = EntityBuilder::new(id);
                    describe_kind(repository, &mut entity)?;
                    entities.push(entity);
                }
                Ok(Listing::Batched)
            }
            Aspect::Links(_) | Aspect::Timestamp | Aspect::Validation => Ok(Listing::PerEntity),
        }
    }
}

impl fmt::Debug for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Aspect::Error { message } => f.debug_struct("Error").field("message", message).finish(),
            Aspect::StoredResource { locator, format, .. } => f
                .debug_struct("StoredResource")
                .field("locator", locator)
                .field("format", format)
                .finish_non_exhaustive(),
            Aspect::RemoteService { endpoint, .. } => f
                .debug_struct("RemoteService")
                .field("endpoint", endpoint)
                .finish_non_exhaustive(),
            Aspect::Custom { handler, .. } => f
                .debug_struct("Custom")
                .field("handler", handler)
                .finish_non_exhaustive(),
            Aspect::KindCatalog(repository) => f
                .debug_tuple("KindCatalog")
                .field(&repository.len())
                .finish(),
            Aspect::Links(templates) => f.debug_tuple("Links").field(templates).finish(),
            Aspect::Timestamp => f.write_str("Timestamp"),
            Aspect::Validation => f.write_str("Validation"),
        }
    }
}

fn describe_kind(
    repository: &EntityKindRepository,
    entity: &mut EntityBuilder,
) -> Result<(), ConnectorError> {
    let Some(name) = entity.id().paths().first() else {
        return Err(ConnectorError::new(format!(
            "{} does not name an entity kind",
            entity.id()
        )));
    };
    let target = Id::parse(name).map_err(|e| {
        ConnectorError::with_source(format!("{} is not an entity kind ID", name), e)
    })?;
    let described = repository
        .get(&target)
        .ok_or_else(|| ConnectorError::new(format!("unknown entity kind {}", target)))?;
    let schema = serde_json::to_value(described.as_ref())
        .map_err(|e| ConnectorError::with_source(format!("cannot serialize {}", target), e))?;
    entity.put_data(builtin::SCHEMA_DATA, schema);
    Ok(())
}

fn expand_links(
    templates: &BTreeMap<String, String>,
    entity: &mut EntityBuilder,
    kind: &EntityKind,
) -> Result<(), ConnectorError> {
    let variables: BTreeMap<String, String> = path_map(&kind.id, entity.id())
        .map_err(|e| ConnectorError::with_source(e.to_string(), e))?
        .into_iter()
        .map(|(name, value)| (format!("path.{name}"), value))
        .collect();

    for (name, template) in templates {
        let uri = expand(template, &variables).map_err(|e| {
            ConnectorError::with_source(format!("link {} of {}: {}", name, kind.id, e), e)
        })?;
        entity.put_link(name.as_str(), uri);
    }
    Ok(())
}

fn check_declared(entity: &EntityBuilder, kind: &EntityKind) -> Result<(), ConnectorError> {
    let mut unknown: Vec<String> = Vec::new();
    unknown.extend(
        entity
            .links()
            .keys()
            .filter(|k| !kind.links.contains_key(*k))
            .map(|k| format!("link {k}")),
    );
    unknown.extend(
        entity
            .data()
            .keys()
            .filter(|k| !kind.data.contains_key(*k))
            .map(|k| format!("data {k}")),
    );
    unknown.extend(
        entity
            .related()
            .keys()
            .filter(|k| !kind.related.contains_key(*k))
            .map(|k| format!("related {k}")),
    );

    if unknown.is_empty() {
        Ok(())
    } else {
        Err(ConnectorError::new(format!(
            "{} has keys not declared by kind {}: {}",
            entity.id(),
            kind.id,
            unknown.join(", ")
        )))
    }
}
