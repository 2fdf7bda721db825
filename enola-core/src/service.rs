//! The resolution service: identifier text in, entities out.

use enola_model::{ConnectorSpec, Entity, EntityKind, EntityKindRepository};
use enola_types::Id;
use std::sync::Arc;
use tracing::{debug, info};

use crate::aspect::Aspect;
use crate::builtin;
use crate::config::CoreConfig;
use crate::connectors::{ConnectorBindings, ConnectorProvider};
use crate::error::EnolaResult;
use crate::pipeline::AspectPipeline;
use crate::registry::RouteRegistry;

/// Resolves entities of a validated model.
///
/// Built once per model by [`EnolaServiceBuilder`] and immutable afterwards;
/// share it behind an `Arc` to serve several threads.
pub struct EnolaService {
    config: CoreConfig,
    repository: Arc<EntityKindRepository>,
    routes: RouteRegistry<Arc<AspectPipeline>>,
}

impl EnolaService {
    pub fn builder(config: CoreConfig) -> EnolaServiceBuilder {
        EnolaServiceBuilder::new(config)
    }

    /// Resolves one entity, e.g. `demo.foo/abc` or `enola:demo.foo/abc`.
    pub fn get_entity(&self, identifier: &str) -> EnolaResult<Entity> {
        let id = Id::parse(identifier)?;
        let normalized = id.to_string();
        let (pipeline, params) = self.routes.resolve(&normalized)?;
        if pipeline.kind().id.paths().len() != id.paths().len() {
            return Err(self.routes.not_registered(&normalized));
        }
        debug!(id = %normalized, kind = %pipeline.kind().id, ?params, "Resolving entity");
        Ok(pipeline.get(id)?)
    }

    /// Lists all entities of a kind; `identifier` must carry no path.
    pub fn list_entities(&self, identifier: &str) -> EnolaResult<Vec<Entity>> {
        let query = Id::parse(identifier)?;
        let normalized = query.to_string();
        if !query.paths().is_empty() {
            return Err(self.routes.not_registered(&normalized));
        }
        let (pipeline, _) = self.routes.resolve(&normalized)?;
        debug!(query = %normalized, kind = %pipeline.kind().id, "Listing entities");
        Ok(pipeline.list(&query)?)
    }

    /// Registered route templates, in registration order.
    pub fn templates(&self) -> Vec<String> {
        self.routes.templates()
    }

    pub fn repository(&self) -> &EntityKindRepository {
        &self.repository
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }
}

pub struct EnolaServiceBuilder {
    config: CoreConfig,
    kinds: Vec<EntityKind>,
    provider: Box<dyn ConnectorProvider>,
}

impl EnolaServiceBuilder {
    pub fn new(config: CoreConfig) -> Self {
        Self {
            config,
            kinds: Vec::new(),
            provider: Box::new(ConnectorBindings::default()),
        }
    }

    pub fn kind(mut self, kind: EntityKind) -> Self {
        self.kinds.push(kind);
        self
    }

    pub fn kinds(mut self, kinds: impl IntoIterator<Item = EntityKind>) -> Self {
        self.kinds.extend(kinds);
        self
    }

    pub fn connectors(mut self, provider: impl ConnectorProvider + 'static) -> Self {
        self.provider = Box::new(provider);
        self
    }

    /// Validates the model, binds connectors and registers one route pair
    /// per kind, in declaration order.
    pub fn build(self) -> EnolaResult<EnolaService> {
        let mut kinds = self.kinds;
        if self.config.model.expose {
            kinds.push(builtin::entity_kind_kind());
        }
        let repository = Arc::new(EntityKindRepository::from_kinds(kinds)?);

        let mut routes = RouteRegistry::builder();
        for kind in repository.list() {
            let aspects = aspects_for(&self.config, self.provider.as_ref(), kind, &repository)?;
            debug!(kind = %kind.id, aspects = aspects.len(), "Built pipeline");
            let pipeline =
                AspectPipeline::new(Arc::clone(kind), aspects, self.config.list.workers());
            routes.register(&kind.id, Arc::new(pipeline))?;
        }
        let routes = routes.build();

        info!(kinds = repository.len(), routes = routes.len(), "Enola service ready");
        Ok(EnolaService {
            config: self.config,
            repository,
            routes,
        })
    }
}

fn aspects_for(
    config: &CoreConfig,
    provider: &dyn ConnectorProvider,
    kind: &EntityKind,
    repository: &Arc<EntityKindRepository>,
) -> EnolaResult<Vec<Aspect>> {
    let mut aspects = Vec::with_capacity(kind.connectors.len() + 3);
    for spec in &kind.connectors {
        let aspect = match spec {
            ConnectorSpec::Error { message } => Aspect::Error {
                message: message.clone(),
            },
            ConnectorSpec::StoredResource { locator, format } => Aspect::StoredResource {
                locator: locator.clone(),
                format: format.clone(),
                connector: provider.stored_resource(kind, locator, format)?,
            },
            ConnectorSpec::RemoteService { endpoint } => Aspect::RemoteService {
                endpoint: endpoint.clone(),
                connector: provider.remote_service(kind, endpoint)?,
            },
            ConnectorSpec::Custom { handler } if handler == builtin::KIND_CATALOG_HANDLER => {
                Aspect::KindCatalog(Arc::clone(repository))
            }
            ConnectorSpec::Custom { handler } => Aspect::Custom {
                handler: handler.clone(),
                connector: provider.custom(kind, handler)?,
            },
        };
        aspects.push(aspect);
    }

    if config.aspects.links && !kind.links.is_empty() {
        aspects.push(Aspect::Links(kind.links.clone()));
    }
    if config.aspects.timestamp {
        aspects.push(Aspect::Timestamp);
    }
    if config.aspects.validation {
        aspects.push(Aspect::Validation);
    }
    Ok(aspects)
}
