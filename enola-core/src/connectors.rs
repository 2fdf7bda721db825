//! Binding declared connectors to implementations.

use enola_model::{Connector, EntityKind};
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{EnolaError, EnolaResult};

/// Supplies the [`Connector`] behind each externally implemented
/// connector declaration. Every method fails with
/// [`EnolaError::UnboundConnector`] unless overridden.
pub trait ConnectorProvider {
    fn stored_resource(
        &self,
        kind: &EntityKind,
        locator: &str,
        format: &str,
    ) -> EnolaResult<Arc<dyn Connector>> {
        let _ = format;
        Err(unbound(kind, "stored_resource", locator))
    }

    fn remote_service(&self, kind: &EntityKind, endpoint: &str) -> EnolaResult<Arc<dyn Connector>> {
        Err(unbound(kind, "remote_service", endpoint))
    }

    fn custom(&self, kind: &EntityKind, handler: &str) -> EnolaResult<Arc<dyn Connector>> {
        Err(unbound(kind, "custom", handler))
    }
}

fn unbound(kind: &EntityKind, connector: &'static str, target: &str) -> EnolaError {
    EnolaError::UnboundConnector {
        kind: kind.id.to_string(),
        connector,
        target: target.to_string(),
    }
}

type StoreFactory = Arc<dyn Fn(&str) -> Arc<dyn Connector> + Send + Sync>;

/// Map-backed [`ConnectorProvider`].
///
/// Custom connectors are bound by handler name, remote services by
/// endpoint, and stored resources by format through a factory that
/// receives the locator.
#[derive(Default, Clone)]
pub struct ConnectorBindings {
    custom: HashMap<String, Arc<dyn Connector>>,
    remote: HashMap<String, Arc<dyn Connector>>,
    stores: HashMap<String, StoreFactory>,
}

impl ConnectorBindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind_custom(
        mut self,
        handler: impl Into<String>,
        connector: Arc<dyn Connector>,
    ) -> Self {
        self.custom.insert(handler.into(), connector);
        self
    }

    pub fn bind_remote(
        mut self,
        endpoint: impl Into<String>,
        connector: Arc<dyn Connector>,
    ) -> Self {
        self.remote.insert(endpoint.into(), connector);
        self
    }

    pub fn bind_store<F>(mut self, format: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&str) -> Arc<dyn Connector> + Send + Sync + 'static,
    {
        self.stores.insert(format.into(), Arc::new(factory));
        self
    }
}

impl ConnectorProvider for ConnectorBindings {
    fn stored_resource(
        &self,
        kind: &EntityKind,
        locator: &str,
        format: &str,
    ) -> EnolaResult<Arc<dyn Connector>> {
        self.stores
            .get(format)
            .map(|factory| factory(locator))
            .ok_or_else(|| unbound(kind, "stored_resource", locator))
    }

    fn remote_service(&self, kind: &EntityKind, endpoint: &str) -> EnolaResult<Arc<dyn Connector>> {
        self.remote
            .get(endpoint)
            .cloned()
            .ok_or_else(|| unbound(kind, "remote_service", endpoint))
    }

    fn custom(&self, kind: &EntityKind, handler: &str) -> EnolaResult<Arc<dyn Connector>> {
        self.custom
            .get(handler)
            .cloned()
            .ok_or_else(|| unbound(kind, "custom", handler))
    }
}
