//! Maps identifier text to the handler of its entity kind.

use enola_template::{MatcherChain, MatcherChainBuilder, Params, TemplateError};
use enola_types::Id;
use tracing::debug;

use crate::error::{EnolaError, EnolaResult};

/// Immutable route table; the first template registered that matches wins.
pub struct RouteRegistry<H> {
    chain: MatcherChain<H>,
}

pub struct RouteRegistryBuilder<H> {
    chain: MatcherChainBuilder<H>,
}

impl<H> RouteRegistry<H> {
    pub fn builder() -> RouteRegistryBuilder<H> {
        RouteRegistryBuilder {
            chain: MatcherChain::builder(),
        }
    }

    pub fn resolve(&self, identifier: &str) -> EnolaResult<(&H, Params)> {
        self.chain
            .first_match(identifier)
            .ok_or_else(|| self.not_registered(identifier))
    }

    /// All registered templates, in registration order.
    pub fn templates(&self) -> Vec<String> {
        self.chain.templates()
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub(crate) fn not_registered(&self, identifier: &str) -> EnolaError {
        EnolaError::NotRegistered {
            identifier: identifier.to_string(),
            templates: self.templates(),
        }
    }
}

impl<H: Clone> RouteRegistryBuilder<H> {
    /// Registers the get template of `kind_id` and, for kinds with path
    /// segments, its path-less list template.
    pub fn register(&mut self, kind_id: &Id, handler: H) -> Result<&mut Self, TemplateError> {
        let get = kind_id.to_template();
        let list = kind_id.without_path().to_template();
        if list != get {
            self.chain.add(&get, handler.clone())?;
        }
        self.chain.add(&list, handler)?;
        debug!(kind = %kind_id, "Registered routes");
        Ok(self)
    }
}

impl<H> RouteRegistryBuilder<H> {
    /// Registers a raw template.
    pub fn register_template(
        &mut self,
        template: &str,
        handler: H,
    ) -> Result<&mut Self, TemplateError> {
        self.chain.add(template, handler)?;
        Ok(self)
    }

    pub fn build(self) -> RouteRegistry<H> {
        RouteRegistry {
            chain: self.chain.build(),
        }
    }
}
