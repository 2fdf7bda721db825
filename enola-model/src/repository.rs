//! Validated, immutable collection of entity kinds.

use crate::validation::{validate, ValidationError, ValidationState};
use crate::EntityKind;
use enola_types::Id;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The entity kinds of one model, in declaration order.
///
/// Only obtainable through [`EntityKindRepositoryBuilder::build`], so every
/// repository has passed validation. A changed model means a new repository.
#[derive(Debug, Clone, Default)]
pub struct EntityKindRepository {
    kinds: Vec<Arc<EntityKind>>,
    index: HashMap<Id, usize>,
}

/// Collects kinds and validates them as one model.
#[derive(Debug)]
pub struct EntityKindRepositoryBuilder {
    kinds: Vec<EntityKind>,
    state: ValidationState,
}

impl EntityKindRepository {
    pub fn builder() -> EntityKindRepositoryBuilder {
        EntityKindRepositoryBuilder {
            kinds: Vec::new(),
            state: ValidationState::Unvalidated,
        }
    }

    /// Validates `kinds` and builds a repository from them.
    pub fn from_kinds(
        kinds: impl IntoIterator<Item = EntityKind>,
    ) -> Result<Self, ValidationError> {
        let mut builder = Self::builder();
        for kind in kinds {
            builder.add(kind);
        }
        builder.build()
    }

    /// Looks up a kind by id; path segments of `id` are ignored.
    pub fn get(&self, id: &Id) -> Option<&Arc<EntityKind>> {
        self.index.get(&id.without_path()).map(|&i| &self.kinds[i])
    }

    pub fn list(&self) -> &[Arc<EntityKind>] {
        &self.kinds
    }

    /// Kind-form ids of all kinds, in declaration order.
    pub fn list_ids(&self) -> Vec<Id> {
        self.kinds.iter().map(|k| k.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl EntityKindRepositoryBuilder {
    /// Adds a kind. Any earlier validation result is discarded.
    pub fn add(&mut self, kind: EntityKind) -> &mut Self {
        self.kinds.push(kind);
        self.state = ValidationState::Unvalidated;
        self
    }

    pub fn state(&self) -> ValidationState {
        self.state
    }

    /// Runs all validation passes over the collected kinds.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        self.state = ValidationState::Validating;
        debug!(kinds = self.kinds.len(), "Validating model");

        let diagnostics = validate(&self.kinds);
        if diagnostics.is_empty() {
            self.state = ValidationState::Valid;
            Ok(())
        } else {
            self.state = ValidationState::Rejected;
            warn!(diagnostics = diagnostics.len(), "Model rejected");
            Err(ValidationError { diagnostics })
        }
    }

    /// Validates (unless already valid) and builds the repository.
    pub fn build(mut self) -> Result<EntityKindRepository, ValidationError> {
        if self.state != ValidationState::Valid {
            self.validate()?;
        }

        let kinds: Vec<Arc<EntityKind>> = self.kinds.into_iter().map(Arc::new).collect();
        let index = kinds
            .iter()
            .enumerate()
            .map(|(i, kind)| (kind.id.without_path(), i))
            .collect();

        info!(kinds = kinds.len(), "Entity kind repository built");
        Ok(EntityKindRepository { kinds, index })
    }
}
