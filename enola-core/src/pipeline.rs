//! Runs a kind's aspects over entities.

use enola_model::{ConnectorError, Entity, EntityBuilder, EntityKind, Listing};
use enola_types::Id;
use std::sync::Arc;
use std::thread;
use tracing::debug;

use crate::aspect::Aspect;

/// The ordered aspects of one entity kind.
#[derive(Debug)]
pub struct AspectPipeline {
    kind: Arc<EntityKind>,
    aspects: Vec<Aspect>,
    workers: usize,
}

impl AspectPipeline {
    pub fn new(kind: Arc<EntityKind>, aspects: Vec<Aspect>, workers: usize) -> Self {
        Self {
            kind,
            aspects,
            workers: workers.max(1),
        }
    }

    pub fn kind(&self) -> &Arc<EntityKind> {
        &self.kind
    }

    pub fn aspects(&self) -> &[Aspect] {
        &self.aspects
    }

    /// Resolves one entity. The first failing aspect aborts the run and no
    /// partial entity is returned.
    pub fn get(&self, id: Id) -> Result<Entity, ConnectorError> {
        let builder = self
            .aspects
            .iter()
            .try_fold(EntityBuilder::new(id), |mut builder, aspect| {
                aspect.augment(&mut builder, &self.kind).inspect_err(|e| {
                    debug!(id = %builder.id(), aspect = aspect.name(), error = %e, "Aspect failed");
                })?;
                Ok(builder)
            })?;
        Ok(builder.build())
    }

    /// Lists the entities matching `query`.
    ///
    /// Candidates come from aspects that list in batch; every other aspect
    /// augments the candidates enumerated so far, one by one.
    pub fn list(&self, query: &Id) -> Result<Vec<Entity>, ConnectorError> {
        let candidates = self
            .aspects
            .iter()
            .try_fold(Vec::new(), |mut candidates, aspect| {
                match aspect.list(query, &self.kind, &mut candidates)? {
                    Listing::Batched => {}
                    Listing::PerEntity => self.augment_each(aspect, &mut candidates)?,
                }
                Ok(candidates)
            })?;
        debug!(query = %query, count = candidates.len(), "Listed entities");
        Ok(candidates.into_iter().map(EntityBuilder::build).collect())
    }

    fn augment_each(
        &self,
        aspect: &Aspect,
        candidates: &mut [EntityBuilder],
    ) -> Result<(), ConnectorError> {
        let kind = self.kind.as_ref();
        if self.workers == 1 || candidates.len() < 2 {
            return candidates.iter_mut().try_for_each(|c| aspect.augment(c, kind));
        }

        let chunk_size = candidates.len().div_ceil(self.workers);
        thread::scope(|s| {
            let handles: Vec<_> = candidates
                .chunks_mut(chunk_size)
                .map(|chunk| {
                    s.spawn(move || chunk.iter_mut().try_for_each(|c| aspect.augment(c, kind)))
                })
                .collect();

            // Joined in chunk order, so the earliest failing candidate wins.
            handles
                .into_iter()
                .map(|handle| {
                    handle.join().unwrap_or_else(|_| {
                        Err(ConnectorError::new(format!(
                            "{} aspect panicked while listing {}",
                            aspect.name(),
                            kind.id
                        )))
                    })
                })
                .collect::<Result<(), _>>()
        })
    }
}
