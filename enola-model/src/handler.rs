use crate::{EntityBuilder, EntityKind};
use enola_types::Id;
use std::error::Error as StdError;
use thiserror::Error;

/// Contract for the pluggable data sources of an entity kind.
///
/// Connectors run in the order the kind declares them, all writing into the
/// same [`EntityBuilder`]. Returning an error aborts the remaining
/// connectors; the error reaches the caller unchanged.
///
/// Implementations may block on I/O. The core applies no timeout.
pub trait Connector: Send + Sync {
    /// Contribute to (or reject) one entity.
    fn augment(&self, entity: &mut EntityBuilder, kind: &EntityKind) -> Result<(), ConnectorError>;

    /// Batch listing override.
    ///
    /// A connector that can enumerate or augment many entities at once
    /// appends to / updates `entities` and returns [`Listing::Batched`].
    /// The default returns [`Listing::PerEntity`] without touching
    /// `entities`, and the pipeline then calls [`Connector::augment`] once
    /// per candidate.
    fn list(
        &self,
        query: &Id,
        kind: &EntityKind,
        entities: &mut Vec<EntityBuilder>,
    ) -> Result<Listing, ConnectorError> {
        let _ = (query, kind, entities);
        Ok(Listing::PerEntity)
    }
}

/// What a [`Connector::list`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    /// The connector handled every candidate itself.
    Batched,
    /// Fall back to one `augment` per candidate.
    PerEntity,
}

/// A failure raised by a connector. Its message is shown as-is.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ConnectorError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl ConnectorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
