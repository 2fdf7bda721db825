//! Error types for entity resolution.

use enola_model::{ConnectorError, ValidationError};
use enola_template::TemplateError;
use enola_types::IdError;
use thiserror::Error;

/// Result type for service operations.
pub type EnolaResult<T> = Result<T, EnolaError>;

#[derive(Debug, Error)]
pub enum EnolaError {
    #[error("invalid ID: {0}")]
    Parse(#[from] IdError),

    #[error("no route for '{identifier}'; registered templates: [{}]", .templates.join(", "))]
    NotRegistered {
        identifier: String,
        templates: Vec<String>,
    },

    /// Raised by a connector; shown exactly as the connector worded it.
    #[error(transparent)]
    Connector(#[from] ConnectorError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("route template error: {0}")]
    Template(#[from] TemplateError),

    #[error("entity kind {kind}: no {connector} connector bound for '{target}'")]
    UnboundConnector {
        kind: String,
        connector: &'static str,
        target: String,
    },
}
