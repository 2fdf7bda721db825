//! Core identifier types for Enola.
//!
//! An [`Id`] names either one entity (`demo.foo/abc`) or, in its kind form,
//! a whole class of entities whose path segments are placeholder names
//! (`demo.foo/{name}`). This crate parses and formats the text form and
//! checks the identifier grammar; it knows nothing about routing or models.

mod ids;

pub use ids::{
    path_map, Id, IdField, IdViolation, ENTITY_TYPE_PATTERN, NAMESPACE_PATTERN, PATH_PATTERN,
};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, IdError>;

/// Errors raised while parsing identifier text or pairing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    #[error("'{input}': unsupported scheme '{scheme}' (expected none, 'enola:' or 'urn:enola:')")]
    UnsupportedScheme { input: String, scheme: String },

    #[error("'{input}': {component} component is not allowed in an ID")]
    DisallowedComponent {
        input: String,
        component: &'static str,
    },

    #[error("'{input}': empty {what}")]
    Empty { input: String, what: &'static str },

    #[error("'{input}': {violation}")]
    Grammar { input: String, violation: IdViolation },

    #[error("{id} has {actual} path segments, but kind {kind} declares {expected}")]
    PathMismatch {
        kind: String,
        id: String,
        expected: usize,
        actual: usize,
    },
}
