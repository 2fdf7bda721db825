//! Error types for template handling.

use thiserror::Error;

/// Result type for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template '{template}': {reason} at byte {position}")]
    Syntax {
        template: String,
        position: usize,
        reason: &'static str,
    },

    #[error("template '{template}': placeholder '{name}' used more than once")]
    DuplicatePlaceholder { template: String, name: String },

    #[error("template already registered: {0}")]
    DuplicateTemplate(String),

    #[error("template '{template}': no value for variable '{name}'")]
    UnboundVariable { template: String, name: String },

    #[error("template '{template}' does not compile: {source}")]
    Regex {
        template: String,
        #[source]
        source: regex_lite::Error,
    },
}
