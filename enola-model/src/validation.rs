//! Whole-model validation.
//!
//! Runs every pass over every kind and collects all diagnostics; nothing
//! stops at the first problem. Passes:
//! - grammar of kind ids and related ids
//! - duplicate kind ids and repeated path segment names
//! - cross references: related targets must name a kind of the same model
//! - data declarations must carry a label
//! - link templates must parse and only use `path.<segment>` variables
//! - connector declarations must name their handler/locator/endpoint

use crate::{ConnectorSpec, EntityKind};
use enola_types::Id;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Lifecycle of a model on its way to becoming a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationState {
    Unvalidated,
    Validating,
    Valid,
    Rejected,
}

/// One problem found in a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The kind the problem belongs to, in text form.
    pub subject: String,
    /// Dotted path of the offending field within the kind.
    pub field: String,
    pub message: String,
}

impl Diagnostic {
    fn new(subject: &Id, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.to_string(),
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}: {}", self.subject, self.field, self.message)
    }
}

/// All diagnostics of one failed repository build.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "model validation failed with {} diagnostic(s):{}",
    .diagnostics.len(),
    render(.diagnostics)
)]
pub struct ValidationError {
    pub diagnostics: Vec<Diagnostic>,
}

fn render(diagnostics: &[Diagnostic]) -> String {
    diagnostics.iter().map(|d| format!("\n  - {d}")).collect()
}

/// Validates a whole model, returning every diagnostic found.
pub fn validate(kinds: &[EntityKind]) -> Vec<Diagnostic> {
    let mut out = Vec::new();

    let mut known = HashSet::new();
    for kind in kinds {
        if !known.insert(kind.id.without_path()) {
            out.push(Diagnostic::new(
                &kind.id,
                "id",
                format!("duplicate entity kind {}", kind.id.without_path()),
            ));
        }
    }

    for kind in kinds {
        check_grammar(kind, &mut out);
        check_paths(kind, &mut out);
        check_related(kind, &known, &mut out);
        check_data(kind, &mut out);
        check_links(kind, &mut out);
        check_connectors(kind, &mut out);
    }
    out
}

fn check_grammar(kind: &EntityKind, out: &mut Vec<Diagnostic>) {
    for violation in kind.id.violations() {
        out.push(Diagnostic::new(
            &kind.id,
            format!("id.{}", violation.field),
            violation.to_string(),
        ));
    }
    for (key, target) in &kind.related {
        for violation in target.violations() {
            out.push(Diagnostic::new(
                &kind.id,
                format!("related.{key}.{}", violation.field),
                format!("{target}: {violation}"),
            ));
        }
    }
}

fn check_paths(kind: &EntityKind, out: &mut Vec<Diagnostic>) {
    let mut seen = HashSet::new();
    for (i, name) in kind.id.paths().iter().enumerate() {
        if !seen.insert(name.as_str()) {
            out.push(Diagnostic::new(
                &kind.id,
                format!("id.path[{i}]"),
                format!("path segment name '{name}' is repeated"),
            ));
        }
    }
}

fn check_related(kind: &EntityKind, known: &HashSet<Id>, out: &mut Vec<Diagnostic>) {
    for (key, target) in &kind.related {
        if !known.contains(&target.without_path()) {
            out.push(Diagnostic::new(
                &kind.id,
                format!("related.{key}"),
                format!("UNKNOWN {target}"),
            ));
        }
    }
}

fn check_data(kind: &EntityKind, out: &mut Vec<Diagnostic>) {
    for (name, decl) in &kind.data {
        if decl.label.trim().is_empty() {
            out.push(Diagnostic::new(
                &kind.id,
                format!("data.{name}.label"),
                "data label mandatory",
            ));
        }
    }
}

fn check_links(kind: &EntityKind, out: &mut Vec<Diagnostic>) {
    for (name, template) in &kind.links {
        match enola_template::placeholders(template) {
            Ok(variables) => {
                for variable in variables {
                    let bound = variable
                        .strip_prefix("path.")
                        .is_some_and(|segment| kind.id.paths().iter().any(|p| p == segment));
                    if !bound {
                        out.push(Diagnostic::new(
                            &kind.id,
                            format!("link.{name}"),
                            format!(
                                "variable '{variable}' is not a path.<segment> of {}",
                                kind.id.to_template()
                            ),
                        ));
                    }
                }
            }
            Err(e) => out.push(Diagnostic::new(&kind.id, format!("link.{name}"), e.to_string())),
        }
    }
}

fn check_connectors(kind: &EntityKind, out: &mut Vec<Diagnostic>) {
    for (i, connector) in kind.connectors.iter().enumerate() {
        let missing = match connector {
            ConnectorSpec::Error { .. } => None,
            ConnectorSpec::StoredResource { locator, .. } => {
                locator.trim().is_empty().then_some("locator")
            }
            ConnectorSpec::RemoteService { endpoint } => {
                endpoint.trim().is_empty().then_some("endpoint")
            }
            ConnectorSpec::Custom { handler } => handler.trim().is_empty().then_some("handler"),
        };
        if let Some(what) = missing {
            out.push(Diagnostic::new(
                &kind.id,
                format!("connectors[{i}]"),
                format!("{} connector needs a {what}", connector.kind_name()),
            ));
        }
    }
}
