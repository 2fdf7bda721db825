//! The structured [`Id`] and its text codec.
//!
//! Text form: `ns.entity/path0/path1`. The namespace (and its dot) is
//! omitted when empty, the path when there are no segments. Parsing also
//! accepts the `enola:` and `urn:enola:` prefixes, which normalize away.

use crate::{IdError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

const URI_SCHEME: &str = "enola:";
const URN_PREFIX: &str = "urn:enola:";

/// Grammar of [`Id::namespace`].
pub const NAMESPACE_PATTERN: &str = "[a-z0-9_.]*";
/// Grammar of [`Id::entity_type`].
pub const ENTITY_TYPE_PATTERN: &str = "[a-z0-9_]+";
/// Grammar of each of [`Id::paths`].
pub const PATH_PATTERN: &str = "[a-z0-9_.-]+";

/// Identifies one entity (instance form) or one entity kind (kind form).
///
/// Construction through [`Id::new`] does not check the grammar, because
/// model loaders build ids directly and the model validator reports every
/// violation at once. [`Id::parse`] always checks it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Id {
    #[serde(default, rename = "ns", skip_serializing_if = "String::is_empty")]
    namespace: String,
    #[serde(rename = "entity")]
    entity_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    paths: Vec<String>,
}

/// The component of an [`Id`] a grammar violation was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdField {
    Namespace,
    EntityType,
    Path(usize),
}

impl fmt::Display for IdField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Namespace => write!(f, "ns"),
            Self::EntityType => write!(f, "entity"),
            Self::Path(i) => write!(f, "path[{i}]"),
        }
    }
}

/// One component of an [`Id`] that does not match its grammar.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdViolation {
    pub field: IdField,
    pub value: String,
    pub pattern: &'static str,
}

impl fmt::Display for IdViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={:?} does not match {}",
            self.field, self.value, self.pattern
        )
    }
}

impl Id {
    /// Creates an ID from its components, without checking the grammar.
    pub fn new<I, S>(namespace: impl Into<String>, entity_type: impl Into<String>, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            namespace: namespace.into(),
            entity_type: entity_type.into(),
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses the text form, with or without an `enola:`/`urn:enola:` prefix.
    pub fn parse(text: &str) -> Result<Self> {
        let rest = strip_scheme(text)?;

        let (head, path) = match rest.split_once('/') {
            Some((head, path)) => (head, Some(path)),
            None => (rest, None),
        };

        let (namespace, entity_type) = match head.rsplit_once('.') {
            Some(("", _)) => return Err(empty(text, "namespace before '.'")),
            Some((ns, entity)) => (ns, entity),
            None => ("", head),
        };
        if entity_type.is_empty() {
            return Err(empty(text, "entity type"));
        }

        let mut paths = Vec::new();
        if let Some(path) = path {
            for segment in path.split('/') {
                if segment.is_empty() {
                    return Err(empty(text, "path segment"));
                }
                paths.push(segment.to_string());
            }
        }

        let id = Self::new(namespace, entity_type, paths);
        if let Some(violation) = id.violations().into_iter().next() {
            return Err(IdError::Grammar {
                input: text.to_string(),
                violation,
            });
        }
        Ok(id)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Returns a copy of this ID with no path segments.
    #[must_use]
    pub fn without_path(&self) -> Self {
        Self {
            namespace: self.namespace.clone(),
            entity_type: self.entity_type.clone(),
            paths: Vec::new(),
        }
    }

    /// Returns a copy of this ID with `segments` as its path.
    #[must_use]
    pub fn with_paths<I, S>(&self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(self.namespace.clone(), self.entity_type.clone(), segments)
    }

    /// True if all components are empty.
    pub fn is_empty(&self) -> bool {
        self.namespace.is_empty() && self.entity_type.is_empty() && self.paths.is_empty()
    }

    /// The `enola:` URI form.
    pub fn to_uri(&self) -> String {
        format!("{URI_SCHEME}{self}")
    }

    /// Renders this kind-form ID as a route template, each path segment
    /// becoming a `{segment}` placeholder.
    pub fn to_template(&self) -> String {
        let mut out = self.without_path().to_string();
        for segment in &self.paths {
            out.push_str("/{");
            out.push_str(segment);
            out.push('}');
        }
        out
    }

    /// Checks every component against its grammar.
    pub fn violations(&self) -> Vec<IdViolation> {
        let mut out = Vec::new();
        if !self.namespace.chars().all(is_namespace_char) {
            out.push(IdViolation {
                field: IdField::Namespace,
                value: self.namespace.clone(),
                pattern: NAMESPACE_PATTERN,
            });
        }
        if self.entity_type.is_empty() || !self.entity_type.chars().all(is_entity_char) {
            out.push(IdViolation {
                field: IdField::EntityType,
                value: self.entity_type.clone(),
                pattern: ENTITY_TYPE_PATTERN,
            });
        }
        for (i, segment) in self.paths.iter().enumerate() {
            if segment.is_empty() || !segment.chars().all(is_path_char) {
                out.push(IdViolation {
                    field: IdField::Path(i),
                    value: segment.clone(),
                    pattern: PATH_PATTERN,
                });
            }
        }
        out
    }
}

/// Pairs the placeholder names of a kind-form ID with the segments of an
/// instance of that kind.
pub fn path_map(kind: &Id, entity: &Id) -> Result<BTreeMap<String, String>> {
    if kind.paths.len() != entity.paths.len() {
        return Err(IdError::PathMismatch {
            kind: kind.to_string(),
            id: entity.to_string(),
            expected: kind.paths.len(),
            actual: entity.paths.len(),
        });
    }
    Ok(kind
        .paths
        .iter()
        .cloned()
        .zip(entity.paths.iter().cloned())
        .collect())
}

fn strip_scheme(text: &str) -> Result<&str> {
    let rest = text
        .strip_prefix(URN_PREFIX)
        .or_else(|| text.strip_prefix(URI_SCHEME))
        .unwrap_or(text);

    if rest.starts_with("//") {
        return Err(disallowed(text, "authority"));
    }
    if rest.contains('?') {
        return Err(disallowed(text, "query"));
    }
    if rest.contains('#') {
        return Err(disallowed(text, "fragment"));
    }

    let head = rest.split('/').next().unwrap_or_default();
    if let Some((scheme, _)) = head.split_once(':') {
        return Err(IdError::UnsupportedScheme {
            input: text.to_string(),
            scheme: scheme.to_string(),
        });
    }
    Ok(rest)
}

fn disallowed(input: &str, component: &'static str) -> IdError {
    IdError::DisallowedComponent {
        input: input.to_string(),
        component,
    }
}

fn empty(input: &str, what: &'static str) -> IdError {
    IdError::Empty {
        input: input.to_string(),
        what,
    }
}

fn is_namespace_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_' | '.')
}

fn is_entity_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_')
}

fn is_path_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_' | '.' | '-')
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.namespace.is_empty() {
            write!(f, "{}.", self.namespace)?;
        }
        f.write_str(&self.entity_type)?;
        for segment in &self.paths {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for Id {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

// Ordered by canonical text form.
impl PartialOrd for Id {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Id {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_string()
            .cmp(&other.to_string())
            .then_with(|| self.namespace.cmp(&other.namespace))
            .then_with(|| self.entity_type.cmp(&other.entity_type))
            .then_with(|| self.paths.cmp(&other.paths))
    }
}
