//! Ordered first-match-wins dispatch over many templates.

use crate::error::{TemplateError, TemplateResult};
use crate::matcher::{Params, RouteMatcher};
use tracing::debug;

/// An immutable, ordered list of `(matcher, handler)` entries.
///
/// Entries are tried in registration order and the first match wins, even
/// when a later, more specific template would also match.
#[derive(Debug, Clone)]
pub struct MatcherChain<T> {
    entries: Vec<(RouteMatcher, T)>,
}

/// Collects entries for a [`MatcherChain`].
#[derive(Debug)]
pub struct MatcherChainBuilder<T> {
    entries: Vec<(RouteMatcher, T)>,
}

impl<T> MatcherChain<T> {
    pub fn builder() -> MatcherChainBuilder<T> {
        MatcherChainBuilder {
            entries: Vec::new(),
        }
    }

    /// Returns the handler of the first entry matching `candidate`, with the
    /// extracted placeholder values.
    pub fn first_match(&self, candidate: &str) -> Option<(&T, Params)> {
        self.entries.iter().find_map(|(matcher, handler)| {
            matcher.try_match(candidate).map(|params| (handler, params))
        })
    }

    /// All templates, in registration order.
    pub fn templates(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(matcher, _)| matcher.template().to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> MatcherChainBuilder<T> {
    /// Appends an entry. A template can only be registered once.
    pub fn add(&mut self, template: &str, handler: T) -> TemplateResult<&mut Self> {
        if self.contains(template) {
            return Err(TemplateError::DuplicateTemplate(template.to_string()));
        }
        let matcher = RouteMatcher::new(template)?;
        debug!(template, position = self.entries.len(), "Template registered");
        self.entries.push((matcher, handler));
        Ok(self)
    }

    pub fn contains(&self, template: &str) -> bool {
        self.entries
            .iter()
            .any(|(matcher, _)| matcher.template() == template)
    }

    pub fn build(self) -> MatcherChain<T> {
        MatcherChain {
            entries: self.entries,
        }
    }
}
