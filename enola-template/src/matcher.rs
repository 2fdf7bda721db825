use crate::compiler::CompiledTemplate;
use crate::error::TemplateResult;
use std::collections::BTreeMap;

/// Placeholder values extracted by a successful match, keyed by name.
pub type Params = BTreeMap<String, String>;

/// Matches candidate strings against one compiled template.
///
/// Matching is purely syntactic: extracted values are not validated.
#[derive(Debug, Clone)]
pub struct RouteMatcher {
    compiled: CompiledTemplate,
}

impl RouteMatcher {
    pub fn new(template: &str) -> TemplateResult<Self> {
        Ok(Self {
            compiled: CompiledTemplate::compile(template)?,
        })
    }

    pub fn template(&self) -> &str {
        self.compiled.template()
    }

    pub fn names(&self) -> &[String] {
        self.compiled.names()
    }

    /// Returns the placeholder values if `candidate` matches the whole template.
    pub fn try_match(&self, candidate: &str) -> Option<Params> {
        let captures = self.compiled.pattern().captures(candidate)?;
        self.compiled
            .names()
            .iter()
            .enumerate()
            .map(|(i, name)| {
                captures
                    .get(i + 1)
                    .map(|value| (name.clone(), value.as_str().to_string()))
            })
            .collect()
    }

    pub fn is_match(&self, candidate: &str) -> bool {
        self.compiled.pattern().is_match(candidate)
    }
}
