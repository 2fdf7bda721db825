//! Link template expansion (RFC 6570 level 1, simple string expansion).

use crate::compiler::{tokenize, Token};
use crate::error::{TemplateError, TemplateResult};
use std::collections::BTreeMap;

/// Replaces every `{name}` with the percent-encoded value of `name`.
pub fn expand(template: &str, variables: &BTreeMap<String, String>) -> TemplateResult<String> {
    let mut out = String::with_capacity(template.len());
    for token in tokenize(template)? {
        match token {
            Token::Literal(text) => out.push_str(text),
            Token::Placeholder(name) => {
                let value = variables
                    .get(name)
                    .ok_or_else(|| TemplateError::UnboundVariable {
                        template: template.to_string(),
                        name: name.to_string(),
                    })?;
                out.push_str(&urlencoding::encode(value));
            }
        }
    }
    Ok(out)
}

/// Checks the syntax of a template and returns its placeholder names.
pub fn placeholders(template: &str) -> TemplateResult<Vec<String>> {
    Ok(tokenize(template)?
        .into_iter()
        .filter_map(|token| match token {
            Token::Placeholder(name) => Some(name.to_string()),
            Token::Literal(_) => None,
        })
        .collect())
}
