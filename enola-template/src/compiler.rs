//! Template → regular expression compilation.
//!
//! Each `{name}` becomes one capture group. A placeholder followed by more
//! template text captures everything up to (not including) the next
//! template character, so `/{a}/{b}` splits on slashes; the last
//! placeholder captures the rest of the input. Literal text is escaped and
//! the whole pattern is anchored at both ends.
//!
//! Known limitation: only a single delimiter character is excluded, so a
//! multi-character separator cannot be expressed. Adjacent placeholders
//! (`{a}{b}`) compile, but how the input splits between them is left to
//! backtracking; a warning is logged for such templates.

use crate::error::{TemplateError, TemplateResult};
use regex_lite::Regex;
use tracing::warn;

/// One lexical piece of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

/// Splits a template into literals and placeholders, rejecting unbalanced
/// braces, nested braces and empty names.
pub(crate) fn tokenize(template: &str) -> TemplateResult<Vec<Token<'_>>> {
    let syntax = |position, reason| TemplateError::Syntax {
        template: template.to_string(),
        position,
        reason,
    };

    let mut tokens = Vec::new();
    let mut literal_start = 0;
    let mut open: Option<usize> = None;

    for (i, c) in template.char_indices() {
        match (c, open) {
            ('{', None) => {
                if i > literal_start {
                    tokens.push(Token::Literal(&template[literal_start..i]));
                }
                open = Some(i);
            }
            ('{', Some(_)) => return Err(syntax(i, "nested '{'")),
            ('}', None) => return Err(syntax(i, "unmatched '}'")),
            ('}', Some(start)) => {
                let name = &template[start + 1..i];
                if name.is_empty() {
                    return Err(syntax(start, "empty placeholder name"));
                }
                tokens.push(Token::Placeholder(name));
                open = None;
                literal_start = i + 1;
            }
            _ => {}
        }
    }
    if let Some(start) = open {
        return Err(syntax(start, "unclosed '{'"));
    }
    if literal_start < template.len() {
        tokens.push(Token::Literal(&template[literal_start..]));
    }
    Ok(tokens)
}

/// A template compiled into an anchored regular expression.
#[derive(Debug, Clone)]
pub struct CompiledTemplate {
    template: String,
    names: Vec<String>,
    pattern: Regex,
}

impl CompiledTemplate {
    pub fn compile(template: &str) -> TemplateResult<Self> {
        let tokens = tokenize(template)?;
        let mut pattern = String::from("^");
        let mut names: Vec<String> = Vec::new();

        for (i, token) in tokens.iter().enumerate() {
            match *token {
                Token::Literal(text) => pattern.push_str(&regex_lite::escape(text)),
                Token::Placeholder(name) => {
                    if names.iter().any(|n| n == name) {
                        return Err(TemplateError::DuplicatePlaceholder {
                            template: template.to_string(),
                            name: name.to_string(),
                        });
                    }
                    names.push(name.to_string());

                    match tokens.get(i + 1) {
                        Some(Token::Literal(next)) => push_excluding(&mut pattern, next),
                        Some(Token::Placeholder(_)) => {
                            warn!(
                                template,
                                placeholder = name,
                                "adjacent placeholders have no delimiter"
                            );
                            push_excluding(&mut pattern, "{");
                        }
                        None => pattern.push_str("(.+)"),
                    }
                }
            }
        }
        pattern.push('$');

        let pattern = Regex::new(&pattern).map_err(|source| TemplateError::Regex {
            template: template.to_string(),
            source,
        })?;

        Ok(Self {
            template: template.to_string(),
            names,
            pattern,
        })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Placeholder names, in the order of their capture groups.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }
}

/// Appends a group that excludes the first character of `following`.
fn push_excluding(pattern: &mut String, following: &str) {
    let delimiter = following.chars().next().map(String::from).unwrap_or_default();
    pattern.push_str("([^");
    pattern.push_str(&regex_lite::escape(&delimiter));
    pattern.push_str("]+)");
}
