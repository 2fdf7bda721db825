//! URI templates for Enola.
//!
//! - [`CompiledTemplate`] turns `demo.foo/{name}` into an anchored pattern
//!   plus the ordered placeholder names.
//! - [`RouteMatcher`] tests a candidate string against one template.
//! - [`MatcherChain`] is an ordered, immutable list of matchers with a
//!   handler each; the first matching entry wins.
//! - [`expand`] fills link templates (RFC 6570 simple string expansion).

mod chain;
mod compiler;
mod error;
mod expand;
mod matcher;

pub use chain::{MatcherChain, MatcherChainBuilder};
pub use compiler::CompiledTemplate;
pub use error::{TemplateError, TemplateResult};
pub use expand::{expand, placeholders};
pub use matcher::{Params, RouteMatcher};
