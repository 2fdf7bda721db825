//! Entity model for Enola.
//!
//! Defines the types the routing and aspect engine is built from:
//! - [`EntityKind`]: one class of entities, with its id template, related
//!   kinds, data fields, link templates and ordered connectors
//! - [`ConnectorSpec`]: the closed set of connector declarations
//! - [`Entity`] / [`EntityBuilder`]: the resolved result and its accumulator
//! - [`Connector`]: the contract external connectors implement
//! - [`EntityKindRepository`]: a validated, immutable set of kinds
//!
//! A model is validated as a whole when the repository is built; a model
//! with any diagnostic is never exposed.

mod entity;
mod handler;
mod repository;
mod schema;
mod validation;

pub use entity::{Entity, EntityBuilder};
pub use handler::{Connector, ConnectorError, Listing};
pub use repository::{EntityKindRepository, EntityKindRepositoryBuilder};
pub use schema::{ConnectorSpec, DataDecl, EntityKind};
pub use validation::{validate, Diagnostic, ValidationError, ValidationState};
