//! Entity resolution for Enola.
//!
//! An [`EnolaService`] is built from a validated model of entity kinds. Each
//! kind gets an [`AspectPipeline`] (its declared connectors followed by the
//! built-in aspects) and two routes: `ns.entity/{p1}/{p2}` for single
//! entities and `ns.entity` for listing.
//!
//! ```ignore
//! let service = EnolaService::builder(CoreConfig::load())
//!     .kinds(model)
//!     .connectors(ConnectorBindings::new().bind_custom("dogs", Arc::new(Dogs)))
//!     .build()?;
//! let rex = service.get_entity("test.dog/rex")?;
//! ```

mod aspect;
pub mod builtin;
mod config;
mod connectors;
mod error;
mod pipeline;
mod registry;
mod service;

pub use aspect::Aspect;
pub use config::{AspectsConfig, CoreConfig, ListConfig, ModelConfig};
pub use connectors::{ConnectorBindings, ConnectorProvider};
pub use error::{EnolaError, EnolaResult};
pub use pipeline::AspectPipeline;
pub use registry::{RouteRegistry, RouteRegistryBuilder};
pub use service::{EnolaService, EnolaServiceBuilder};
