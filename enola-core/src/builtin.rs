//! Entity kinds provided by the core itself.

use enola_model::{ConnectorSpec, DataDecl, EntityKind};
use enola_types::Id;

/// Custom handler name bound to the kind catalog aspect.
pub const KIND_CATALOG_HANDLER: &str = "enola.entity_kind";

/// Data field holding the JSON form of a described kind.
pub const SCHEMA_DATA: &str = "schema";

/// `enola.entity_kind/{name}`: one entity per kind of the model, `name`
/// being the kind's path-stripped ID.
pub fn entity_kind_kind() -> EntityKind {
    EntityKind::new(Id::new("enola", "entity_kind", ["name"]))
        .with_label("Entity Kind")
        .with_data(
            SCHEMA_DATA,
            DataDecl::labeled("Schema").with_type_url("type.enola.dev/enola.EntityKind"),
        )
        .with_connector(ConnectorSpec::custom(KIND_CATALOG_HANDLER))
}
