use enola_model::{
    validate, ConnectorSpec, DataDecl, EntityKind, EntityKindRepository, ValidationState,
};
use enola_types::Id;
use pretty_assertions::assert_eq;

fn kind(ns: &str, entity: &str, paths: &[&str]) -> EntityKind {
    EntityKind::new(Id::new(ns, entity, paths.iter().copied()))
}

fn fields(kinds: &[EntityKind]) -> Vec<String> {
    validate(kinds).into_iter().map(|d| d.field).collect()
}

// ── Valid models ─────────────────────────────────────────────────

#[test]
fn empty_model_is_valid() {
    let repo = EntityKindRepository::from_kinds(Vec::new()).unwrap();
    assert!(repo.is_empty());
}

#[test]
fn demo_model_is_valid() {
    let kinds = vec![
        kind("demo", "foo", &["name"])
            .with_link("wiki", "https://en.wikipedia.org/wiki/{path.name}"),
        kind("demo", "bar", &["foo", "name"])
            .with_related("one", Id::new("demo", "baz", ["uvw"]))
            .with_data("info", DataDecl::labeled("Info")),
        kind("demo", "baz", &["uuid"]).with_connector(ConnectorSpec::custom("baz")),
    ];
    assert!(validate(&kinds).is_empty());
}

// ── Grammar ──────────────────────────────────────────────────────

#[test]
fn uppercase_namespace_is_reported() {
    let diagnostics = validate(&[kind("Demo", "foo", &[])]);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].field, "id.ns");
    assert!(diagnostics[0].message.contains("Demo"));
}

#[test]
fn hash_in_entity_type_is_reported() {
    let diagnostics = validate(&[kind("demo", "fo#o", &[])]);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].field, "id.entity");
    assert_eq!(diagnostics[0].subject, "demo.fo#o");
}

#[test]
fn empty_entity_type_is_reported() {
    assert_eq!(fields(&[kind("demo", "", &[])]), ["id.entity"]);
}

#[test]
fn bad_path_segment_is_reported() {
    assert_eq!(fields(&[kind("demo", "foo", &["ok", "Not/Ok"])]), ["id.path[1]"]);
}

#[test]
fn every_bad_component_gets_its_own_diagnostic() {
    assert_eq!(
        fields(&[kind("A", "B", &["C"])]),
        ["id.ns", "id.entity", "id.path[0]"]
    );
}

#[test]
fn repeated_path_names_are_reported() {
    assert_eq!(fields(&[kind("test", "x", &["a", "a"])]), ["id.path[1]"]);
    assert_eq!(
        fields(&[kind("test", "x", &["a", "b", "a", "a"])]),
        ["id.path[2]", "id.path[3]"]
    );

    let err = EntityKindRepository::from_kinds(vec![kind("test", "x", &["a", "a"])]).unwrap_err();
    assert_eq!(err.diagnostics.len(), 1);
    assert!(err.diagnostics[0].message.contains("'a'"));
}

#[test]
fn related_id_grammar_is_checked() {
    let kinds = vec![
        kind("demo", "foo", &[]).with_related("x", Id::new("demo", "bar", ["UP"])),
        kind("demo", "bar", &["name"]),
    ];
    assert_eq!(fields(&kinds), ["related.x.path[0]"]);
}

// ── Cross references ─────────────────────────────────────────────

#[test]
fn unknown_related_kind_fails_the_build() {
    let bad = vec![
        kind("demo", "foo", &["name"]).with_related("owner", Id::new("demo", "nobody", ["x"])),
    ];
    let err = EntityKindRepository::from_kinds(bad).unwrap_err();

    assert_eq!(err.diagnostics.len(), 1);
    assert_eq!(err.diagnostics[0].subject, "demo.foo/name");
    assert_eq!(err.diagnostics[0].field, "related.owner");
    assert!(err.diagnostics[0].message.contains("demo.nobody/x"));

    let text = err.to_string();
    assert!(text.contains("1 diagnostic"));
    assert!(text.contains("demo.foo/name#related.owner"));
}

#[test]
fn removing_the_bad_reference_makes_the_build_succeed() {
    let fixed = vec![kind("demo", "foo", &["name"])];
    let repo = EntityKindRepository::from_kinds(fixed).unwrap();
    assert_eq!(repo.len(), 1);
}

#[test]
fn related_may_point_to_itself() {
    let kinds = vec![
        kind("demo", "node", &["name"]).with_related("parent", Id::new("demo", "node", ["root"])),
    ];
    assert!(validate(&kinds).is_empty());
}

// ── Labels, links, connectors ────────────────────────────────────

#[test]
fn data_without_label_is_reported() {
    let kinds = vec![kind("demo", "foo", &[])
        .with_data("ok", DataDecl::labeled("Fine"))
        .with_data("bad", DataDecl::labeled("  "))];
    assert_eq!(fields(&kinds), ["data.bad.label"]);
}

#[test]
fn broken_link_template_is_reported() {
    let kinds = vec![kind("demo", "foo", &["name"]).with_link("wiki", "https://x/{path.name")];
    assert_eq!(fields(&kinds), ["link.wiki"]);
}

#[test]
fn link_variable_must_be_a_path_segment() {
    let kinds = vec![kind("demo", "foo", &["name"])
        .with_link("ok", "https://x/{path.name}")
        .with_link("bad", "https://x/{path.other}")
        .with_link("worse", "https://x/{name}")];
    assert_eq!(fields(&kinds), ["link.bad", "link.worse"]);
}

#[test]
fn connectors_need_their_target() {
    let kinds = vec![kind("demo", "foo", &[])
        .with_connector(ConnectorSpec::error(""))
        .with_connector(ConnectorSpec::custom(""))
        .with_connector(ConnectorSpec::RemoteService { endpoint: " ".into() })
        .with_connector(ConnectorSpec::StoredResource {
            locator: "".into(),
            format: "yaml".into(),
        })];
    assert_eq!(fields(&kinds), ["connectors[1]", "connectors[2]", "connectors[3]"]);
}

// ── Batch behaviour ──────────────────────────────────────────────

#[test]
fn all_diagnostics_are_collected_together() {
    let kinds = vec![
        kind("Demo", "foo", &[]),
        kind("demo", "bar", &[])
            .with_related("a", Id::new("demo", "missing", Vec::<String>::new()))
            .with_data("d", DataDecl::labeled("")),
    ];
    let err = EntityKindRepository::from_kinds(kinds).unwrap_err();
    assert_eq!(err.diagnostics.len(), 3);
}

#[test]
fn duplicate_kinds_are_reported() {
    let kinds = vec![kind("demo", "foo", &["a"]), kind("demo", "foo", &["b"])];
    let diagnostics = validate(&kinds);
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message.contains("duplicate"));
}

#[test]
fn builder_walks_through_states() {
    let mut builder = EntityKindRepository::builder();
    assert_eq!(builder.state(), ValidationState::Unvalidated);

    builder.add(kind("Bad", "foo", &[]));
    assert!(builder.validate().is_err());
    assert_eq!(builder.state(), ValidationState::Rejected);

    let mut builder = EntityKindRepository::builder();
    builder.add(kind("demo", "foo", &[]));
    builder.validate().unwrap();
    assert_eq!(builder.state(), ValidationState::Valid);

    builder.add(kind("demo", "bar", &[]));
    assert_eq!(builder.state(), ValidationState::Unvalidated);
    assert_eq!(builder.build().unwrap().len(), 2);
}
