use enola_types::{path_map, Id, IdError, IdField};
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;
use std::str::FromStr;

fn id(ns: &str, entity: &str, paths: &[&str]) -> Id {
    Id::new(ns, entity, paths.iter().copied())
}

// ── Parsing ───────────────────────────────────────────────────────

#[test]
fn parse_namespace_entity_and_paths() {
    let parsed = Id::parse("demo.foo/abc/def").unwrap();
    assert_eq!(parsed.namespace(), "demo");
    assert_eq!(parsed.entity_type(), "foo");
    assert_eq!(parsed.paths(), ["abc", "def"]);
}

#[test]
fn parse_without_namespace() {
    assert_eq!(Id::parse("foo").unwrap(), id("", "foo", &[]));
    assert_eq!(Id::parse("foo/x").unwrap(), id("", "foo", &["x"]));
}

#[test]
fn parse_dotted_namespace_splits_at_last_dot() {
    let parsed = Id::parse("dev.enola.demo.foo/abc").unwrap();
    assert_eq!(parsed.namespace(), "dev.enola.demo");
    assert_eq!(parsed.entity_type(), "foo");
}

#[test]
fn parse_schemes_normalize_to_same_id() {
    let plain = Id::parse("demo.foo/abc").unwrap();
    assert_eq!(Id::parse("enola:demo.foo/abc").unwrap(), plain);
    assert_eq!(Id::parse("urn:enola:demo.foo/abc").unwrap(), plain);
}

#[test]
fn from_str_delegates_to_parse() {
    let parsed: Id = "demo.foo/abc".parse().unwrap();
    assert_eq!(parsed, Id::from_str("enola:demo.foo/abc").unwrap());
}

// ── Rejection ─────────────────────────────────────────────────────

#[test]
fn parse_rejects_other_schemes() {
    assert!(matches!(
        Id::parse("https://x"),
        Err(IdError::UnsupportedScheme { scheme, .. }) if scheme == "https"
    ));
    assert!(matches!(
        Id::parse("urn:other:x"),
        Err(IdError::UnsupportedScheme { scheme, .. }) if scheme == "urn"
    ));
    assert!(Id::parse("mailto:someone").is_err());
}

#[test]
fn parse_rejects_authority() {
    assert!(matches!(
        Id::parse("enola://host/demo.foo"),
        Err(IdError::DisallowedComponent { component: "authority", .. })
    ));
    assert!(Id::parse("//host/demo.foo").is_err());
}

#[test]
fn parse_rejects_fragment() {
    assert!(matches!(
        Id::parse("a/b#frag"),
        Err(IdError::DisallowedComponent { component: "fragment", .. })
    ));
}

#[test]
fn parse_rejects_query() {
    assert!(matches!(
        Id::parse("a/b?q=1"),
        Err(IdError::DisallowedComponent { component: "query", .. })
    ));
}

#[test]
fn parse_rejects_empty_parts() {
    assert!(matches!(Id::parse(""), Err(IdError::Empty { .. })));
    assert!(matches!(Id::parse("enola:"), Err(IdError::Empty { .. })));
    assert!(matches!(Id::parse("demo."), Err(IdError::Empty { .. })));
    assert!(matches!(Id::parse(".foo"), Err(IdError::Empty { .. })));
    assert!(matches!(Id::parse("demo.foo/"), Err(IdError::Empty { .. })));
    assert!(matches!(Id::parse("demo.foo//x"), Err(IdError::Empty { .. })));
}

#[test]
fn parse_rejects_illegal_characters() {
    let err = Id::parse("Demo.foo").unwrap_err();
    assert!(matches!(
        err,
        IdError::Grammar { ref violation, .. } if violation.field == IdField::Namespace
    ));

    let err = Id::parse("demo.Foo").unwrap_err();
    assert!(matches!(
        err,
        IdError::Grammar { ref violation, .. } if violation.field == IdField::EntityType
    ));

    let err = Id::parse("demo.foo/ok/Not Ok").unwrap_err();
    assert!(matches!(
        err,
        IdError::Grammar { ref violation, .. } if violation.field == IdField::Path(1)
    ));
}

#[test]
fn parse_error_message_names_input() {
    let err = Id::parse("demo.foo/x?y").unwrap_err();
    assert!(err.to_string().contains("demo.foo/x?y"));
    assert!(err.to_string().contains("query"));
}

// ── Formatting ────────────────────────────────────────────────────

#[test]
fn format_full_id() {
    assert_eq!(id("demo", "foo", &["abc", "def"]).to_string(), "demo.foo/abc/def");
}

#[test]
fn format_omits_empty_namespace_and_path() {
    assert_eq!(id("", "foo", &[]).to_string(), "foo");
    assert_eq!(id("demo", "foo", &[]).to_string(), "demo.foo");
}

#[test]
fn format_uri() {
    assert_eq!(id("demo", "foo", &["a"]).to_uri(), "enola:demo.foo/a");
}

#[test]
fn format_template() {
    assert_eq!(
        id("demo", "bar", &["foo", "name"]).to_template(),
        "demo.bar/{foo}/{name}"
    );
    assert_eq!(id("demo", "bar", &[]).to_template(), "demo.bar");
}

// ── Helpers ───────────────────────────────────────────────────────

#[test]
fn without_path_strips_segments() {
    let full = id("demo", "foo", &["a", "b"]);
    assert_eq!(full.without_path(), id("demo", "foo", &[]));
    assert_eq!(full.without_path().without_path(), id("demo", "foo", &[]));
}

#[test]
fn with_paths_replaces_segments() {
    let kind = id("demo", "foo", &["name"]);
    assert_eq!(kind.with_paths(["x"]), id("demo", "foo", &["x"]));
}

#[test]
fn is_empty() {
    assert!(Id::default().is_empty());
    assert!(!id("", "foo", &[]).is_empty());
}

#[test]
fn violations_lists_every_component() {
    let bad = id("Bad#", "", &["ok", "UP"]);
    let fields: Vec<IdField> = bad.violations().into_iter().map(|v| v.field).collect();
    assert_eq!(
        fields,
        vec![IdField::Namespace, IdField::EntityType, IdField::Path(1)]
    );
}

#[test]
fn violation_display_names_field_and_value() {
    let violation = id("demo", "foo", &["A"]).violations().remove(0);
    assert_eq!(violation.to_string(), "path[0]=\"A\" does not match [a-z0-9_.-]+");
}

#[test]
fn path_map_pairs_names_and_values() {
    let kind = id("demo", "bar", &["foo", "name"]);
    let entity = id("demo", "bar", &["abc", "def"]);
    let map = path_map(&kind, &entity).unwrap();
    assert_eq!(map.get("foo").map(String::as_str), Some("abc"));
    assert_eq!(map.get("name").map(String::as_str), Some("def"));
}

#[test]
fn path_map_rejects_arity_mismatch() {
    let kind = id("demo", "bar", &["foo", "name"]);
    let entity = id("demo", "bar", &["abc"]);
    assert!(matches!(
        path_map(&kind, &entity),
        Err(IdError::PathMismatch { expected: 2, actual: 1, .. })
    ));
}

// ── Ordering, hashing, serde ──────────────────────────────────────

#[test]
fn ordering_follows_text_form() {
    let set: BTreeSet<Id> = ["demo.foo/b", "demo.bar", "demo.foo/a", "alpha.z"]
        .into_iter()
        .map(|s| Id::parse(s).unwrap())
        .collect();
    let ordered: Vec<String> = set.iter().map(Id::to_string).collect();
    assert_eq!(ordered, ["alpha.z", "demo.bar", "demo.foo/a", "demo.foo/b"]);
}

#[test]
fn serialization_uses_short_field_names() {
    let json = serde_json::to_value(id("demo", "foo", &["a"])).unwrap();
    assert_eq!(json, serde_json::json!({"ns": "demo", "entity": "foo", "paths": ["a"]}));

    let bare: Id = serde_json::from_value(serde_json::json!({"entity": "foo"})).unwrap();
    assert_eq!(bare, id("", "foo", &[]));
}
