use docshim::{Reference, ResourceKind};

fn expected_rest_path(segments: &[&str]) -> String {
    let joined = format!("/{}", segments.join("/"));
    match joined.strip_prefix("/singles/") {
        Some(rest) => format!("/{rest}"),
        None => joined,
    }
}

#[test]
fn test_rest_path_matches_join_for_many_shapes() {
    let cases: &[&[&str]] = &[
        &["orders"],
        &["orders", "7"],
        &["orders", "7", "items"],
        &["orders", "7", "items", "3"],
        &["singles", "settings"],
        &["singles", "settings", "theme"],
        &["singles"],
        &["a", "singles", "b"],
        &["x", "y", "z", "w", "v", "u"],
        &["with space", "id-1"],
    ];

    for segments in cases {
        let reference = Reference::from(*segments);
        assert_eq!(
            reference.rest_path(),
            expected_rest_path(segments),
            "segments {segments:?}"
        );
        assert_eq!(reference.dotted_path(), segments.join("."));
    }
}

#[test]
fn test_segment_order_determines_path() {
    let forward = Reference::from(["a", "b"]);
    let backward = Reference::from(["b", "a"]);
    assert_ne!(forward.rest_path(), backward.rest_path());
    assert_ne!(forward, backward);
}

#[test]
fn test_kind_travels_with_clones() {
    let reference = Reference::from(["lists", "4", "items", "9"]);
    let clone = reference.clone();
    assert_eq!(clone.kind(), reference.kind());
    assert_eq!(clone.kind().name(), "nested-list-item");
}

#[test]
fn test_owned_segments_build_same_reference() {
    let owned = Reference::from(vec!["orders".to_string(), "7".to_string()]);
    assert_eq!(owned, Reference::from(["orders", "7"]));
    assert_eq!(
        owned.kind(),
        &ResourceKind::SingleItem {
            collection: "orders".into(),
            id: "7".into(),
        }
    );
    assert_eq!(owned.segments(), ["orders", "7"]);
}
