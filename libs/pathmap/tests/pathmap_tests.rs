//! Integration tests for PathMap

use pathmap::{PathMap, PathMapError, PathMapOptions, VALUE_KEY};
use serde_json::{json, Value};

fn sample_tree() -> Value {
    json!({
        "dir": {
            "root": "/srv/app",
            "public": {
                "assets": "/srv/app/public/assets",
                "uploads": "/srv/app/public/uploads"
            }
        },
        "features": ["search", "upload"],
        "retries": 3,
        "debug": false
    })
}

#[test]
fn set_then_get_round_trips_for_any_delimiter() {
    for delimiter in [".", "/", "::", "->"] {
        let mut map = PathMap::with_delimiter(delimiter).unwrap();
        let path = ["app", "db", "port"].join(delimiter);
        for value in [json!(5432), json!("x"), json!(true), json!(1.5), json!([1, 2])] {
            map.set(path.as_str(), value.clone());
            assert_eq!(map.get(path.as_str()).unwrap(), Some(value), "delimiter {delimiter}");
        }
    }
}

#[test]
fn get_does_not_mutate_and_set_is_idempotent() {
    let mut map = PathMap::from_value(sample_tree(), false, ".").unwrap();
    let before = map.clone();

    let _ = map.get("dir.public.").unwrap();
    let _ = map.get("dir:").unwrap();
    let _ = map.get("missing.path").unwrap();
    assert_eq!(map, before);

    map.set("dir.var", "/srv/app/var");
    let once = map.clone();
    map.set("dir.var", "/srv/app/var");
    assert_eq!(map, once);
}

#[test]
fn collision_is_preserved_under_every_mode() {
    let mut map = PathMap::new();
    map.set("a", 1).set("a.b", 2);

    let full = map.get("a:").unwrap().unwrap();
    assert_eq!(full[VALUE_KEY], json!(1));
    assert_eq!(full["b"], json!(2));

    assert_eq!(map.get("a").unwrap(), Some(json!(1)));
    assert_eq!(map.get("a.").unwrap(), Some(json!({"b": 2})));
    assert_eq!(map.all(), json!({"a": {"[=]": 1, "b": 2}}));
}

#[test]
fn deepening_twice_keeps_each_level_value() {
    let mut map = PathMap::new();
    map.set("dir.public", "/public")
        .set("dir.public.assets", "/public/assets")
        .set("dir.public.assets.img", "/public/assets/img");

    assert_eq!(map.get("dir.public").unwrap(), Some(json!("/public")));
    assert_eq!(map.get("dir.public.assets").unwrap(), Some(json!("/public/assets")));
    assert_eq!(
        map.get("dir.public.").unwrap(),
        Some(json!({"assets": {"img": "/public/assets/img"}}))
    );
}

#[test]
fn flatten_and_unflatten_round_trip() {
    let original = PathMap::from_value(sample_tree(), false, ".").unwrap();

    for delimiter in [".", "/"] {
        let flat = original.flatten(delimiter).unwrap();
        assert!(flat.contains_key(&["dir", "public", "assets"].join(delimiter)));

        let rebuilt = PathMap::unflatten(flat, delimiter).unwrap();
        assert_eq!(rebuilt.all(), original.all());
    }
}

#[test]
fn flatten_round_trip_keeps_collisions() {
    let mut original = PathMap::new();
    original.set("a", 1).set("a.b", 2).set("a.c.d", 3);

    let flat = original.flatten(".").unwrap();
    assert_eq!(Value::Object(flat.clone()), json!({"a": 1, "a.b": 2, "a.c.d": 3}));

    let rebuilt = PathMap::unflatten(flat, ".").unwrap();
    assert_eq!(rebuilt.all(), original.all());
}

#[test]
fn flatten_of_empty_map_is_an_error() {
    let map = PathMap::new();
    let err = map.flatten(".").unwrap_err();
    assert!(matches!(err, PathMapError::MergeConflict(_)));
    assert!(err.to_string().starts_with("Merge conflict"));
}

#[test]
fn has_is_a_conjunction() {
    let map = PathMap::from_value(sample_tree(), false, ".").unwrap();
    let paths = ["dir.root", "retries", "dir.public.assets", "nope", "dir.nope"];

    for x in paths {
        for y in paths {
            assert_eq!(map.has_all([x, y]), map.has(x) && map.has(y), "{x} & {y}");
        }
    }
}

#[test]
fn has_prefers_literal_top_level_key() {
    let map = PathMap::from_value(json!({"a.b": null}), false, ".").unwrap();
    assert!(map.has("a.b"));
    assert_eq!(map.get("a.b").unwrap(), Some(Value::Null));
}

#[test]
fn delete_of_unknown_paths_is_silent() {
    let mut empty = PathMap::new();
    empty.delete("no.such.path");
    assert!(empty.is_empty());

    let mut map = PathMap::from_value(sample_tree(), false, ".").unwrap();
    let before = map.clone();
    map.delete_many(["dir.nope.deeper", "retries.inner", "features.7"]);
    assert_eq!(map, before);
}

#[test]
fn delete_walks_into_sequences() {
    let mut map = PathMap::from_value(sample_tree(), false, ".").unwrap();
    map.delete("features.0");
    assert_eq!(map.get("features").unwrap(), Some(json!(["upload"])));

    let pulled = map.pull_path("features.0", Value::Null).unwrap();
    assert_eq!(pulled, json!("upload"));
    assert!(!map.has("features.0"));
    assert_eq!(map.get("features").unwrap(), Some(json!([])));
}

#[test]
fn scenario_dir_cache() {
    let mut map = PathMap::from_value(json!({}), false, ".").unwrap();
    map.set("dir.cache", "/var/cache");
    assert_eq!(map.get("dir.cache").unwrap(), Some(json!("/var/cache")));
    assert_eq!(map.get("dir").unwrap(), Some(json!({"cache": "/var/cache"})));
}

#[test]
fn scenario_batch_set() {
    let mut map = PathMap::new();
    map.set_many([("a.b", 1), ("a.c", 2)]);
    assert_eq!(map.all(), json!({"a": {"b": 1, "c": 2}}));
}

#[test]
fn scenario_push() {
    let mut map = PathMap::new();
    map.push("list", 1).unwrap().push("list", 2).unwrap();
    assert_eq!(map.get("list").unwrap(), Some(json!([1, 2])));
}

#[test]
fn copies_from_another_map_with_new_delimiter() {
    let mut source = PathMap::new();
    source.set("a/b", 1);

    let literal = PathMap::from_map(&source, false, "/").unwrap();
    assert_eq!(literal.all(), json!({"a/b": 1}));
    assert!(literal.has("a/b"));

    let parsed = PathMap::from_map(&source, true, "/").unwrap();
    assert_eq!(parsed.all(), json!({"a": {"b": 1}}));
}

#[test]
fn built_from_deserialized_options() {
    let options: PathMapOptions = serde_yaml::from_str("delimiter: \"::\"\nparse: true\n").unwrap();
    let map = PathMap::with_options(json!({"db::host": "localhost"}), &options).unwrap();
    assert_eq!(map.all(), json!({"db": {"host": "localhost"}}));

    let bad = PathMapOptions {
        delimiter: String::new(),
        parse: false,
    };
    assert!(matches!(
        PathMap::with_options(json!({}), &bad),
        Err(PathMapError::InvalidConfiguration(_))
    ));
}

#[test]
fn extend_applies_paths() {
    let mut map = PathMap::new();
    map.extend([("x.y", json!(1))]);
    map.extend(vec![("x.z".to_string(), json!(2))]);
    assert_eq!(map.get("x").unwrap(), Some(json!({"y": 1, "z": 2})));
}
