//! Nested get/set/has/delete over `serde_json::Value` trees.
//!
//! All four operations descend through JSON objects only. Reads stop with
//! `None` at the first missing key or non-object intermediate; writes
//! create intermediate objects as needed, replacing non-object values that
//! stand in the way.

use serde_json::{Map, Value};

use crate::KeyPath;

/// Get a reference to the value at `path`.
///
/// Returns `None` if any segment is missing or a non-object value is
/// reached before the final segment.
pub fn get<'a>(root: &'a Value, path: &KeyPath) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.iter() {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Check whether `path` resolves to a value.
pub fn has(root: &Value, path: &KeyPath) -> bool {
    get(root, path).is_some()
}

/// Set `value` at `path`, creating intermediate objects as needed.
///
/// A non-object value sitting where an intermediate object is needed gets
/// replaced with a fresh object. If `root` itself is not an object the
/// call is a no-op: the document is left exactly as it was.
pub fn set(root: &mut Value, path: &KeyPath, value: Value) {
    if !root.is_object() {
        return;
    }
    let Some((leaf, parents)) = path.segments.split_last() else {
        return;
    };

    // `current` is an object on every iteration: the root is checked
    // above and each child is forced to an object before descent.
    let mut current = root;
    for segment in parents {
        let map = match current {
            Value::Object(map) => map,
            _ => return,
        };
        let child = map
            .entry(segment.as_str())
            .or_insert_with(|| Value::Object(Map::new()));
        if !child.is_object() {
            *child = Value::Object(Map::new());
        }
        current = child;
    }
    if let Value::Object(map) = current {
        map.insert(leaf.clone(), value);
    }
}

/// Remove the value at `path` from its parent object, returning it.
///
/// Returns `None` without touching the document when the path does not
/// resolve.
pub fn delete(root: &mut Value, path: &KeyPath) -> Option<Value> {
    let (leaf, parents) = path.segments.split_last()?;
    let mut current = root;
    for segment in parents {
        current = current.as_object_mut()?.get_mut(segment)?;
    }
    current.as_object_mut()?.remove(leaf)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn get_nested_value() {
        let doc = json!({"foo": {"bar": "hello"}});

        assert_eq!(get(&doc, &KeyPath::new("foo.bar")), Some(&json!("hello")));
        assert_eq!(
            get(&doc, &KeyPath::new("foo")),
            Some(&json!({"bar": "hello"}))
        );
        assert_eq!(get(&doc, &KeyPath::new("nonexistent")), None);
        assert_eq!(get(&doc, &KeyPath::new("foo.nope")), None);
    }

    #[test]
    fn get_through_scalar_is_none() {
        let doc = json!({"foo": 42});
        assert_eq!(get(&doc, &KeyPath::new("foo.bar")), None);
    }

    #[test]
    fn get_through_array_is_none() {
        // No array-index traversal: arrays end the descent.
        let doc = json!({"items": [1, 2, 3]});
        assert_eq!(get(&doc, &KeyPath::new("items.0")), None);
    }

    #[test]
    fn set_creates_intermediate_objects() {
        let mut doc = json!({});
        set(&mut doc, &KeyPath::new("a.b.c.d"), json!(42));

        assert_eq!(get(&doc, &KeyPath::new("a.b.c.d")), Some(&json!(42)));
        assert!(get(&doc, &KeyPath::new("a.b")).is_some_and(Value::is_object));
    }

    #[test]
    fn set_overwrites_leaf() {
        let mut doc = json!({"a": 1});
        set(&mut doc, &KeyPath::new("a"), json!(2));
        assert_eq!(doc, json!({"a": 2}));
    }

    #[test]
    fn set_replaces_non_object_intermediates() {
        let mut doc = json!({"a": 5});
        set(&mut doc, &KeyPath::new("a.b"), json!(1));
        assert_eq!(doc, json!({"a": {"b": 1}}));
    }

    #[test]
    fn set_on_non_object_root_is_noop() {
        let mut doc = json!([1, 2, 3]);
        set(&mut doc, &KeyPath::new("a"), json!(1));
        assert_eq!(doc, json!([1, 2, 3]));

        let mut doc = json!("scalar");
        set(&mut doc, &KeyPath::new("a.b"), json!(1));
        assert_eq!(doc, json!("scalar"));
    }

    #[test]
    fn set_preserves_siblings() {
        let mut doc = json!({"a": {"x": 1}, "b": 2});
        set(&mut doc, &KeyPath::new("a.y"), json!(3));
        assert_eq!(doc, json!({"a": {"x": 1, "y": 3}, "b": 2}));
    }

    #[test]
    fn has_tracks_get() {
        let doc = json!({"foo": {"bar": null}});
        assert!(has(&doc, &KeyPath::new("foo.bar")));
        assert!(has(&doc, &KeyPath::new("foo")));
        assert!(!has(&doc, &KeyPath::new("foo.baz")));
        assert!(!has(&doc, &KeyPath::new("other")));
    }

    #[test]
    fn delete_returns_removed() {
        let mut doc = json!({"foo": {"bar": "hello"}});

        let removed = delete(&mut doc, &KeyPath::new("foo.bar"));
        assert_eq!(removed, Some(json!("hello")));
        assert_eq!(get(&doc, &KeyPath::new("foo.bar")), None);

        // Parent object stays behind, emptied
        assert_eq!(get(&doc, &KeyPath::new("foo")), Some(&json!({})));
    }

    #[test]
    fn delete_absent_is_noop() {
        let mut doc = json!({"foo": 1});
        assert_eq!(delete(&mut doc, &KeyPath::new("bar")), None);
        assert_eq!(delete(&mut doc, &KeyPath::new("foo.bar.baz")), None);
        assert_eq!(doc, json!({"foo": 1}));
    }

    #[test]
    fn empty_key_is_addressable() {
        let mut doc = json!({});
        set(&mut doc, &KeyPath::new(""), json!("root-ish"));
        assert_eq!(doc, json!({"": "root-ish"}));
        assert!(has(&doc, &KeyPath::new("")));
        assert_eq!(delete(&mut doc, &KeyPath::new("")), Some(json!("root-ish")));
    }

    #[test]
    fn null_leaf_counts_as_present() {
        let doc = json!({"a": null});
        assert!(has(&doc, &KeyPath::new("a")));
        assert_eq!(get(&doc, &KeyPath::new("a")), Some(&Value::Null));
    }
}
