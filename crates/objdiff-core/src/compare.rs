//! Structural comparison of two documents into a [`GroupedDiff`].
//!
//! Maps are compared by key, sequences by position, and anything else by
//! equality. Locations are addressed with bracket paths rooted at `root`.

use serde_json::{Map, Value};

use crate::change::{ChangeKind, GroupedDiff, Payload};

const ROOT: &str = "root";

/// Compare `old` against `new` and group the differences by category.
///
/// Key order inside maps is irrelevant. Sequences of different length pair
/// elements up by index; the excess is reported as added or removed items.
pub fn compare_values(old: &Value, new: &Value) -> GroupedDiff {
    let mut diff = GroupedDiff::new();
    compare_at(ROOT, old, new, &mut diff);
    diff
}

fn compare_at(path: &str, old: &Value, new: &Value, diff: &mut GroupedDiff) {
    match (old, new) {
        (Value::Object(old_map), Value::Object(new_map)) => {
            compare_maps(path, old_map, new_map, diff);
        }
        (Value::Array(old_items), Value::Array(new_items)) => {
            compare_sequences(path, old_items, new_items, diff);
        }
        _ => {
            if old != new {
                diff.insert(
                    ChangeKind::ValuesChanged,
                    path,
                    Payload::Changed {
                        old: old.clone(),
                        new: new.clone(),
                    },
                );
            }
        }
    }
}

fn compare_maps(
    path: &str,
    old: &Map<String, Value>,
    new: &Map<String, Value>,
    diff: &mut GroupedDiff,
) {
    // Check for removed and modified keys.
    for (key, old_val) in old {
        let child = key_path(path, key);
        match new.get(key) {
            Some(new_val) => compare_at(&child, old_val, new_val, diff),
            None => diff.insert(
                ChangeKind::DictionaryItemRemoved,
                child,
                Payload::Value(old_val.clone()),
            ),
        }
    }

    // Check for added keys.
    for (key, new_val) in new {
        if !old.contains_key(key) {
            diff.insert(
                ChangeKind::DictionaryItemAdded,
                key_path(path, key),
                Payload::Value(new_val.clone()),
            );
        }
    }
}

fn compare_sequences(path: &str, old: &[Value], new: &[Value], diff: &mut GroupedDiff) {
    for index in 0..old.len().max(new.len()) {
        let child = format!("{path}[{index}]");
        match (old.get(index), new.get(index)) {
            (Some(old_val), Some(new_val)) => compare_at(&child, old_val, new_val, diff),
            (Some(old_val), None) => diff.insert(
                ChangeKind::IterableItemRemoved,
                child,
                Payload::Value(old_val.clone()),
            ),
            (None, Some(new_val)) => diff.insert(
                ChangeKind::IterableItemAdded,
                child,
                Payload::Value(new_val.clone()),
            ),
            (None, None) => {}
        }
    }
}

fn key_path(parent: &str, key: &str) -> String {
    let escaped = key.replace('\\', "\\\\").replace('\'', "\\'");
    format!("{parent}['{escaped}']")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_diffs;
    use crate::path::parse_path;
    use serde_json::json;

    fn entries(diff: &GroupedDiff) -> Vec<(String, String)> {
        let mut out = Vec::new();
        for (kind, entries) in diff.groups() {
            for path in entries.keys() {
                out.push((kind.to_string(), path.clone()));
            }
        }
        out.sort();
        out
    }

    fn parse(text: &str) -> Value {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn identical_documents_no_diff() {
        let doc = json!({"a": 1, "b": [1, {"c": null}]});
        assert!(compare_values(&doc, &doc).is_empty());
    }

    #[test]
    fn key_order_is_irrelevant() {
        let a = parse(r#"{"a": 1, "c": {"d": 3, "e": 4}}"#);
        let b = parse(r#"{"c": {"e": 4, "d": 3}, "a": 1}"#);
        assert!(compare_values(&a, &b).is_empty());
    }

    #[test]
    fn map_keys_added_removed_and_changed() {
        let diff = compare_values(&json!({"a": 1, "b": 2}), &json!({"b": 3, "c": 4}));
        assert_eq!(
            entries(&diff),
            vec![
                ("dictionary_item_added".into(), "root['c']".into()),
                ("dictionary_item_removed".into(), "root['a']".into()),
                ("values_changed".into(), "root['b']".into()),
            ]
        );
    }

    #[test]
    fn sequences_pair_by_position() {
        let diff = compare_values(
            &json!({"l": [{"c": 1}, {"e": 4}]}),
            &json!({"l": [{"c": 1}, {"d": 3}, {"e": 4}]}),
        );
        assert_eq!(
            entries(&diff),
            vec![
                ("dictionary_item_added".into(), "root['l'][1]['d']".into()),
                ("dictionary_item_removed".into(), "root['l'][1]['e']".into()),
                ("iterable_item_added".into(), "root['l'][2]".into()),
            ]
        );
    }

    #[test]
    fn kind_mismatch_is_a_value_change() {
        let diff = compare_values(&json!({"a": {"x": 1}}), &json!({"a": [1]}));
        let records = normalize_diffs(&diff).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, ChangeKind::ValuesChanged);
    }

    #[test]
    fn awkward_keys_survive_the_path_round_trip() {
        let new = json!({"it's": 1, r"back\slash": 2, "x[0]": 3});
        let diff = compare_values(&json!({}), &new);
        let mut keys: Vec<String> = normalize_diffs(&diff)
            .unwrap()
            .iter()
            .map(|r| parse_path(&r.path).unwrap().leaf().unwrap().to_string())
            .collect();
        keys.sort();
        assert_eq!(keys, vec![r"back\slash", "it's", "x[0]"]);
    }
}
