//! Flatten a grouped diff into one path-ordered stream of change records.

use tracing::debug;

use crate::change::{ChangeKind, ChangeRecord, GroupedDiff, Payload};
use crate::error::{DiffError, DiffResult};

/// Normalize a grouped diff into change records sorted by path string.
///
/// Ordering is the plain lexical order of the path strings, so siblings and
/// descendants interleave the way the paths spell out. The sort is stable:
/// records that share a path keep the order their categories were inserted
/// into the grouped diff.
/// An empty result means "no differences".
pub fn normalize_diffs(diff: &GroupedDiff) -> DiffResult<Vec<ChangeRecord>> {
    let mut records = Vec::with_capacity(diff.len());

    for (category, entries) in diff.groups() {
        if entries.is_empty() {
            continue;
        }
        let kind: ChangeKind = category.parse()?;
        for (path, payload) in entries {
            if kind.is_pair() != matches!(payload, Payload::Changed { .. }) {
                return Err(DiffError::MalformedPayload {
                    category: category.to_string(),
                    path: path.clone(),
                });
            }
            records.push(ChangeRecord {
                kind,
                path: path.clone(),
                payload: payload.clone(),
            });
        }
    }

    records.sort_by(|a, b| a.path.cmp(&b.path));
    debug!(records = records.len(), "normalized grouped diff");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn value(v: serde_json::Value) -> Payload {
        Payload::Value(v)
    }

    fn kinds(diff: &GroupedDiff) -> Vec<ChangeKind> {
        let records = normalize_diffs(diff).unwrap();
        records.iter().map(|r| r.kind).collect()
    }

    #[test]
    fn empty_diff_yields_no_records() {
        assert!(normalize_diffs(&GroupedDiff::new()).unwrap().is_empty());
    }

    #[test]
    fn records_interleave_by_path() {
        let added = ChangeKind::DictionaryItemAdded;
        let mut diff = GroupedDiff::new();
        diff.insert(added, "root['a']['f']", value(json!(5)));
        diff.insert(added, "root['a']['b']['g']", value(json!(6)));
        diff.insert(
            ChangeKind::ValuesChanged,
            "root['a']['b']['c']['d']",
            Payload::Changed {
                old: json!(1),
                new: json!(3),
            },
        );

        let paths: Vec<_> = normalize_diffs(&diff)
            .unwrap()
            .into_iter()
            .map(|r| r.path)
            .collect();
        assert_eq!(
            paths,
            vec![
                "root['a']['b']['c']['d']",
                "root['a']['b']['g']",
                "root['a']['f']"
            ]
        );
    }

    #[test]
    fn ordering_is_lexical_not_numeric() {
        let added = ChangeKind::IterableItemAdded;
        let mut diff = GroupedDiff::new();
        diff.insert(added, "root['l'][2]", value(json!(2)));
        diff.insert(added, "root['l'][10]", value(json!(10)));

        let records = normalize_diffs(&diff).unwrap();
        assert_eq!(records[0].path, "root['l'][10]");
        assert_eq!(records[1].path, "root['l'][2]");
    }

    #[test]
    fn identical_paths_keep_insertion_order() {
        let added = ChangeKind::IterableItemAdded;
        let removed = ChangeKind::IterableItemRemoved;

        let mut diff = GroupedDiff::new();
        diff.insert(removed, "root['l'][1]", value(json!("x")));
        diff.insert(added, "root['l'][1]", value(json!("y")));
        assert_eq!(kinds(&diff), vec![removed, added]);

        let mut diff = GroupedDiff::new();
        diff.insert(added, "root['l'][1]", value(json!("y")));
        diff.insert(removed, "root['l'][1]", value(json!("x")));
        assert_eq!(kinds(&diff), vec![added, removed]);
    }

    #[test]
    fn identical_paths_follow_document_order_from_json() {
        let diff = GroupedDiff::from_json(json!({
            "iterable_item_removed": {"root['l'][1]": "x"},
            "iterable_item_added": {"root['l'][1]": "y"},
        }))
        .unwrap();
        assert_eq!(
            kinds(&diff),
            vec![ChangeKind::IterableItemRemoved, ChangeKind::IterableItemAdded]
        );
    }

    #[test]
    fn unknown_category_fails() {
        let mut diff = GroupedDiff::new();
        diff.insert_raw("type_changes", "root['a']", value(json!(1)));
        assert!(matches!(
            normalize_diffs(&diff),
            Err(DiffError::UnsupportedChangeCategory(_))
        ));
    }

    #[test]
    fn mismatched_payload_fails() {
        let mut diff = GroupedDiff::new();
        diff.insert(ChangeKind::ValuesChanged, "root['a']", value(json!(1)));
        assert!(matches!(
            normalize_diffs(&diff),
            Err(DiffError::MalformedPayload { .. })
        ));
    }
}
