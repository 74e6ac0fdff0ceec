//! Diff data model: change categories, payloads, and the grouped form
//! produced by the comparison collaborator.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::{DiffError, DiffResult};

/// The five categories of change a grouped diff may contain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChangeKind {
    /// A key present only in the new map.
    DictionaryItemAdded,
    /// A key present only in the old map.
    DictionaryItemRemoved,
    /// A trailing element present only in the new sequence.
    IterableItemAdded,
    /// A trailing element present only in the old sequence.
    IterableItemRemoved,
    /// A location whose value differs between old and new.
    ValuesChanged,
}

impl ChangeKind {
    pub const ALL: [ChangeKind; 5] = [
        ChangeKind::DictionaryItemAdded,
        ChangeKind::DictionaryItemRemoved,
        ChangeKind::IterableItemAdded,
        ChangeKind::IterableItemRemoved,
        ChangeKind::ValuesChanged,
    ];

    /// The category name used in grouped diffs.
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeKind::DictionaryItemAdded => "dictionary_item_added",
            ChangeKind::DictionaryItemRemoved => "dictionary_item_removed",
            ChangeKind::IterableItemAdded => "iterable_item_added",
            ChangeKind::IterableItemRemoved => "iterable_item_removed",
            ChangeKind::ValuesChanged => "values_changed",
        }
    }

    /// Whether this category carries an old/new pair rather than one value.
    pub fn is_pair(self) -> bool {
        matches!(self, ChangeKind::ValuesChanged)
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeKind {
    type Err = DiffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChangeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DiffError::UnsupportedChangeCategory(s.to_string()))
    }
}

/// The value attached to a change.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    /// The added or removed value.
    Value(Value),
    /// The old and new values of a changed location.
    Changed { old: Value, new: Value },
}

impl Payload {
    /// Read a payload in its serialized form: a bare value, or for paired
    /// categories an object with `old_value` and `new_value` keys.
    pub fn from_json(kind: ChangeKind, path: &str, raw: Value) -> DiffResult<Self> {
        if !kind.is_pair() {
            return Ok(Payload::Value(raw));
        }
        let malformed = || DiffError::MalformedPayload {
            category: kind.to_string(),
            path: path.to_string(),
        };
        match raw {
            Value::Object(mut map) => {
                let old = map.remove("old_value").ok_or_else(malformed)?;
                let new = map.remove("new_value").ok_or_else(malformed)?;
                Ok(Payload::Changed { old, new })
            }
            _ => Err(malformed()),
        }
    }
}

/// One normalized unit of difference.
#[derive(Clone, Debug, PartialEq)]
pub struct ChangeRecord {
    pub kind: ChangeKind,
    /// The bracket path string of the changed location.
    pub path: String,
    pub payload: Payload,
}

/// Changes grouped by category name, then by path string.
///
/// Category names are kept as strings until normalization so that a diff
/// read from an external source can carry categories this crate rejects.
/// Categories keep the order they were first inserted in.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GroupedDiff {
    groups: Vec<(String, BTreeMap<String, Payload>)>,
}

impl GroupedDiff {
    /// Create an empty grouped diff.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a change under a known category.
    pub fn insert(&mut self, kind: ChangeKind, path: impl Into<String>, payload: Payload) {
        self.insert_raw(kind.as_str(), path, payload);
    }

    /// Record a change under an arbitrary category name.
    pub fn insert_raw(
        &mut self,
        category: impl Into<String>,
        path: impl Into<String>,
        payload: Payload,
    ) {
        self.group_mut(category.into()).insert(path.into(), payload);
    }

    fn group_mut(&mut self, category: String) -> &mut BTreeMap<String, Payload> {
        let index = match self.groups.iter().position(|(name, _)| *name == category) {
            Some(index) => index,
            None => {
                self.groups.push((category, BTreeMap::new()));
                self.groups.len() - 1
            }
        };
        &mut self.groups[index].1
    }

    /// Returns `true` if no category holds any change.
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|(_, entries)| entries.is_empty())
    }

    /// Total number of changes across all categories.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|(_, entries)| entries.len()).sum()
    }

    /// Iterate over `(category, entries)` groups in insertion order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, Payload>)> {
        self.groups
            .iter()
            .map(|(name, entries)| (name.as_str(), entries))
    }

    /// Read a grouped diff from its JSON form:
    /// `{"<category>": {"<path>": <payload>, ...}, ...}`.
    ///
    /// Categories are grouped in the order they appear in the document.
    pub fn from_json(value: Value) -> DiffResult<Self> {
        let Value::Object(categories) = value else {
            return Err(DiffError::Serialization(
                "grouped diff must be an object keyed by category".into(),
            ));
        };
        let mut grouped = GroupedDiff::new();
        for (category, entries) in categories {
            let kind: ChangeKind = category.parse()?;
            let Value::Object(entries) = entries else {
                return Err(DiffError::Serialization(format!(
                    "category {category} must map paths to payloads"
                )));
            };
            for (path, raw) in entries {
                let payload = Payload::from_json(kind, &path, raw)?;
                grouped.insert(kind, path, payload);
            }
        }
        Ok(grouped)
    }
}
