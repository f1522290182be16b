// Copyright 2025 the Fieldwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat field records: the data side of the transfer.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use smallvec::SmallVec;

/// One field value. Form state reduces to exactly two primitive shapes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    /// Free text: text control contents and option values.
    Text(String),
    /// A boolean: checkbox state.
    Flag(bool),
}

impl Value {
    /// Boolean coercion: flags as-is, text true unless empty.
    ///
    /// This mirrors the loose coercion of the domains these records come
    /// from, so `Text("false")` is still true. Checkbox writes go through
    /// this.
    pub fn truthy(&self) -> bool {
        match self {
            Self::Flag(b) => *b,
            Self::Text(s) => !s.is_empty(),
        }
    }

    /// Whether this value names the given option value.
    ///
    /// Flags never match: a boolean is not an option value string. Radio
    /// and select writes go through this.
    pub fn matches(&self, option_value: &str) -> bool {
        match self {
            Self::Text(s) => s == option_value,
            Self::Flag(_) => false,
        }
    }

    /// The text rendering used when writing into text controls.
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// The contained text, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Flag(_) => None,
        }
    }

    /// The contained flag, if any.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Text(_) => None,
            Self::Flag(b) => Some(*b),
        }
    }
}

impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Flag(true) => f.write_str("true"),
            Self::Flag(false) => f.write_str("false"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

/// A flat data record: field name to ordered value list.
///
/// Records are what [`serialize`](crate::serialize) produces and
/// [`deserialize`](crate::deserialize) consumes. Names are unique; each
/// name owns an ordered list of values. Iteration is sorted by name, so
/// equality and snapshots are deterministic.
///
/// A name that is present with an empty list is distinct from an absent
/// name: the write pass substitutes per-class defaults for the former and
/// leaves controls untouched for the latter.
///
/// ```rust
/// use fieldwork_transfer::DataRecord;
///
/// let mut record = DataRecord::new();
/// record.set("tags", ["a", "c"]);
/// record.set("subscribed", [true]);
/// assert_eq!(record.len(), 2);
/// assert!(record.first("subscribed").unwrap().truthy());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataRecord {
    fields: BTreeMap<String, SmallVec<[Value; 2]>>,
}

impl DataRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the value list for `name`.
    ///
    /// An empty iterator stores a present-but-empty entry; use
    /// [`DataRecord::remove`] to make a name absent.
    pub fn set(
        &mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<Value>>,
    ) {
        self.fields
            .insert(name.into(), values.into_iter().map(Into::into).collect());
    }

    /// Appends one value to `name`, creating the entry if absent.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields
            .entry(name.into())
            .or_default()
            .push(value.into());
    }

    /// The value list for `name`, if present.
    pub fn values(&self, name: &str) -> Option<&[Value]> {
        self.fields.get(name).map(|v| v.as_slice())
    }

    /// The first value for `name`, if any.
    pub fn first(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)?.first()
    }

    /// Whether `name` is present (even with an empty list).
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Removes `name`, returning its values if it was present.
    pub fn remove(&mut self, name: &str) -> Option<Vec<Value>> {
        self.fields.remove(name).map(SmallVec::into_vec)
    }

    /// Field names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Name and value-list pairs, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Value])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of named entries.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no entries.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn truthiness_mirrors_loose_coercion() {
        assert!(Value::Flag(true).truthy());
        assert!(!Value::Flag(false).truthy());
        assert!(Value::Text("x".into()).truthy());
        assert!(Value::Text("false".into()).truthy());
        assert!(!Value::Text(String::new()).truthy());
    }

    #[test]
    fn flags_never_match_option_values() {
        assert!(Value::Text("b".into()).matches("b"));
        assert!(!Value::Text("b".into()).matches("c"));
        assert!(!Value::Flag(true).matches("true"));
    }

    #[test]
    fn text_rendering() {
        assert_eq!(Value::Text("hi".into()).to_text(), "hi");
        assert_eq!(Value::Flag(true).to_text(), "true");
        assert_eq!(Value::Flag(false).to_text(), "false");
    }

    #[test]
    fn typed_projections() {
        assert_eq!(Value::Text("hi".into()).as_text(), Some("hi"));
        assert!(Value::Text("hi".into()).as_flag().is_none());
        assert_eq!(Value::Flag(true).as_flag(), Some(true));
        assert!(Value::Flag(true).as_text().is_none());
    }

    #[test]
    fn set_replaces_and_push_appends() {
        let mut record = DataRecord::new();
        record.set("t", ["a"]);
        record.set("t", ["b", "c"]);
        assert_eq!(
            record.values("t").unwrap(),
            &[Value::Text("b".into()), Value::Text("c".into())]
        );

        record.push("t", false);
        assert_eq!(record.values("t").unwrap().len(), 3);
        assert_eq!(record.values("t").unwrap()[2], Value::Flag(false));
    }

    #[test]
    fn present_but_empty_is_not_absent() {
        let mut record = DataRecord::new();
        record.set("empty", Vec::<Value>::new());
        assert!(record.contains("empty"));
        assert_eq!(record.values("empty"), Some(&[][..]));
        assert!(record.first("empty").is_none());
        assert!(!record.contains("missing"));
        assert_eq!(record.values("missing"), None);
    }

    #[test]
    fn names_iterate_sorted() {
        let mut record = DataRecord::new();
        record.set("b", ["1"]);
        record.set("a", ["2"]);
        record.set("c", [true]);
        assert_eq!(record.names().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn iter_yields_sorted_pairs() {
        let mut record = DataRecord::new();
        record.set("b", ["1"]);
        record.set("a", [true]);
        let pairs: Vec<_> = record.iter().collect();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0], ("a", &[Value::Flag(true)][..]));
        assert_eq!(pairs[1], ("b", &[Value::Text("1".into())][..]));
    }

    #[test]
    fn remove_returns_values() {
        let mut record = DataRecord::new();
        record.set("t", ["a"]);
        assert_eq!(record.remove("t"), Some(vec![Value::Text("a".into())]));
        assert!(record.remove("t").is_none());
        assert!(record.is_empty());
    }
}
