//! Field bags flowing through the extraction pipeline.

use std::collections::BTreeMap;

use serde::Serialize;

/// Raw form fields exactly as the reader produced them.
///
/// Keeps reader order: an identifier stays at the position where it was
/// first seen, and inserting it again replaces the value in place. The
/// mapper's last-write-wins conflict policy depends on this order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFieldSet {
    entries: Vec<(String, String)>,
}

impl RawFieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a field value.
    pub fn insert(&mut self, identifier: impl Into<String>, value: impl Into<String>) {
        let identifier = identifier.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == identifier) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((identifier, value)),
        }
    }

    pub fn get(&self, identifier: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == identifier)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate in reader order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawFieldSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (k, v) in iter {
            set.insert(k, v);
        }
        set
    }
}

/// Canonical field name → trimmed, non-empty value.
///
/// Serialises as a plain JSON object in name order (the record's
/// `raw_fields` section).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CanonicalFieldSet {
    fields: BTreeMap<String, String>,
}

impl CanonicalFieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value, returning the one it replaced.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.fields.insert(name.into(), value.into())
    }

    /// Value of a field, treating empty strings as absent.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CanonicalFieldSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (k, v) in iter {
            set.insert(k, v);
        }
        set
    }
}

/// Everything the reader hands over for one document.
#[derive(Debug, Clone, Default)]
pub struct DocumentInput {
    /// Basename of the source file.
    pub name: String,
    pub raw_fields: RawFieldSet,
    pub raw_text: String,
}

impl DocumentInput {
    /// An input with no fields and no text (unreadable source).
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_reinsert_keeps_position() {
        let mut raw = RawFieldSet::new();
        raw.insert("a", "1");
        raw.insert("b", "2");
        raw.insert("a", "3");

        let order: Vec<_> = raw.iter().collect();
        assert_eq!(order, vec![("a", "3"), ("b", "2")]);
        assert_eq!(raw.len(), 2);
    }

    #[test]
    fn raw_from_iter() {
        let raw: RawFieldSet = [("x", "1"), ("y", "2")].into_iter().collect();
        assert_eq!(raw.get("y"), Some("2"));
        assert!(raw.get("z").is_none());
    }

    #[test]
    fn canonical_get_treats_empty_as_absent() {
        let mut set = CanonicalFieldSet::new();
        set.insert("company_name", "");
        assert!(set.get("company_name").is_none());
        assert!(!set.contains("company_name"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn canonical_serialises_as_sorted_object() {
        let set: CanonicalFieldSet = [("b", "2"), ("a", "1")].into_iter().collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"{"a":"1","b":"2"}"#);
    }

    #[test]
    fn empty_input() {
        let input = DocumentInput::empty("form.pdf");
        assert_eq!(input.name, "form.pdf");
        assert!(input.raw_fields.is_empty());
        assert!(input.raw_text.is_empty());
    }
}
