//! Ordered bag metadata records
//!
//! A [`BagInfo`] holds the label/value pairs destined for a bag's
//! `bag-info.txt`. Labels stay in first-appearance order so the written file
//! reads like the template that produced it, and a label repeated by the
//! template folds into one entry rather than producing duplicate lines.

use crate::fields;
use uuid::Uuid;

/// Separator between values folded into a single entry
pub const VALUE_SEPARATOR: &str = " | ";

/// An ordered collection of bag-info label/value pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BagInfo {
    entries: Vec<(String, String)>,
}

impl BagInfo {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries in the record
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the record has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the record carries the given label
    pub fn contains(&self, label: &str) -> bool {
        self.entries.iter().any(|(l, _)| l == label)
    }

    /// Value stored under a label, if any
    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    /// Insert a label, or overwrite its value in place if already present
    pub fn set(&mut self, label: impl Into<String>, value: impl Into<String>) {
        let label = label.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((label, value)),
        }
    }

    /// Insert a label, or fold the value into an existing entry
    ///
    /// A repeated label keeps its original position; the new value is joined
    /// onto the existing one with [`VALUE_SEPARATOR`].
    pub fn merge(&mut self, label: impl Into<String>, value: impl Into<String>) {
        let label = label.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some((_, existing)) => {
                existing.push_str(VALUE_SEPARATOR);
                existing.push_str(&value);
            },
            None => self.entries.push((label, value)),
        }
    }

    /// Append a continuation line to an existing entry
    ///
    /// No-op when the label is absent; the template parser only continues
    /// labels it has already inserted. A label still waiting for its first
    /// value takes the line as-is, so the separator only ever sits between
    /// two nonempty parts.
    pub fn append_line(&mut self, label: &str, line: &str) {
        if let Some((_, value)) = self.entries.iter_mut().find(|(l, _)| l == label) {
            if !value.is_empty() {
                value.push('\n');
            }
            value.push_str(line);
        }
    }

    /// Generate a fresh identifier and prepend it to `External-Identifier`
    ///
    /// The template's own identifier values are preserved after the generated
    /// one, so a bag stays findable by both. Returns the bare identifier for
    /// the run ledger.
    pub fn assign_identifier(&mut self) -> String {
        let id = Uuid::new_v4().to_string();
        match self.get(fields::EXTERNAL_IDENTIFIER).map(str::to_string) {
            Some(existing) => {
                let joined = format!("{}{}{}", id, VALUE_SEPARATOR, existing);
                self.set(fields::EXTERNAL_IDENTIFIER, joined);
            },
            None => self.set(fields::EXTERNAL_IDENTIFIER, id.clone()),
        }
        id
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(l, v)| (l.as_str(), v.as_str()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut record = BagInfo::new();
        record.set("Contact-Name", "A. Archivist");
        assert_eq!(record.get("Contact-Name"), Some("A. Archivist"));
        assert_eq!(record.get("Contact-Phone"), None);
    }

    #[test]
    fn test_set_overwrites_in_place() {
        let mut record = BagInfo::new();
        record.set("Contact-Name", "A. Archivist");
        record.set("Contact-Email", "a@example.org");
        record.set("Contact-Name", "B. Archivist");

        assert_eq!(record.len(), 2);
        let labels: Vec<&str> = record.iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["Contact-Name", "Contact-Email"]);
        assert_eq!(record.get("Contact-Name"), Some("B. Archivist"));
    }

    #[test]
    fn test_merge_folds_repeated_labels() {
        let mut record = BagInfo::new();
        record.merge("External-Identifier", "coll-001");
        record.merge("External-Identifier", "coll-002");

        assert_eq!(record.len(), 1);
        assert_eq!(record.get("External-Identifier"), Some("coll-001 | coll-002"));
    }

    #[test]
    fn test_append_line() {
        let mut record = BagInfo::new();
        record.merge("External-Description", "First line");
        record.append_line("External-Description", "second line");

        assert_eq!(record.get("External-Description"), Some("First line\nsecond line"));
    }

    #[test]
    fn test_append_line_to_empty_value_adds_no_separator() {
        let mut record = BagInfo::new();
        record.merge("External-Description", "");
        record.append_line("External-Description", "added on the next line");

        assert_eq!(record.get("External-Description"), Some("added on the next line"));
    }

    #[test]
    fn test_append_line_missing_label_is_noop() {
        let mut record = BagInfo::new();
        record.append_line("External-Description", "orphan");
        assert!(record.is_empty());
    }

    #[test]
    fn test_assign_identifier_with_existing_value() {
        let mut record = BagInfo::new();
        record.set("External-Identifier", "coll-001");
        let id = record.assign_identifier();

        let value = record.get("External-Identifier").unwrap();
        assert!(Uuid::parse_str(&id).is_ok());
        assert_eq!(value, format!("{} | coll-001", id));
    }

    #[test]
    fn test_assign_identifier_without_existing_value() {
        let mut record = BagInfo::new();
        let id = record.assign_identifier();

        assert!(Uuid::parse_str(&id).is_ok());
        assert_eq!(record.get("External-Identifier"), Some(id.as_str()));
    }

    #[test]
    fn test_assign_identifier_is_unique_per_call() {
        let mut a = BagInfo::new();
        let mut b = BagInfo::new();
        assert_ne!(a.assign_identifier(), b.assign_identifier());
    }

    #[test]
    fn test_iteration_preserves_insertion_order() {
        let mut record = BagInfo::new();
        record.set("Source-Organization", "Example University");
        record.set("Contact-Name", "A. Archivist");
        record.set("Rights-Statement", "Open");

        let labels: Vec<&str> = record.iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["Source-Organization", "Contact-Name", "Rights-Statement"]);
    }
}
