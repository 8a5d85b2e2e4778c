//! In-memory tables passed between pipeline stages.
//!
//! A [`RawTable`] is the loose, column-varying shape adapters hand to the
//! normalizer; a [`CanonicalTable`] is the typed shape analytics consume.
//! Both are plain value data owned by one pipeline invocation — nothing is
//! shared or mutated across runs.

use std::collections::BTreeSet;

use crate::schema::CanonicalRecord;

/// One raw row: an unordered mapping of field names to JSON values.
///
/// Adapters guarantee the keys are a superset-of-canonical field names for
/// whatever fields the platform actually returned; anything else (e.g.
/// `author_name`) rides along and is ignored by the normalizer.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// A batch of raw rows, possibly spanning multiple platforms.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    rows: Vec<RawRecord>,
}

impl RawTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_rows(rows: Vec<RawRecord>) -> Self {
        Self { rows }
    }

    pub fn push(&mut self, row: RawRecord) {
        self.rows.push(row);
    }

    /// Append all rows of `other`, consuming it. Used to merge per-platform
    /// batches into one collection result.
    pub fn extend(&mut self, other: RawTable) {
        self.rows.extend(other.rows);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn rows(&self) -> &[RawRecord] {
        &self.rows
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<RawRecord> {
        self.rows
    }

    /// Union of keys observed across all rows, sorted.
    ///
    /// Rows from different platforms carry different optional fields, so this
    /// is diagnostic only — normalization aligns to the canonical schema, not
    /// to this set.
    #[must_use]
    pub fn columns(&self) -> BTreeSet<String> {
        self.rows
            .iter()
            .flat_map(|row| row.keys().cloned())
            .collect()
    }
}

impl FromIterator<RawRecord> for RawTable {
    fn from_iter<I: IntoIterator<Item = RawRecord>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for RawTable {
    type Item = RawRecord;
    type IntoIter = std::vec::IntoIter<RawRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

/// A batch of normalized records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalTable {
    records: Vec<CanonicalRecord>,
}

impl CanonicalTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_records(records: Vec<CanonicalRecord>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn records(&self) -> &[CanonicalRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CanonicalRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn into_records(self) -> Vec<CanonicalRecord> {
        self.records
    }
}

impl FromIterator<CanonicalRecord> for CanonicalTable {
    fn from_iter<I: IntoIterator<Item = CanonicalRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a CanonicalTable {
    type Item = &'a CanonicalRecord;
    type IntoIter = std::slice::Iter<'a, CanonicalRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
