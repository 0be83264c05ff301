// FofaSift - core/sort.rs
//
// Single-key ordering of host records.
// Values compare as plain strings (byte order), so "8080" sorts before "443".
// Sorting is stable: ties keep their filtered order in both directions.

use crate::core::model::{HostRecord, RecordField};
use std::cmp::Ordering;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// A sort key as requested by the caller.
///
/// Names that are not record fields are kept rather than rejected; they
/// behave as a field that is empty on every record, leaving order unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey {
    Field(RecordField),
    Unknown(String),
}

impl SortKey {
    /// Resolve a user-supplied field name.
    pub fn from_name(name: &str) -> Self {
        match RecordField::from_key(name) {
            Some(field) => SortKey::Field(field),
            None => {
                tracing::debug!(key = name, "Unknown sort key; treating as empty field");
                SortKey::Unknown(name.to_string())
            }
        }
    }

    /// Value of this key on `record`; empty for unknown keys.
    pub fn value<'a>(&self, record: &'a HostRecord) -> &'a str {
        match self {
            SortKey::Field(field) => record.field(*field),
            SortKey::Unknown(_) => "",
        }
    }

    pub fn name(&self) -> &str {
        match self {
            SortKey::Field(field) => field.key(),
            SortKey::Unknown(name) => name,
        }
    }
}

impl From<RecordField> for SortKey {
    fn from(field: RecordField) -> Self {
        SortKey::Field(field)
    }
}

/// Compare two records on `key` in the given direction.
pub fn compare(a: &HostRecord, b: &HostRecord, key: &SortKey, direction: SortDirection) -> Ordering {
    let ordering = key.value(a).cmp(key.value(b));
    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

/// Sort a view of indices into `records` in place.
///
/// With no key the view keeps its current order.
pub fn sort_indices(
    records: &[HostRecord],
    indices: &mut [usize],
    key: Option<&SortKey>,
    direction: SortDirection,
) {
    if let Some(key) = key {
        indices.sort_by(|&a, &b| compare(&records[a], &records[b], key, direction));
    }
}

/// Return the records ordered by `key`. With no key the input order is kept.
pub fn sort_by<'a>(
    records: &'a [HostRecord],
    key: Option<&SortKey>,
    direction: SortDirection,
) -> Vec<&'a HostRecord> {
    let mut view: Vec<&HostRecord> = records.iter().collect();
    if let Some(key) = key {
        view.sort_by(|a, b| compare(a, b, key, direction));
    }
    view
}
