// FofaSift - core/stats.rs
//
// Summary statistics and distinct-value helpers used to populate filter
// choices. Pure functions over a record slice.

use crate::core::model::{HostRecord, RecordField};
use std::collections::HashSet;

/// Headline numbers for a record set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DatasetSummary {
    pub total_records: usize,
    pub unique_countries: usize,
    pub unique_ports: usize,
    pub https_endpoints: usize,
}

impl DatasetSummary {
    pub fn from_records(records: &[HostRecord]) -> Self {
        Self {
            total_records: records.len(),
            unique_countries: distinct_values(records, RecordField::Country).len(),
            unique_ports: distinct_values(records, RecordField::Port).len(),
            https_endpoints: records.iter().filter(|r| r.is_https()).count(),
        }
    }
}

/// Distinct values of `field`, exactly deduplicated, in discovery order.
///
/// Empty values count as a value of their own (a record with no country
/// contributes `""`).
pub fn distinct_values(records: &[HostRecord], field: RecordField) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    records
        .iter()
        .map(|record| record.field(field))
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}

/// Country filter choices, in discovery order.
pub fn country_choices(records: &[HostRecord]) -> Vec<String> {
    distinct_values(records, RecordField::Country)
}

/// Port filter choices, ordered numerically.
///
/// Ports that do not parse as integers sort after all numeric ports, in
/// string order.
pub fn port_choices(records: &[HostRecord]) -> Vec<String> {
    let mut ports = distinct_values(records, RecordField::Port);
    ports.sort_by(|a, b| match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => std::cmp::Ordering::Less,
        (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    });
    ports
}
