// FofaSift - core/filter.rs
//
// Composable filter engine for host records.
// All active filters are AND-combined.
// Core layer: pure logic, no I/O dependencies.

use crate::core::model::HostRecord;

/// Complete filter state. All fields are AND-combined when applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Case-insensitive substring searched across ip, country, organization,
    /// domain and title. Blank = no filter.
    pub search_term: String,

    /// Country substring (case-sensitive). Empty = no filter.
    pub country: String,

    /// Exact port value. Empty = no filter.
    pub port: String,
}

impl FilterState {
    /// Returns true if no filters are active.
    pub fn is_empty(&self) -> bool {
        self.search_term.trim().is_empty() && self.country.is_empty() && self.port.is_empty()
    }
}

/// Apply filters to a slice of records, returning indices of matching records.
///
/// Indices point into the original slice, preserving input order, so callers
/// can sort or render a view without copying records.
pub fn apply_filters(records: &[HostRecord], filter: &FilterState) -> Vec<usize> {
    if filter.is_empty() {
        return (0..records.len()).collect();
    }

    let term_lower = search_needle(&filter.search_term);

    records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches_all(record, filter, &term_lower))
        .map(|(idx, _)| idx)
        .collect()
}

/// Records matching a free-text search term. Blank terms match everything.
pub fn search<'a>(records: &'a [HostRecord], term: &str) -> Vec<&'a HostRecord> {
    let term_lower = search_needle(term);
    records
        .iter()
        .filter(|record| matches_search(record, &term_lower))
        .collect()
}

/// Records whose country contains `country`. Empty is a pass-through.
pub fn filter_by_country<'a>(records: &'a [HostRecord], country: &str) -> Vec<&'a HostRecord> {
    records
        .iter()
        .filter(|record| matches_country(record, country))
        .collect()
}

/// Records whose port equals `port` exactly. Empty is a pass-through.
pub fn filter_by_port<'a>(records: &'a [HostRecord], port: &str) -> Vec<&'a HostRecord> {
    records
        .iter()
        .filter(|record| matches_port(record, port))
        .collect()
}

/// Lowercased search needle; blank input collapses to the empty string so
/// every record matches.
fn search_needle(term: &str) -> String {
    if term.trim().is_empty() {
        String::new()
    } else {
        term.to_lowercase()
    }
}

/// Check if a single record matches all active filters.
fn matches_all(record: &HostRecord, filter: &FilterState, term_lower: &str) -> bool {
    matches_search(record, term_lower)
        && matches_country(record, &filter.country)
        && matches_port(record, &filter.port)
}

fn matches_search(record: &HostRecord, term_lower: &str) -> bool {
    if term_lower.is_empty() {
        return true;
    }
    [
        &record.ip,
        &record.country,
        &record.organization,
        &record.domain,
        &record.title,
    ]
    .iter()
    .any(|value| value.to_lowercase().contains(term_lower))
}

fn matches_country(record: &HostRecord, country: &str) -> bool {
    country.is_empty() || record.country.contains(country)
}

fn matches_port(record: &HostRecord, port: &str) -> bool {
    port.is_empty() || record.port == port
}
