// FofaSift - core/query.rs
//
// The combined search + filter + sort operation behind every displayed or
// exported view. Recomputed on demand by the caller; nothing here caches.

use crate::core::filter::{apply_filters, FilterState};
use crate::core::model::HostRecord;
use crate::core::sort::{sort_indices, SortDirection, SortKey};

/// Everything a caller can ask of a record view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    pub search_term: String,
    pub country: String,
    pub port: String,
    /// `None` keeps the filtered (input) order.
    pub sort_key: Option<SortKey>,
    pub sort_direction: SortDirection,
}

impl QueryOptions {
    /// The filter half of the query.
    pub fn filter_state(&self) -> FilterState {
        FilterState {
            search_term: self.search_term.clone(),
            country: self.country.clone(),
            port: self.port.clone(),
        }
    }
}

/// Indices into `records` for the filtered, sorted view.
pub fn query_indices(records: &[HostRecord], options: &QueryOptions) -> Vec<usize> {
    let mut indices = apply_filters(records, &options.filter_state());
    sort_indices(
        records,
        &mut indices,
        options.sort_key.as_ref(),
        options.sort_direction,
    );
    indices
}

/// Run a query and return the matching records in view order.
pub fn query(records: &[HostRecord], options: &QueryOptions) -> Vec<HostRecord> {
    let view: Vec<HostRecord> = query_indices(records, options)
        .into_iter()
        .map(|idx| records[idx].clone())
        .collect();

    tracing::debug!(
        total = records.len(),
        matched = view.len(),
        sort = options.sort_key.as_ref().map(SortKey::name).unwrap_or("-"),
        direction = options.sort_direction.label(),
        "Query applied"
    );

    view
}
