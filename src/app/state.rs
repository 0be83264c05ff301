// FofaSift - app/state.rs
//
// Session state management. Holds the parsed records, the active query
// options and the resulting view. Owned by whichever front end drives the
// session (the CLI today).

use crate::core::export;
use crate::core::model::{HostRecord, RecordField};
use crate::core::parser;
use crate::core::query::{query_indices, QueryOptions};
use crate::core::sample;
use crate::core::sort::{SortDirection, SortKey};
use crate::core::stats::{self, DatasetSummary};

/// Top-level session state.
#[derive(Debug, Default)]
pub struct AppState {
    /// All records from the most recent successful parse.
    pub records: Vec<HostRecord>,

    /// Current search, filter and sort configuration.
    pub options: QueryOptions,

    /// Indices of records in the current view (into `records`).
    pub view: Vec<usize>,
}

impl AppState {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the session's records with those parsed from `raw_text`.
    ///
    /// Blank input is rejected and leaves the session untouched. A successful
    /// load clears the search, country and port filters but keeps the sort.
    /// Returns true when the text was loaded.
    pub fn load_text(&mut self, raw_text: &str) -> bool {
        if raw_text.trim().is_empty() {
            tracing::debug!("Ignoring blank input");
            return false;
        }

        self.replace_records(parser::parse(raw_text));
        tracing::info!(records = self.records.len(), "Scan data loaded");
        true
    }

    /// Replace the session's records with the built-in sample dataset.
    ///
    /// Filters are cleared and the sort is kept, as for `load_text`.
    pub fn load_sample(&mut self) {
        self.replace_records(sample::sample_records());
        tracing::info!(records = self.records.len(), "Sample data loaded");
    }

    fn replace_records(&mut self, records: Vec<HostRecord>) {
        self.records = records;
        self.options.search_term.clear();
        self.options.country.clear();
        self.options.port.clear();
        self.apply_query();
    }

    /// Recompute the view from the current records and options.
    pub fn apply_query(&mut self) {
        self.view = query_indices(&self.records, &self.options);
    }

    /// Select `field` as the sort key. Selecting the current key again flips
    /// the direction; a new key starts ascending.
    pub fn toggle_sort(&mut self, field: RecordField) {
        let key = SortKey::Field(field);
        self.options.sort_direction = if self.options.sort_key.as_ref() == Some(&key) {
            self.options.sort_direction.toggled()
        } else {
            SortDirection::Ascending
        };
        self.options.sort_key = Some(key);
        self.apply_query();
    }

    /// Records in the current view, in view order.
    pub fn visible_records(&self) -> Vec<&HostRecord> {
        self.view
            .iter()
            .filter_map(|&idx| self.records.get(idx))
            .collect()
    }

    /// Owned copy of the current view, for export.
    pub fn visible_owned(&self) -> Vec<HostRecord> {
        self.visible_records().into_iter().cloned().collect()
    }

    /// Delimited text for the current view.
    pub fn export_view_csv(&self) -> String {
        export::to_delimited_text(&self.visible_owned())
    }

    /// Summary over all loaded records (not just the view).
    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary::from_records(&self.records)
    }

    pub fn country_choices(&self) -> Vec<String> {
        stats::country_choices(&self.records)
    }

    pub fn port_choices(&self) -> Vec<String> {
        stats::port_choices(&self.records)
    }
}
