// FofaSift - core/sample.rs
//
// Built-in sample dataset, embedded at compile time. Lets a user try the
// query and export paths before they have a dump of their own.

use crate::core::model::HostRecord;
use serde::Deserialize;

/// Embedded TOML source for the sample dataset.
pub fn sample_source() -> &'static str {
    include_str!("../../data/sample_hosts.toml")
}

#[derive(Debug, Deserialize)]
struct SampleSet {
    host: Vec<HostRecord>,
}

/// Load the sample host records.
///
/// An invalid embedded file is logged and yields no records (non-fatal).
pub fn sample_records() -> Vec<HostRecord> {
    match toml::from_str::<SampleSet>(sample_source()) {
        Ok(set) => {
            tracing::debug!(records = set.host.len(), "Loaded built-in sample dataset");
            set.host
        }
        Err(e) => {
            tracing::warn!(error = %e, "Built-in sample dataset is invalid; skipping");
            Vec::new()
        }
    }
}
