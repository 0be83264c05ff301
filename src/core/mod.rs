// FofaSift - core/mod.rs
//
// Core business logic layer: the record parser and the query engine.
// Dependencies: util layer, regex, csv, serde, toml, chrono.
// Must NOT depend on: platform, app, or perform any I/O of its own.

pub mod export;
pub mod filter;
pub mod model;
pub mod parser;
pub mod query;
pub mod sample;
pub mod sort;
pub mod stats;
