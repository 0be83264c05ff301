// FofaSift - platform/mod.rs
//
// Platform abstraction layer.
// Dependencies: util layer, directories, toml.
// Must NOT depend on: core, app.

pub mod config;
pub mod fs;
