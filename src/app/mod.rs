// FofaSift - app/mod.rs
//
// Application layer: session state and query orchestration.
// Dependencies: core layer.
// Must NOT depend on: platform specifics.

pub mod state;
