// FofaSift - lib.rs
//
// Library entry point, exposing the parser, query engine and supporting
// layers for integration testing and programmatic use.
//
// Terminal rendering lives in the binary (`output.rs`) and is not part of
// the library surface.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;
