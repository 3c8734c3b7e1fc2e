//! Integration tests for the huffpress encode/decode pipeline.
//!
//! These tests drive the public API end to end: the worked scenarios on
//! small inputs, and the file pipeline over real temporary files.

mod file_pipeline;
mod scenarios;
