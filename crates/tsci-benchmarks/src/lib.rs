//! tsci benchmarking suite
//!
//! Benchmarks for the CPU-bound parts of the registry client: spec
//! extraction, category inference, search post-processing and the TTL cache.

pub mod common;

pub use common::*;
