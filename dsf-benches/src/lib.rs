//! Benchmark support crate for dsf.
//!
//! Provides seeded synthetic workloads and parameter types used by the
//! Criterion benchmarks for merging, lookups, removal, and snapshot reloads.

pub mod error;
pub mod params;
pub mod workload;
