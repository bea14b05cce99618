//! Shared test utilities used across the disjoint set forest crates.
//!
//! - [`partition`]: a deliberately naive reference partition that property
//!   tests mirror every forest operation against.
//! - [`tracing`]: a recording layer for asserting spans and events.
//! - [`profile`]: environment-driven proptest configuration.

pub mod partition;
pub mod profile;
pub mod tracing;
