//! Support library for the dsf CLI binary.
//!
//! Exposes the keyspace, persistence, and command modules so doctests and
//! integration tests can drive commands without forking a subprocess.

pub mod cli;
pub mod keyspace;
pub mod logging;
pub mod persist;
