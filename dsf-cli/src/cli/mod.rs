//! Command-line interface orchestration for the dsf tool.
//!
//! Each invocation loads the keyspace snapshot, applies one command to a
//! single key, saves the snapshot when the command changed anything, and
//! hands the reply back for rendering.

mod commands;

pub use commands::{Cli, CliError, Command, render_reply, run_cli};
