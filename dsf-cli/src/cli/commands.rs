//! Command implementations and argument parsing for the dsf CLI.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dsf_core::{DisjointSetForestBuilder, ElementId, SnapshotErrorCode};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use crate::keyspace::{Keyspace, KeyspaceError, Reply};
use crate::persist::{PersistError, load_keyspace, save_keyspace};

const DEFAULT_SNAPSHOT: &str = "dsf.snapshot.json";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "dsf", about = "Query and update disjoint set forests stored by key.")]
pub struct Cli {
    /// Snapshot file holding every key.
    #[arg(long, env = "DSF_SNAPSHOT", default_value = DEFAULT_SNAPSHOT)]
    pub snapshot: PathBuf,

    /// Seed for random member selection.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add elements, each as a singleton set.
    Add {
        /// Key holding the forest.
        key: String,
        /// Elements to add.
        #[arg(required = true)]
        elements: Vec<String>,
    },
    /// Remove elements.
    Rem {
        /// Key holding the forest.
        key: String,
        /// Elements to remove.
        #[arg(required = true)]
        elements: Vec<String>,
    },
    /// Report whether all listed elements share one set.
    AreComembers {
        /// Key holding the forest.
        key: String,
        /// Elements to compare.
        #[arg(required = true)]
        elements: Vec<String>,
    },
    /// Merge the sets containing two elements.
    Merge {
        /// Key holding the forest.
        key: String,
        /// First element.
        a: String,
        /// Second element.
        b: String,
    },
    /// Number of sets.
    Card {
        /// Key holding the forest.
        key: String,
    },
    /// Number of elements.
    Size {
        /// Key holding the forest.
        key: String,
    },
    /// Draw random elements.
    RandMember {
        /// Key holding the forest.
        key: String,
        /// Positive for distinct elements, negative to allow repeats.
        #[arg(long, allow_negative_numbers = true)]
        count: Option<i64>,
    },
    /// List the members of the set containing an element.
    FindSet {
        /// Key holding the forest.
        key: String,
        /// Element whose set is listed.
        element: String,
    },
}

impl Command {
    const fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Rem { .. } => "rem",
            Self::AreComembers { .. } => "are-comembers",
            Self::Merge { .. } => "merge",
            Self::Card { .. } => "card",
            Self::Size { .. } => "size",
            Self::RandMember { .. } => "rand-member",
            Self::FindSet { .. } => "find-set",
        }
    }

    fn key(&self) -> &str {
        match self {
            Self::Add { key, .. }
            | Self::Rem { key, .. }
            | Self::AreComembers { key, .. }
            | Self::Merge { key, .. }
            | Self::Card { key }
            | Self::Size { key }
            | Self::RandMember { key, .. }
            | Self::FindSet { key, .. } => key,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Loading or saving the snapshot file failed.
    #[error(transparent)]
    Persist(#[from] PersistError),
    /// The command's arguments were rejected by the keyspace.
    #[error(transparent)]
    Keyspace(#[from] KeyspaceError),
}

impl CliError {
    /// Stable code of the rejected forest, when a snapshot failed to restore.
    #[must_use]
    pub fn code(&self) -> Option<SnapshotErrorCode> {
        match self {
            Self::Persist(PersistError::Forest { source, .. }) => Some(source.code()),
            Self::Persist(_) | Self::Keyspace(_) => None,
        }
    }
}

/// Executes the CLI command represented by `cli`.
///
/// The snapshot file is rewritten only when the command changed the keyspace.
///
/// # Errors
/// Returns [`CliError`] when the snapshot cannot be loaded or saved, or when
/// the keyspace rejects the command's arguments.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use dsf_cli::cli::{Cli, Command, run_cli};
/// # use dsf_cli::keyspace::Reply;
/// # use tempfile::TempDir;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = TempDir::new()?;
/// let cli = Cli {
///     snapshot: dir.path().join("dsf.json"),
///     seed: None,
///     command: Command::Add {
///         key: "animals".into(),
///         elements: vec!["foo".into(), "bar".into()],
///     },
/// };
/// assert_eq!(run_cli(cli)?, Reply::Added(2));
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty, key = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<Reply, CliError> {
    let Cli {
        snapshot,
        seed,
        command,
    } = cli;
    let span = Span::current();
    span.record("command", field::display(command.name()));
    span.record("key", field::display(command.key()));

    let mut builder = DisjointSetForestBuilder::new();
    if let Some(seed) = seed {
        builder = builder.with_rng_seed(seed);
    }
    let mut keyspace = load_keyspace(&snapshot, &builder)?;
    let reply = execute(&mut keyspace, command)?;

    if changed(&reply) {
        save_keyspace(&snapshot, &keyspace)?;
        info!(path = %snapshot.display(), "saved keyspace");
    }
    Ok(reply)
}

pub(super) fn execute(keyspace: &mut Keyspace, command: Command) -> Result<Reply, KeyspaceError> {
    let reply = match command {
        Command::Add { key, elements } => keyspace.add(&key, &ids(elements)),
        Command::Rem { key, elements } => keyspace.remove(&key, &ids(elements)),
        Command::AreComembers { key, elements } => keyspace.are_comembers(&key, &ids(elements)),
        Command::Merge { key, a, b } => keyspace.merge(&key, &a.into(), &b.into()),
        Command::Card { key } => keyspace.card(&key),
        Command::Size { key } => keyspace.size(&key),
        Command::RandMember { key, count } => keyspace.random_member(&key, count)?,
        Command::FindSet { key, element } => keyspace.find_set(&key, &element.into()),
    };
    Ok(reply)
}

pub(super) const fn changed(reply: &Reply) -> bool {
    matches!(
        reply,
        Reply::Added(1..) | Reply::Removed(1..) | Reply::Merged(true)
    )
}

fn ids(raw: Vec<String>) -> Vec<ElementId> {
    raw.into_iter().map(ElementId::from).collect()
}

/// Renders `reply` to `writer`, one value per line.
///
/// Booleans print as `1` or `0`; element lists print one element per line.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use std::io::Cursor;
/// # use dsf_cli::cli::render_reply;
/// # use dsf_cli::keyspace::Reply;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let mut buffer = Cursor::new(Vec::new());
/// render_reply(&Reply::SetMembers(vec!["foo".into(), "bar".into()]), &mut buffer)?;
/// assert_eq!(buffer.into_inner(), b"foo\nbar\n");
/// # Ok(())
/// # }
/// ```
pub fn render_reply(reply: &Reply, mut writer: impl Write) -> io::Result<()> {
    match reply {
        Reply::Added(count)
        | Reply::Removed(count)
        | Reply::Cardinality(count)
        | Reply::Size(count) => writeln!(writer, "{count}"),
        Reply::AreComembers(flag) | Reply::Merged(flag) => writeln!(writer, "{}", u8::from(*flag)),
        Reply::RandomElement(Some(id)) => writeln!(writer, "{id}"),
        Reply::RandomElement(None) => writeln!(writer, "(nil)"),
        Reply::RandomElements(ids) | Reply::SetMembers(ids) if ids.is_empty() => {
            writeln!(writer, "(empty)")
        }
        Reply::RandomElements(ids) | Reply::SetMembers(ids) => {
            for id in ids {
                writeln!(writer, "{id}")?;
            }
            Ok(())
        }
        Reply::NotFound => writeln!(writer, "(not found)"),
    }
}
