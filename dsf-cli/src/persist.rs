//! Saving and loading a whole keyspace as a JSON snapshot file.
//!
//! The file holds a list of `{key, records}` entries where `records` is the
//! forest's pointer-free [`Snapshot`]. Saves write a temporary sibling file
//! and rename it over the target so a crash never leaves a torn file.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use dsf_core::{DisjointSetForestBuilder, Snapshot, SnapshotError};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::keyspace::Keyspace;

/// One persisted key.
#[derive(Debug, Serialize, Deserialize)]
struct KeyspaceEntry {
    key: String,
    records: Snapshot,
}

/// Errors raised while reading or writing a snapshot file.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The file could not be opened, read, or written.
    #[error("failed to access `{path}`: {source}")]
    Io {
        /// File that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The file is not a valid keyspace document.
    #[error("`{path}` is not a valid snapshot file: {source}")]
    Format {
        /// File that failed to parse or serialise.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// A key appears twice in the file.
    #[error("`{path}` lists key `{key}` more than once")]
    DuplicateKey {
        /// File containing the duplicate.
        path: PathBuf,
        /// Repeated key.
        key: String,
    },
    /// One forest in the file could not be rebuilt.
    #[error("key `{key}` holds a corrupt forest: {source}")]
    Forest {
        /// Key whose snapshot was rejected.
        key: String,
        /// Reason reported by the core.
        #[source]
        source: SnapshotError,
    },
}

/// Loads the keyspace stored at `path`.
///
/// A missing file yields an empty keyspace. Any corrupt forest fails the
/// whole load. Entries without records are dropped, since an empty forest
/// has no key.
///
/// # Errors
/// Returns [`PersistError`] when the file cannot be read, is malformed, or
/// holds a forest that fails to restore.
#[instrument(name = "dsf.keyspace.load", skip_all, fields(path = %path.display()), err)]
pub fn load_keyspace(path: &Path, builder: &DisjointSetForestBuilder) -> Result<Keyspace, PersistError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Ok(Keyspace::new(builder.clone()));
        }
        Err(source) => {
            return Err(PersistError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let entries: Vec<KeyspaceEntry> =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| PersistError::Format {
            path: path.to_path_buf(),
            source,
        })?;

    let mut forests = BTreeMap::new();
    let mut seen = BTreeSet::new();
    for KeyspaceEntry { key, records } in entries {
        if seen.contains(&key) {
            return Err(PersistError::DuplicateKey {
                path: path.to_path_buf(),
                key,
            });
        }
        let forest = match builder.restore(records) {
            Ok(forest) => forest,
            Err(source) => return Err(PersistError::Forest { key, source }),
        };
        seen.insert(key.clone());
        if forest.is_empty() {
            debug!(key = key.as_str(), "skipped empty forest");
            continue;
        }
        forests.insert(key, forest);
    }

    info!(keys = forests.len(), "loaded keyspace");
    Ok(Keyspace::from_forests(builder.clone(), forests))
}

/// Writes `keyspace` to `path`, replacing any previous file atomically.
///
/// # Errors
/// Returns [`PersistError`] when the temporary file cannot be written or
/// renamed into place.
#[instrument(name = "dsf.keyspace.save", skip_all, fields(path = %path.display(), keys = keyspace.len()), err)]
pub fn save_keyspace(path: &Path, keyspace: &Keyspace) -> Result<(), PersistError> {
    let entries: Vec<KeyspaceEntry> = keyspace
        .iter()
        .map(|(key, forest)| KeyspaceEntry {
            key: key.to_owned(),
            records: forest.snapshot(),
        })
        .collect();

    let io_error = |source: io::Error| PersistError::Io {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let temp = NamedTempFile::new_in(dir).map_err(io_error)?;
    let mut writer = BufWriter::new(temp.as_file());
    serde_json::to_writer_pretty(&mut writer, &entries).map_err(|source| PersistError::Format {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(io_error)?;
    drop(writer);
    temp.persist(path).map_err(|err| io_error(err.error))?;
    Ok(())
}
