//! Pointer-free snapshots and the two-pass reconstruction protocol.
//!
//! A snapshot lists every element as `{id, rank, rep_id}`, naming the
//! representative by identifier rather than by slot. Loading stages each
//! record with its stale identifiers, then:
//!
//! 1. inserts every record as an unlinked root, building the identifier index
//!    (duplicates are rejected here);
//! 2. resolves each staged `rep_id` through that index and installs the link,
//!    rejecting dangling identifiers.
//!
//! A final walk rejects representative cycles. The store is only handed back
//! once every step succeeds, so a failed load never yields a usable forest.

use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::{
    DisjointSetForest, DisjointSetForestBuilder, ElementId, Result, SnapshotError,
    element::RecordIndex, store::ElementStore,
};

/// One element as persisted in a [`Snapshot`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    /// Identifier of the element.
    pub id: ElementId,
    /// Rank at save time; always positive.
    pub rank: u32,
    /// Identifier of the element's representative, or `None` for a root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rep_id: Option<ElementId>,
}

impl SnapshotRecord {
    /// Describes a root element.
    #[must_use]
    pub fn root(id: impl Into<ElementId>, rank: u32) -> Self {
        Self {
            id: id.into(),
            rank,
            rep_id: None,
        }
    }

    /// Describes an element linked beneath `rep_id`.
    #[must_use]
    pub fn linked(id: impl Into<ElementId>, rank: u32, rep_id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            rank,
            rep_id: Some(rep_id.into()),
        }
    }
}

/// Ordered, pointer-free description of a forest.
///
/// Serialises as a plain sequence of [`SnapshotRecord`]s.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    records: Vec<SnapshotRecord>,
}

impl Snapshot {
    /// Wraps an ordered list of records.
    #[must_use]
    pub const fn new(records: Vec<SnapshotRecord>) -> Self {
        Self { records }
    }

    /// Borrows the records in order.
    #[must_use]
    pub fn records(&self) -> &[SnapshotRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when the snapshot describes an empty forest.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consumes the snapshot, returning its records.
    #[must_use]
    pub fn into_records(self) -> Vec<SnapshotRecord> {
        self.records
    }
}

impl FromIterator<SnapshotRecord> for Snapshot {
    fn from_iter<I: IntoIterator<Item = SnapshotRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl DisjointSetForest {
    /// Captures the forest as a [`Snapshot`].
    ///
    /// Records appear in storage order. Links are written as they currently
    /// stand; no compression is applied first.
    ///
    /// # Examples
    /// ```
    /// use dsf_core::{Comembership, DisjointSetForest};
    ///
    /// let mut forest = DisjointSetForest::new();
    /// forest.add("foo");
    /// forest.add("bar");
    /// forest.union("foo", "bar");
    ///
    /// let mut restored = DisjointSetForest::restore(forest.snapshot())?;
    /// assert_eq!(restored.are_comembers("foo", "bar"), Comembership::Yes);
    /// assert_eq!(restored.card(), 1);
    /// # Ok::<(), dsf_core::SnapshotError>(())
    /// ```
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let store = self.store();
        store
            .iter()
            .map(|(_, record)| SnapshotRecord {
                id: record.id().clone(),
                rank: record.rank,
                rep_id: record
                    .representative
                    .map(|rep| store.record(rep).id().clone()),
            })
            .collect()
    }

    /// Rebuilds a forest from `snapshot` with the default configuration.
    ///
    /// # Errors
    /// Returns [`SnapshotError`] when the snapshot names a missing
    /// representative, repeats an identifier, carries a zero rank, or links
    /// elements in a cycle.
    pub fn restore(snapshot: Snapshot) -> Result<Self> {
        DisjointSetForestBuilder::new().restore(snapshot)
    }
}

/// Identifiers carried from the snapshot until links are resolved.
struct Staged {
    stale_self_id: ElementId,
    stale_rep_id: Option<ElementId>,
}

/// Rebuilds the store and counts its roots.
#[instrument(name = "dsf.snapshot.load", skip_all, fields(records = snapshot.len()), err)]
pub(crate) fn rebuild(snapshot: Snapshot, capacity: usize) -> Result<(ElementStore, usize)> {
    let records = snapshot.into_records();
    let mut store = ElementStore::with_capacity(capacity.max(records.len()));
    let mut staged = Vec::with_capacity(records.len());

    // Pass 1: every record becomes an unlinked root; the store's identifier
    // index is populated as a side effect.
    for SnapshotRecord { id, rank, rep_id } in records {
        if rank == 0 {
            return Err(reject(SnapshotError::ZeroRank { id }));
        }
        let (created, _) = store.insert_if_absent(id.as_bytes(), rank);
        if !created {
            return Err(reject(SnapshotError::DuplicateElement { id }));
        }
        staged.push(Staged {
            stale_self_id: id,
            stale_rep_id: rep_id,
        });
    }

    // Pass 2: resolve staged representative identifiers through the index.
    // Slots were assigned in staging order, so position `n` is record `n`.
    for (slot, entry) in staged.into_iter().enumerate() {
        let Staged {
            stale_self_id,
            stale_rep_id,
        } = entry;
        let Some(rep_id) = stale_rep_id else {
            continue;
        };
        let Some(rep) = store.lookup(rep_id.as_bytes()) else {
            return Err(reject(SnapshotError::CorruptSnapshot {
                element: stale_self_id,
                missing: rep_id,
            }));
        };
        store.record_mut(RecordIndex::new(slot)).representative = Some(rep);
    }

    if let Some(slot) = find_cycle(&store) {
        let id = store.record(slot).id().clone();
        return Err(reject(SnapshotError::RepresentativeCycle { id }));
    }

    let set_count = store.iter().filter(|(_, record)| record.is_root()).count();
    Ok((store, set_count))
}

fn reject(error: SnapshotError) -> SnapshotError {
    warn!(code = %error.code(), error = %error, "rejected corrupt snapshot");
    error
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unseen,
    OnPath,
    Terminates,
}

/// Returns a slot lying on a representative cycle, if any.
///
/// Each record is walked at most once, so the check is O(n).
fn find_cycle(store: &ElementStore) -> Option<RecordIndex> {
    let mut state = vec![Visit::Unseen; store.len()];
    let mut path = Vec::new();

    for start in store.slots() {
        let mut current = Some(start);
        while let Some(slot) = current {
            match state[slot.get()] {
                Visit::Terminates => break,
                Visit::OnPath => return Some(slot),
                Visit::Unseen => {
                    state[slot.get()] = Visit::OnPath;
                    path.push(slot);
                    current = store.record(slot).representative;
                }
            }
        }
        for slot in path.drain(..) {
            state[slot.get()] = Visit::Terminates;
        }
    }
    None
}
