//! Disjoint set forest core library.
//!
//! A [`DisjointSetForest`] partitions byte-string elements into disjoint sets
//! with union by rank and path compression. Links between elements are arena
//! indices owned by a per-forest store, so a forest is saved as a
//! pointer-free [`Snapshot`] and rebuilt with [`DisjointSetForest::restore`].

mod builder;
mod element;
mod error;
mod forest;
mod outcome;
mod snapshot;
mod store;
mod union_find;

pub use crate::{
    builder::DisjointSetForestBuilder,
    element::ElementId,
    error::{Result, SnapshotError, SnapshotErrorCode},
    forest::DisjointSetForest,
    outcome::{Comembership, MergeOutcome, RemoveOutcome, Sampling},
    snapshot::{Snapshot, SnapshotRecord},
};
