//! Named forests and the replies returned to callers.
//!
//! A [`Keyspace`] maps string keys to independent [`DisjointSetForest`]
//! instances. Keys are created by the first `add` and deleted once their last
//! element is removed. Operations on a missing key behave as though the key
//! held an empty forest.

use std::collections::BTreeMap;

use dsf_core::{
    Comembership, DisjointSetForest, DisjointSetForestBuilder, ElementId, MergeOutcome,
    RemoveOutcome, Sampling,
};
use thiserror::Error;
use tracing::debug;

/// Largest number of draws `random_member` makes when repeats are allowed.
pub const MAX_REPEATED_SAMPLES: u64 = 1 << 20;

/// Errors raised by keyspace operations that reject their arguments.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyspaceError {
    /// A negative sample count asked for more draws than the keyspace allows.
    #[error("sample count {count} is out of range; at most {limit} draws with repeats")]
    SampleCountOutOfRange {
        /// Count as supplied by the caller.
        count: i64,
        /// Largest accepted magnitude.
        limit: u64,
    },
}

/// Outcome of one keyspace operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    /// Number of elements newly added.
    Added(usize),
    /// Number of elements removed.
    Removed(usize),
    /// Whether the queried elements share a set.
    AreComembers(bool),
    /// Whether two sets were merged.
    Merged(bool),
    /// Number of distinct sets.
    Cardinality(usize),
    /// Number of elements.
    Size(usize),
    /// One randomly chosen element, if any exist.
    RandomElement(Option<ElementId>),
    /// Several randomly chosen elements.
    RandomElements(Vec<ElementId>),
    /// Members of one set.
    SetMembers(Vec<ElementId>),
    /// A referenced key or element does not exist.
    NotFound,
}

impl From<Comembership> for Reply {
    fn from(value: Comembership) -> Self {
        value
            .as_bool()
            .map_or(Self::NotFound, Self::AreComembers)
    }
}

impl From<MergeOutcome> for Reply {
    fn from(value: MergeOutcome) -> Self {
        match value {
            MergeOutcome::Merged => Self::Merged(true),
            MergeOutcome::AlreadySame => Self::Merged(false),
            MergeOutcome::NotFound => Self::NotFound,
        }
    }
}

/// Collection of named forests.
#[derive(Clone, Debug, Default)]
pub struct Keyspace {
    forests: BTreeMap<String, DisjointSetForest>,
    builder: DisjointSetForestBuilder,
}

impl Keyspace {
    /// Creates an empty keyspace whose forests are built by `builder`.
    #[must_use]
    pub fn new(builder: DisjointSetForestBuilder) -> Self {
        Self {
            forests: BTreeMap::new(),
            builder,
        }
    }

    pub(crate) fn from_forests(
        builder: DisjointSetForestBuilder,
        forests: BTreeMap<String, DisjointSetForest>,
    ) -> Self {
        Self { forests, builder }
    }

    /// Adds each of `ids` to the forest at `key`, creating it if needed.
    ///
    /// # Examples
    /// ```
    /// use dsf_cli::keyspace::{Keyspace, Reply};
    ///
    /// let mut keyspace = Keyspace::default();
    /// let ids = ["foo".into(), "bar".into(), "foo".into()];
    /// assert_eq!(keyspace.add("k", &ids), Reply::Added(2));
    /// assert_eq!(keyspace.card("k"), Reply::Cardinality(2));
    /// ```
    pub fn add(&mut self, key: &str, ids: &[ElementId]) -> Reply {
        let builder = &self.builder;
        let forest = self
            .forests
            .entry(key.to_owned())
            .or_insert_with(|| builder.build());
        let added = ids.iter().filter(|id| forest.add(id)).count();
        if forest.is_empty() {
            self.forests.remove(key);
        }
        Reply::Added(added)
    }

    /// Removes each of `ids` from the forest at `key`.
    ///
    /// The key itself is deleted once its forest is empty.
    pub fn remove(&mut self, key: &str, ids: &[ElementId]) -> Reply {
        let Some(forest) = self.forests.get_mut(key) else {
            return Reply::Removed(0);
        };
        let removed = ids
            .iter()
            .filter(|id| forest.remove(id) == RemoveOutcome::Removed)
            .count();
        if forest.is_empty() {
            self.forests.remove(key);
            debug!(key, "deleted empty forest");
        }
        Reply::Removed(removed)
    }

    /// Reports whether every listed element shares one set.
    pub fn are_comembers(&mut self, key: &str, ids: &[ElementId]) -> Reply {
        self.forests
            .get_mut(key)
            .map_or(Reply::NotFound, |forest| forest.are_all_comembers(ids).into())
    }

    /// Merges the sets containing `left` and `right`.
    pub fn merge(&mut self, key: &str, left: &ElementId, right: &ElementId) -> Reply {
        self.forests
            .get_mut(key)
            .map_or(Reply::NotFound, |forest| forest.union(left, right).into())
    }

    /// Number of sets at `key`; zero when the key is missing.
    #[must_use]
    pub fn card(&self, key: &str) -> Reply {
        Reply::Cardinality(self.forests.get(key).map_or(0, DisjointSetForest::card))
    }

    /// Number of elements at `key`; zero when the key is missing.
    #[must_use]
    pub fn size(&self, key: &str) -> Reply {
        Reply::Size(self.forests.get(key).map_or(0, DisjointSetForest::size))
    }

    /// Draws random elements from `key`.
    ///
    /// Without a count one optional element is returned. A non-negative count
    /// draws up to that many distinct elements; a negative count draws exactly
    /// its magnitude with repeats allowed.
    ///
    /// # Errors
    /// Returns [`KeyspaceError::SampleCountOutOfRange`] when a negative count
    /// exceeds [`MAX_REPEATED_SAMPLES`] in magnitude, whether or not the key
    /// exists.
    pub fn random_member(
        &mut self,
        key: &str,
        count: Option<i64>,
    ) -> Result<Reply, KeyspaceError> {
        let sampling = count.map(sampling_for).transpose()?;
        let forest = self.forests.get_mut(key);
        let reply = match (forest, sampling) {
            (None, None) => Reply::RandomElement(None),
            (None, Some(_)) => Reply::RandomElements(Vec::new()),
            (Some(forest), None) => Reply::RandomElement(forest.random_member()),
            (Some(forest), Some(sampling)) => {
                Reply::RandomElements(forest.random_members(sampling))
            }
        };
        Ok(reply)
    }

    /// Lists the members of the set containing `id`.
    pub fn find_set(&mut self, key: &str, id: &ElementId) -> Reply {
        self.forests
            .get_mut(key)
            .and_then(|forest| forest.find_set(id))
            .map_or(Reply::NotFound, Reply::SetMembers)
    }

    /// Iterates over keys and their forests in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DisjointSetForest)> {
        self.forests.iter().map(|(key, forest)| (key.as_str(), forest))
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.forests.len()
    }

    /// Returns `true` when no keys exist.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forests.is_empty()
    }
}

fn sampling_for(count: i64) -> Result<Sampling, KeyspaceError> {
    let magnitude = count.unsigned_abs();
    if count >= 0 {
        return Ok(Sampling::Distinct(
            usize::try_from(magnitude).unwrap_or(usize::MAX),
        ));
    }
    match usize::try_from(magnitude) {
        Ok(draws) if magnitude <= MAX_REPEATED_SAMPLES => Ok(Sampling::WithRepeats(draws)),
        _ => Err(KeyspaceError::SampleCountOutOfRange {
            count,
            limit: MAX_REPEATED_SAMPLES,
        }),
    }
}
