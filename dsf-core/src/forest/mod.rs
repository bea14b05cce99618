//! The disjoint set forest and its union-find operations.
//!
//! A forest owns one [`ElementStore`] and caches the number of distinct sets
//! so cardinality reads are O(1). Every mutation updates that count in the
//! same call that changes the structure.

mod enumerate;
mod remove;

use rand::{Rng, rngs::SmallRng, seq::index};
use tracing::debug;

use crate::{
    DisjointSetForestBuilder,
    element::{ElementId, INITIAL_RANK, RecordIndex},
    outcome::{Comembership, MergeOutcome, Sampling},
    store::ElementStore,
    union_find::{find_root, link_roots},
};

/// A collection of elements partitioned into disjoint sets.
///
/// All operations take `&mut self` or `&self`; callers sharing one forest
/// across threads must serialise access themselves. Distinct forests are
/// independent.
///
/// # Examples
/// ```
/// use dsf_core::{Comembership, DisjointSetForest, MergeOutcome};
///
/// let mut forest = DisjointSetForest::new();
/// forest.add("foo");
/// forest.add("bar");
/// assert_eq!(forest.union("foo", "bar"), MergeOutcome::Merged);
/// assert_eq!(forest.are_comembers("foo", "bar"), Comembership::Yes);
/// assert_eq!(forest.card(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct DisjointSetForest {
    store: ElementStore,
    set_count: usize,
    path_compression: bool,
    rng: SmallRng,
}

impl Default for DisjointSetForest {
    fn default() -> Self {
        Self::new()
    }
}

impl DisjointSetForest {
    /// Creates an empty forest with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        DisjointSetForestBuilder::new().build()
    }

    /// Returns a builder for configuring a forest.
    #[must_use]
    pub fn builder() -> DisjointSetForestBuilder {
        DisjointSetForestBuilder::new()
    }

    pub(crate) const fn from_parts(
        store: ElementStore,
        set_count: usize,
        path_compression: bool,
        rng: SmallRng,
    ) -> Self {
        Self {
            store,
            set_count,
            path_compression,
            rng,
        }
    }

    /// Adds `id` as a singleton set.
    ///
    /// Returns `false` without changing anything when `id` is already present.
    ///
    /// # Examples
    /// ```
    /// use dsf_core::DisjointSetForest;
    ///
    /// let mut forest = DisjointSetForest::new();
    /// assert!(forest.add("foo"));
    /// assert!(!forest.add("foo"));
    /// assert_eq!(forest.card(), 1);
    /// ```
    pub fn add(&mut self, id: impl AsRef<[u8]>) -> bool {
        let (created, _) = self.store.insert_if_absent(id.as_ref(), INITIAL_RANK);
        if created {
            self.set_count += 1;
        }
        created
    }

    /// Reports whether `a` and `b` belong to the same set.
    ///
    /// Takes `&mut self` because lookups compress paths.
    pub fn are_comembers(&mut self, a: impl AsRef<[u8]>, b: impl AsRef<[u8]>) -> Comembership {
        let (Some(left), Some(right)) = (self.store.lookup(a.as_ref()), self.store.lookup(b.as_ref()))
        else {
            return Comembership::NotFound;
        };
        Comembership::from(self.find(left) == self.find(right))
    }

    /// Reports whether every listed element belongs to one common set.
    ///
    /// An empty list is trivially co-membered. Any missing element yields
    /// [`Comembership::NotFound`]; all lookups happen before any find.
    ///
    /// # Examples
    /// ```
    /// use dsf_core::{Comembership, DisjointSetForest};
    ///
    /// let mut forest = DisjointSetForest::new();
    /// for id in ["a", "b", "c"] {
    ///     forest.add(id);
    /// }
    /// forest.union("a", "b");
    /// assert_eq!(forest.are_all_comembers(["a", "b"]), Comembership::Yes);
    /// assert_eq!(forest.are_all_comembers(["a", "b", "c"]), Comembership::No);
    /// assert_eq!(forest.are_all_comembers(["a", "z"]), Comembership::NotFound);
    /// ```
    pub fn are_all_comembers<I>(&mut self, ids: I) -> Comembership
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        let slots: Option<Vec<RecordIndex>> = ids
            .into_iter()
            .map(|id| self.store.lookup(id.as_ref()))
            .collect();
        let Some(slots) = slots else {
            return Comembership::NotFound;
        };
        let Some((&first, rest)) = slots.split_first() else {
            return Comembership::Yes;
        };
        let root = self.find(first);
        Comembership::from(rest.iter().all(|&slot| self.find(slot) == root))
    }

    /// Merges the sets containing `a` and `b`.
    ///
    /// Both elements are looked up before anything is modified, so a
    /// [`MergeOutcome::NotFound`] result leaves the forest untouched.
    pub fn union(&mut self, a: impl AsRef<[u8]>, b: impl AsRef<[u8]>) -> MergeOutcome {
        let (Some(left), Some(right)) = (self.store.lookup(a.as_ref()), self.store.lookup(b.as_ref()))
        else {
            return MergeOutcome::NotFound;
        };
        let left_root = self.find(left);
        let right_root = self.find(right);
        if left_root == right_root {
            return MergeOutcome::AlreadySame;
        }

        let link = link_roots(&mut self.store, left_root, right_root);
        self.set_count -= 1;
        debug!(
            root = %self.store.record(link.parent).id(),
            absorbed = %self.store.record(link.child).id(),
            sets = self.set_count,
            "merged sets"
        );
        MergeOutcome::Merged
    }

    /// Number of distinct sets.
    #[must_use]
    pub const fn card(&self) -> usize {
        self.set_count
    }

    /// Number of elements across all sets.
    #[must_use]
    pub fn size(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` when the forest holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns `true` when `id` is an element of the forest.
    #[must_use]
    pub fn contains(&self, id: impl AsRef<[u8]>) -> bool {
        self.store.lookup(id.as_ref()).is_some()
    }

    /// Returns whether finds compress paths in this forest.
    #[must_use]
    pub const fn path_compression(&self) -> bool {
        self.path_compression
    }

    /// Iterates over every element identifier in storage order.
    pub fn iter(&self) -> impl Iterator<Item = &ElementId> {
        self.store.iter().map(|(_, record)| record.id())
    }

    /// Picks one element uniformly at random.
    pub fn random_member(&mut self) -> Option<ElementId> {
        let slot = self.store.pick_uniform_random(&mut self.rng)?;
        Some(self.store.record(slot).id().clone())
    }

    /// Draws several elements according to `sampling`.
    ///
    /// [`Sampling::WithRepeats`] allocates the full result up front, so hosts
    /// accepting counts from users must bound them first.
    ///
    /// # Examples
    /// ```
    /// use dsf_core::{DisjointSetForest, Sampling};
    ///
    /// let mut forest = DisjointSetForest::builder().with_rng_seed(1).build();
    /// forest.add("a");
    /// forest.add("b");
    /// assert_eq!(forest.random_members(Sampling::Distinct(5)).len(), 2);
    /// assert_eq!(forest.random_members(Sampling::WithRepeats(5)).len(), 5);
    /// ```
    pub fn random_members(&mut self, sampling: Sampling) -> Vec<ElementId> {
        let len = self.store.len();
        match sampling {
            Sampling::Distinct(count) => index::sample(&mut self.rng, len, count.min(len))
                .into_iter()
                .map(|slot| self.store.record(RecordIndex::new(slot)).id().clone())
                .collect(),
            Sampling::WithRepeats(_) if len == 0 => Vec::new(),
            Sampling::WithRepeats(count) => (0..count)
                .map(|_| {
                    let slot = RecordIndex::new(self.rng.gen_range(0..len));
                    self.store.record(slot).id().clone()
                })
                .collect(),
        }
    }

    pub(crate) fn find(&mut self, slot: RecordIndex) -> RecordIndex {
        find_root(&mut self.store, slot, self.path_compression)
    }

    pub(crate) const fn store(&self) -> &ElementStore {
        &self.store
    }
}
