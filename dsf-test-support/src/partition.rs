//! Reference partition used as an oracle in property tests.
//!
//! Every element carries an explicit set label; merging relabels one whole
//! set. This is O(n) per union and exists only to be obviously correct.

use std::collections::{BTreeMap, BTreeSet};

/// Naive partition of byte-string elements.
///
/// # Examples
/// ```
/// use dsf_test_support::partition::ReferencePartition;
///
/// let mut partition = ReferencePartition::default();
/// partition.add(b"a");
/// partition.add(b"b");
/// assert!(partition.union(b"a", b"b"));
/// assert_eq!(partition.same_set(b"a", b"b"), Some(true));
/// assert_eq!(partition.set_count(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ReferencePartition {
    labels: BTreeMap<Vec<u8>, u64>,
    next_label: u64,
}

impl ReferencePartition {
    /// Adds `id` as a singleton; returns `false` if already present.
    pub fn add(&mut self, id: &[u8]) -> bool {
        if self.labels.contains_key(id) {
            return false;
        }
        self.labels.insert(id.to_vec(), self.next_label);
        self.next_label += 1;
        true
    }

    /// Merges the sets of `a` and `b`.
    ///
    /// Returns `true` when two distinct sets were merged and `false` when the
    /// elements already shared a set or either is missing.
    pub fn union(&mut self, a: &[u8], b: &[u8]) -> bool {
        let (Some(&keep), Some(&absorb)) = (self.labels.get(a), self.labels.get(b)) else {
            return false;
        };
        if keep == absorb {
            return false;
        }
        for label in self.labels.values_mut() {
            if *label == absorb {
                *label = keep;
            }
        }
        true
    }

    /// Removes `id`; returns `false` if it was not present.
    pub fn remove(&mut self, id: &[u8]) -> bool {
        self.labels.remove(id).is_some()
    }

    /// Returns `None` when either element is missing.
    #[must_use]
    pub fn same_set(&self, a: &[u8], b: &[u8]) -> Option<bool> {
        Some(self.labels.get(a)? == self.labels.get(b)?)
    }

    /// Returns every member sharing a set with `id`, sorted.
    #[must_use]
    pub fn members_of(&self, id: &[u8]) -> Option<Vec<Vec<u8>>> {
        let label = self.labels.get(id)?;
        Some(
            self.labels
                .iter()
                .filter(|(_, other)| *other == label)
                .map(|(member, _)| member.clone())
                .collect(),
        )
    }

    /// Returns whether `id` is present.
    #[must_use]
    pub fn contains(&self, id: &[u8]) -> bool {
        self.labels.contains_key(id)
    }

    /// Number of distinct sets.
    #[must_use]
    pub fn set_count(&self) -> usize {
        self.labels.values().collect::<BTreeSet<_>>().len()
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns `true` when no elements are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterates over elements in sorted order.
    pub fn elements(&self) -> impl Iterator<Item = &[u8]> {
        self.labels.keys().map(Vec::as_slice)
    }
}
