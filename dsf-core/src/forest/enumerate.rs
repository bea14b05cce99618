//! Set enumeration by full scan.
//!
//! These are diagnostic operations: each one calls `find` on every element,
//! so they cost O(n) finds regardless of the size of the set involved.

use std::collections::HashMap;

use crate::element::{ElementId, RecordIndex};

use super::DisjointSetForest;

impl DisjointSetForest {
    /// Returns every member of the set containing `id`, including `id`.
    ///
    /// Returns `None` when `id` is not an element. Member order follows
    /// storage order and is not stable across mutations.
    ///
    /// # Panics
    /// Panics if the scan fails to find `id` in its own set, which would mean
    /// the forest's links are corrupt.
    ///
    /// # Examples
    /// ```
    /// use dsf_core::{DisjointSetForest, ElementId};
    ///
    /// let mut forest = DisjointSetForest::new();
    /// for id in ["foo", "bar", "pooh"] {
    ///     forest.add(id);
    /// }
    /// forest.union("foo", "bar");
    /// let mut members = forest.find_set("bar").unwrap_or_default();
    /// members.sort();
    /// assert_eq!(members, vec![ElementId::from("bar"), ElementId::from("foo")]);
    /// assert!(forest.find_set("nobody").is_none());
    /// ```
    pub fn find_set(&mut self, id: impl AsRef<[u8]>) -> Option<Vec<ElementId>> {
        let slot = self.store.lookup(id.as_ref())?;
        let members = self.set_slots(slot);
        Some(
            members
                .into_iter()
                .map(|member| self.store.record(member).id().clone())
                .collect(),
        )
    }

    /// Groups every element by set.
    ///
    /// Returns one vector per set; neither the sets nor their members are in
    /// any particular order.
    pub fn partition(&mut self) -> Vec<Vec<ElementId>> {
        let mut groups: HashMap<RecordIndex, Vec<ElementId>> = HashMap::with_capacity(self.set_count);
        for slot in self.store.slots() {
            let root = self.find(slot);
            groups
                .entry(root)
                .or_default()
                .push(self.store.record(slot).id().clone());
        }
        groups.into_values().collect()
    }

    /// Collects the slots of every record sharing a root with `slot`.
    pub(super) fn set_slots(&mut self, slot: RecordIndex) -> Vec<RecordIndex> {
        let root = self.find(slot);
        let mut members = Vec::new();
        for candidate in self.store.slots() {
            if self.find(candidate) == root {
                members.push(candidate);
            }
        }
        assert!(
            members.contains(&slot),
            "set enumeration lost element `{}`",
            self.store.record(slot).id()
        );
        members
    }
}
