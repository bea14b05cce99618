//! Element removal.
//!
//! Other records may route their representative links through the element
//! being removed, so the whole set is rebuilt before the record is excised:
//! one survivor is promoted to root and every other survivor is pointed at it
//! directly. Locating the set is a full scan, so removal is O(n).

use tracing::{debug, instrument};

use crate::{outcome::RemoveOutcome, union_find::rebuilt_root_rank};

use super::DisjointSetForest;

impl DisjointSetForest {
    /// Removes `id` from the forest.
    ///
    /// The remaining members of its set stay co-members of each other. The
    /// set count only drops when `id` was alone in its set.
    ///
    /// # Panics
    /// Panics if the forest's links are corrupt (see
    /// [`DisjointSetForest::find_set`]).
    ///
    /// # Examples
    /// ```
    /// use dsf_core::{DisjointSetForest, RemoveOutcome};
    ///
    /// let mut forest = DisjointSetForest::new();
    /// forest.add("foo");
    /// forest.add("bar");
    /// assert_eq!(forest.remove("foo"), RemoveOutcome::Removed);
    /// assert_eq!(forest.size(), 1);
    /// assert_eq!(forest.remove("foo"), RemoveOutcome::NotFound);
    /// ```
    #[instrument(name = "dsf.remove", level = "debug", skip_all, fields(size = self.store.len()))]
    pub fn remove(&mut self, id: impl AsRef<[u8]>) -> RemoveOutcome {
        let Some(target) = self.store.lookup(id.as_ref()) else {
            return RemoveOutcome::NotFound;
        };

        let members = self.set_slots(target);
        let mut survivors = members.iter().copied().filter(|&slot| slot != target);

        if let Some(new_root) = survivors.next() {
            let root = self.store.record_mut(new_root);
            root.representative = None;
            root.rank = rebuilt_root_rank(members.len());
            for member in survivors {
                self.store.record_mut(member).representative = Some(new_root);
            }
        } else {
            self.set_count -= 1;
        }

        let removed = self.store.remove(target);
        debug!(
            element = %removed.id(),
            set_len = members.len(),
            sets = self.set_count,
            "removed element"
        );
        RemoveOutcome::Removed
    }
}
