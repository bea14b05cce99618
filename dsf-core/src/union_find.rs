//! Find and link primitives operating on records inside an `ElementStore`.
//!
//! `find` walks representative links to the root and, when compression is
//! enabled, repoints every visited record directly at that root in a second
//! pass. Compression never changes membership; it only shortens later walks,
//! so it may be disabled without affecting results. Ranks of compressed
//! records go stale, which is fine because rank is only read on roots.

use crate::{
    element::{INITIAL_RANK, RecordIndex},
    store::ElementStore,
};

/// Which root survived a link and which was attached beneath it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Link {
    pub(crate) parent: RecordIndex,
    pub(crate) child: RecordIndex,
}

pub(crate) fn find_root(store: &mut ElementStore, slot: RecordIndex, compress: bool) -> RecordIndex {
    let mut root = slot;
    while let Some(next) = store.record(root).representative {
        root = next;
    }

    if compress {
        let mut node = slot;
        while let Some(next) = store.record(node).representative {
            store.record_mut(node).representative = Some(root);
            node = next;
        }
    }

    root
}

/// Attaches the lower-ranked root beneath the higher-ranked one.
///
/// On a tie `left` stays the root and its rank grows by exactly one. Both
/// arguments must be distinct roots.
pub(crate) fn link_roots(store: &mut ElementStore, left: RecordIndex, right: RecordIndex) -> Link {
    debug_assert_ne!(left, right, "cannot link a root to itself");
    debug_assert!(store.record(left).is_root() && store.record(right).is_root());

    let left_rank = store.record(left).rank;
    let right_rank = store.record(right).rank;
    let link = if left_rank < right_rank {
        Link {
            parent: right,
            child: left,
        }
    } else {
        Link {
            parent: left,
            child: right,
        }
    };

    store.record_mut(link.child).representative = Some(link.parent);
    if left_rank == right_rank {
        let parent = store.record_mut(link.parent);
        parent.rank = parent.rank.saturating_add(1);
    }
    link
}

/// Returns the rank a promoted root receives when its set is rebuilt.
///
/// `set_len` counts the members before removal, including the one being
/// removed.
pub(crate) const fn rebuilt_root_rank(set_len: usize) -> u32 {
    if set_len > 2 { INITIAL_RANK + 1 } else { INITIAL_RANK }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn chain(len: usize) -> (ElementStore, Vec<RecordIndex>) {
        let mut store = ElementStore::default();
        let slots: Vec<_> = (0..len)
            .map(|n| store.insert_if_absent(format!("e{n}").as_bytes(), INITIAL_RANK).1)
            .collect();
        for pair in slots.windows(2) {
            if let [child, parent] = pair {
                store.record_mut(*child).representative = Some(*parent);
            }
        }
        (store, slots)
    }

    #[test]
    fn find_of_a_root_is_itself() {
        let (mut store, slots) = chain(1);
        assert_eq!(find_root(&mut store, slots[0], true), slots[0]);
    }

    #[test]
    fn find_compresses_the_visited_path() {
        let (mut store, slots) = chain(5);
        let root = slots[4];
        assert_eq!(find_root(&mut store, slots[0], true), root);
        for slot in &slots[..4] {
            assert_eq!(store.record(*slot).representative, Some(root));
        }
    }

    #[test]
    fn find_without_compression_leaves_links_untouched() {
        let (mut store, slots) = chain(4);
        assert_eq!(find_root(&mut store, slots[0], false), slots[3]);
        assert_eq!(store.record(slots[0]).representative, Some(slots[1]));
        assert_eq!(store.record(slots[1]).representative, Some(slots[2]));
    }

    #[test]
    fn tie_keeps_left_and_bumps_rank() {
        let mut store = ElementStore::default();
        let left = store.insert_if_absent(b"left", INITIAL_RANK).1;
        let right = store.insert_if_absent(b"right", INITIAL_RANK).1;
        let link = link_roots(&mut store, left, right);
        assert_eq!(link, Link { parent: left, child: right });
        assert_eq!(store.record(left).rank, INITIAL_RANK + 1);
        assert_eq!(store.record(right).rank, INITIAL_RANK);
    }

    #[rstest]
    #[case::left_taller(3, 1, true)]
    #[case::right_taller(1, 3, false)]
    fn higher_rank_becomes_parent(
        #[case] left_rank: u32,
        #[case] right_rank: u32,
        #[case] left_wins: bool,
    ) {
        let mut store = ElementStore::default();
        let left = store.insert_if_absent(b"left", left_rank).1;
        let right = store.insert_if_absent(b"right", right_rank).1;
        let link = link_roots(&mut store, left, right);
        let expected_parent = if left_wins { left } else { right };
        assert_eq!(link.parent, expected_parent);
        assert_eq!(store.record(left).rank, left_rank);
        assert_eq!(store.record(right).rank, right_rank);
    }

    #[rstest]
    #[case(1, 1)]
    #[case(2, 1)]
    #[case(3, 2)]
    #[case(40, 2)]
    fn rebuilt_rank_uses_size_threshold(#[case] set_len: usize, #[case] expected: u32) {
        assert_eq!(rebuilt_root_rank(set_len), expected);
    }
}
