//! Arena that owns every element record of one forest.
//!
//! Records live in a dense vector so uniform sampling is a single index draw.
//! A hash index maps identifiers to slots. Removal swaps the last record into
//! the vacated slot and repoints any links that named the moved record.

use std::collections::HashMap;

use rand::Rng;

use crate::element::{ElementId, ElementRecord, RecordIndex};

#[derive(Clone, Debug, Default)]
pub(crate) struct ElementStore {
    records: Vec<ElementRecord>,
    index: HashMap<ElementId, RecordIndex>,
}

impl ElementStore {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Inserts a fresh root for `id` unless one already exists.
    ///
    /// Returns whether a record was created together with its slot.
    pub(crate) fn insert_if_absent(&mut self, id: &[u8], rank: u32) -> (bool, RecordIndex) {
        if let Some(&existing) = self.index.get(id) {
            return (false, existing);
        }
        let slot = RecordIndex::new(self.records.len());
        let owned = ElementId::from(id);
        self.index.insert(owned.clone(), slot);
        self.records.push(ElementRecord::root(owned, rank));
        (true, slot)
    }

    pub(crate) fn lookup(&self, id: &[u8]) -> Option<RecordIndex> {
        self.index.get(id).copied()
    }

    pub(crate) fn record(&self, slot: RecordIndex) -> &ElementRecord {
        &self.records[slot.get()]
    }

    pub(crate) fn record_mut(&mut self, slot: RecordIndex) -> &mut ElementRecord {
        &mut self.records[slot.get()]
    }

    pub(crate) fn slots(&self) -> impl Iterator<Item = RecordIndex> + use<> {
        (0..self.records.len()).map(RecordIndex::new)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (RecordIndex, &ElementRecord)> {
        self.records
            .iter()
            .enumerate()
            .map(|(slot, record)| (RecordIndex::new(slot), record))
    }

    pub(crate) fn pick_uniform_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<RecordIndex> {
        if self.records.is_empty() {
            return None;
        }
        Some(RecordIndex::new(rng.gen_range(0..self.records.len())))
    }

    /// Excises the record in `slot` and returns it.
    ///
    /// The caller must ensure no other record still links to `slot`. Every
    /// previously obtained [`RecordIndex`] is invalidated.
    pub(crate) fn remove(&mut self, slot: RecordIndex) -> ElementRecord {
        debug_assert!(
            self.records
                .iter()
                .enumerate()
                .all(|(other, record)| other == slot.get()
                    || record.representative != Some(slot)),
            "record removed while still referenced as a representative",
        );

        let moved_from = RecordIndex::new(self.records.len() - 1);
        let removed = self.records.swap_remove(slot.get());
        self.index.remove(removed.id());

        if moved_from != slot {
            let moved_id = self.records[slot.get()].id().clone();
            self.index.insert(moved_id, slot);
            for record in &mut self.records {
                if record.representative == Some(moved_from) {
                    record.representative = Some(slot);
                }
            }
        }
        removed
    }
}
