//! Seeded synthetic workloads.
//!
//! A workload is a list of element names plus a sequence of merges between
//! them. Replaying it produces a forest whose shape depends only on the seed.

use dsf_core::{DisjointSetForest, DisjointSetForestBuilder, ElementId};
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::error::BenchSetupError;

/// Configuration for [`Workload::generate`].
#[derive(Clone, Copy, Debug)]
pub struct WorkloadConfig {
    /// Number of distinct elements.
    pub element_count: usize,
    /// Number of random merges applied after every element is added.
    pub merge_count: usize,
    /// Seed controlling element pairing.
    pub seed: u64,
}

/// Elements and merge pairs ready to replay against a forest.
#[derive(Clone, Debug)]
pub struct Workload {
    elements: Vec<ElementId>,
    merges: Vec<(ElementId, ElementId)>,
}

impl Workload {
    /// Generates a workload from `config`.
    ///
    /// # Errors
    /// Returns [`BenchSetupError::ZeroValue`] when `element_count` is zero.
    pub fn generate(config: &WorkloadConfig) -> Result<Self, BenchSetupError> {
        if config.element_count == 0 {
            return Err(BenchSetupError::ZeroValue {
                context: "element_count",
            });
        }
        let elements: Vec<ElementId> = (0..config.element_count)
            .map(|index| ElementId::from(format!("e{index}")))
            .collect();

        let mut rng = SmallRng::seed_from_u64(config.seed);
        let mut merges = Vec::with_capacity(config.merge_count);
        for _ in 0..config.merge_count {
            let left = pick(&elements, &mut rng);
            let right = pick(&elements, &mut rng);
            if let (Some(left), Some(right)) = (left, right) {
                merges.push((left.clone(), right.clone()));
            }
        }
        Ok(Self { elements, merges })
    }

    /// Element names in insertion order.
    #[must_use]
    pub fn elements(&self) -> &[ElementId] {
        &self.elements
    }

    /// Merge pairs in replay order.
    #[must_use]
    pub fn merges(&self) -> &[(ElementId, ElementId)] {
        &self.merges
    }

    /// At most `limit` elements spread evenly across insertion order.
    ///
    /// Removal is linear in the forest size, so benchmarks remove a bounded
    /// sample rather than every element.
    #[must_use]
    pub fn removal_targets(&self, limit: usize) -> Vec<&ElementId> {
        if limit == 0 {
            return Vec::new();
        }
        let stride = self.elements.len().div_ceil(limit).max(1);
        self.elements.iter().step_by(stride).take(limit).collect()
    }

    /// Adds every element to a forest built by `builder`, then applies every
    /// merge.
    #[must_use]
    pub fn populate(&self, builder: &DisjointSetForestBuilder) -> DisjointSetForest {
        let mut forest = builder.clone().with_capacity(self.elements.len()).build();
        for id in &self.elements {
            forest.add(id);
        }
        for (left, right) in &self.merges {
            forest.union(left, right);
        }
        forest
    }
}

fn pick<'a>(elements: &'a [ElementId], rng: &mut SmallRng) -> Option<&'a ElementId> {
    elements.get(rng.gen_range(0..elements.len()))
}
