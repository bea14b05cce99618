//! Property tests replaying random operation sequences against a reference
//! partition.

use dsf_core::{
    Comembership, DisjointSetForest, ElementId, MergeOutcome, RemoveOutcome, Snapshot,
};
use dsf_test_support::{partition::ReferencePartition, profile::suite_config};
use proptest::{
    collection::vec,
    prelude::*,
    test_runner::{TestCaseError, TestCaseResult, TestRunner},
};
use test_strategy::Arbitrary;

/// Elements are drawn from a small universe so unions and removals collide.
const UNIVERSE: u8 = 24;
const DEFAULT_CASES: u32 = 128;

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    #[weight(4)]
    Add {
        #[strategy(0..UNIVERSE)]
        element: u8,
    },
    #[weight(4)]
    Union {
        #[strategy(0..UNIVERSE)]
        left: u8,
        #[strategy(0..UNIVERSE)]
        right: u8,
    },
    #[weight(1)]
    Remove {
        #[strategy(0..UNIVERSE)]
        element: u8,
    },
    #[weight(2)]
    Compare {
        #[strategy(0..UNIVERSE)]
        left: u8,
        #[strategy(0..UNIVERSE)]
        right: u8,
    },
}

fn name(element: u8) -> Vec<u8> {
    format!("e{element}").into_bytes()
}

fn ops() -> impl Strategy<Value = Vec<Op>> {
    vec(any::<Op>(), 0..96)
}

fn apply(forest: &mut DisjointSetForest, oracle: &mut ReferencePartition, op: &Op) -> TestCaseResult {
    match *op {
        Op::Add { element } => {
            let id = name(element);
            prop_assert_eq!(forest.add(&id), oracle.add(&id));
        }
        Op::Union { left, right } => {
            let (a, b) = (name(left), name(right));
            let card_before = forest.card();
            let expected = match oracle.same_set(&a, &b) {
                None => MergeOutcome::NotFound,
                Some(true) => MergeOutcome::AlreadySame,
                Some(false) => MergeOutcome::Merged,
            };
            oracle.union(&a, &b);
            let outcome = forest.union(&a, &b);
            prop_assert_eq!(outcome, expected);
            let expected_card = if outcome == MergeOutcome::Merged {
                card_before - 1
            } else {
                card_before
            };
            prop_assert_eq!(forest.card(), expected_card);
        }
        Op::Remove { element } => {
            let id = name(element);
            let expected = if oracle.remove(&id) {
                RemoveOutcome::Removed
            } else {
                RemoveOutcome::NotFound
            };
            prop_assert_eq!(forest.remove(&id), expected);
        }
        Op::Compare { left, right } => {
            let (a, b) = (name(left), name(right));
            prop_assert_eq!(forest.are_comembers(&a, &b).as_bool(), oracle.same_set(&a, &b));
        }
    }
    Ok(())
}

fn assert_equivalent(forest: &mut DisjointSetForest, oracle: &ReferencePartition) -> TestCaseResult {
    prop_assert_eq!(forest.size(), oracle.len());
    prop_assert_eq!(forest.card(), oracle.set_count());
    prop_assert!(forest.size() >= forest.card());
    prop_assert_eq!(
        forest.size() == forest.card(),
        oracle.set_count() == oracle.len()
    );

    let elements: Vec<Vec<u8>> = oracle.elements().map(<[u8]>::to_vec).collect();
    for a in &elements {
        for b in &elements {
            let expected = Comembership::from(oracle.same_set(a, b) == Some(true));
            prop_assert_eq!(forest.are_comembers(a, b), expected);
        }
        let mut members: Vec<Vec<u8>> = forest
            .find_set(a)
            .ok_or_else(|| TestCaseError::fail("present element must have a set"))?
            .into_iter()
            .map(ElementId::into_bytes)
            .collect();
        members.sort();
        prop_assert_eq!(Some(members), oracle.members_of(a));
    }
    Ok(())
}

fn replay(ops: &[Op]) -> Result<(DisjointSetForest, ReferencePartition), TestCaseError> {
    let mut forest = DisjointSetForest::builder().with_rng_seed(3).build();
    let mut oracle = ReferencePartition::default();
    for op in ops {
        apply(&mut forest, &mut oracle, op)?;
        prop_assert_eq!(forest.card(), oracle.set_count());
        prop_assert_eq!(forest.size(), oracle.len());
    }
    Ok((forest, oracle))
}

#[test]
fn operation_sequences_match_reference_partition() {
    let mut runner = TestRunner::new(suite_config(DEFAULT_CASES));
    let result = runner.run(&ops(), |ops| {
        let (mut forest, oracle) = replay(&ops)?;
        assert_equivalent(&mut forest, &oracle)
    });
    if let Err(err) = result {
        panic!("{err}");
    }
}

#[test]
fn removal_preserves_comembership_among_survivors() {
    let strategy = (ops(), 0..UNIVERSE);
    let mut runner = TestRunner::new(suite_config(DEFAULT_CASES));
    let result = runner.run(&strategy, |(ops, victim)| {
        let (mut forest, mut oracle) = replay(&ops)?;
        let survivors: Vec<Vec<u8>> = oracle
            .elements()
            .filter(|id| *id != name(victim).as_slice())
            .map(<[u8]>::to_vec)
            .collect();
        let mut before = Vec::new();
        for a in &survivors {
            for b in &survivors {
                before.push(forest.are_comembers(a, b));
            }
        }

        forest.remove(name(victim));
        oracle.remove(&name(victim));

        let mut after = Vec::new();
        for a in &survivors {
            for b in &survivors {
                after.push(forest.are_comembers(a, b));
            }
        }
        prop_assert_eq!(before, after);
        assert_equivalent(&mut forest, &oracle)
    });
    if let Err(err) = result {
        panic!("{err}");
    }
}

#[test]
fn snapshot_round_trip_preserves_partition() {
    let mut runner = TestRunner::new(suite_config(DEFAULT_CASES));
    let result = runner.run(&ops(), |ops| {
        let (forest, oracle) = replay(&ops)?;
        let encoded = serde_json::to_vec(&forest.snapshot())
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        let decoded: Snapshot = serde_json::from_slice(&encoded)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        let mut restored = DisjointSetForest::restore(decoded)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        prop_assert_eq!(restored.card(), forest.card());
        prop_assert_eq!(restored.size(), forest.size());
        assert_equivalent(&mut restored, &oracle)
    });
    if let Err(err) = result {
        panic!("{err}");
    }
}

#[test]
fn path_compression_does_not_change_answers() {
    let mut runner = TestRunner::new(suite_config(DEFAULT_CASES));
    let result = runner.run(&ops(), |ops| {
        let mut plain = DisjointSetForest::builder()
            .with_path_compression(false)
            .build();
        let mut oracle = ReferencePartition::default();
        for op in &ops {
            apply(&mut plain, &mut oracle, op)?;
        }
        assert_equivalent(&mut plain, &oracle)
    });
    if let Err(err) = result {
        panic!("{err}");
    }
}
