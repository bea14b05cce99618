//! Tracing diagnostics emitted by the core.

use dsf_core::{DisjointSetForest, Snapshot, SnapshotRecord};
use dsf_test_support::tracing::RecordingLayer;
use rstest::rstest;
use tracing::Level;

#[rstest]
fn corrupt_snapshot_logs_a_warning_with_its_code() {
    let layer = RecordingLayer::default();
    let snapshot = Snapshot::new(vec![SnapshotRecord::linked("b", 1, "ghost")]);

    let result = layer.capture(|| DisjointSetForest::restore(snapshot));
    assert!(result.is_err());

    assert!(layer.has_event(Level::WARN, "rejected corrupt snapshot"));
    let warning = layer
        .events()
        .into_iter()
        .find(|event| event.level == Level::WARN);
    assert_eq!(
        warning.and_then(|event| event.fields.get("code").cloned()),
        Some("DSF_CORRUPT_SNAPSHOT".to_owned())
    );
}

#[rstest]
fn snapshot_load_records_a_span_with_the_record_count() {
    let layer = RecordingLayer::default();
    let snapshot = Snapshot::new(vec![
        SnapshotRecord::root("a", 2),
        SnapshotRecord::linked("b", 1, "a"),
    ]);

    let restored = layer.capture(|| DisjointSetForest::restore(snapshot));
    assert!(restored.is_ok());

    let span = layer.span("dsf.snapshot.load");
    assert_eq!(
        span.and_then(|span| span.fields.get("records").cloned()),
        Some("2".to_owned())
    );
}

#[rstest]
fn merges_and_removals_emit_debug_events() {
    let layer = RecordingLayer::default();
    layer.capture(|| {
        let mut forest = DisjointSetForest::new();
        forest.add("foo");
        forest.add("bar");
        forest.union("foo", "bar");
        forest.remove("bar");
    });

    assert!(layer.has_event(Level::DEBUG, "merged sets"));
    assert!(layer.has_event(Level::DEBUG, "removed element"));
    assert!(layer.span("dsf.remove").is_some());
}
