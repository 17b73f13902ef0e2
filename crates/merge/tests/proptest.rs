//! Property-based tests for vista-merge using proptest.

use proptest::prelude::*;
use vista_core::Record;
use vista_merge::{DeltaBatch, LoadedSet, MergeEvent, RecordUpdate};

fn rec(id: u8, cursor: i64) -> Record {
    Record::new(format!("r{}", id), cursor)
}

fn arb_records(max_len: usize) -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec((0u8..20, 0i64..1000), 0..max_len)
        .prop_map(|pairs| pairs.into_iter().map(|(id, c)| rec(id, c)).collect())
}

fn arb_event() -> impl Strategy<Value = MergeEvent> {
    prop_oneof![
        arb_records(12).prop_map(|rows| MergeEvent::Snapshot { rows }),
        arb_records(8).prop_map(|rows| MergeEvent::Page { rows }),
        (
            arb_records(5),
            arb_records(5),
            prop::collection::vec(0u8..20, 0..5)
        )
            .prop_map(|(added, updated, removed)| {
                MergeEvent::Delta(DeltaBatch {
                    added,
                    updated: updated.into_iter().map(RecordUpdate::new).collect(),
                    removed: removed.into_iter().map(|id| format!("r{}", id)).collect(),
                })
            }),
    ]
}

fn assert_invariants(set: &LoadedSet) -> Result<(), TestCaseError> {
    let records = set.records();
    // Dedup invariant: no two records share an id.
    let mut seen = std::collections::HashSet::new();
    for r in records {
        prop_assert!(seen.insert(r.id().to_string()), "duplicate id {}", r.id());
    }
    // Order invariant: ascending by cursor.
    for pair in records.windows(2) {
        prop_assert!(
            pair[0].cursor() <= pair[1].cursor(),
            "out of order: {} > {}",
            pair[0].cursor(),
            pair[1].cursor()
        );
    }
    Ok(())
}

proptest! {
    /// The set holds unique ids in ascending cursor order after any
    /// sequence of snapshot/delta/page events.
    #[test]
    fn invariants_hold_under_event_sequences(events in prop::collection::vec(arb_event(), 0..25)) {
        let mut set = LoadedSet::new();
        for event in events {
            set.apply(event);
            assert_invariants(&set)?;
        }
    }

    /// Applying the same snapshot twice in a row yields the same set,
    /// and the second application reports no changes.
    #[test]
    fn snapshot_is_idempotent(
        prefix in prop::collection::vec(arb_event(), 0..10),
        rows in arb_records(12),
    ) {
        let mut set = LoadedSet::new();
        for event in prefix {
            set.apply(event);
        }
        set.apply(MergeEvent::Snapshot { rows: rows.clone() });
        let once = set.records().to_vec();

        let outcome = set.apply(MergeEvent::Snapshot { rows });
        prop_assert_eq!(set.records(), once.as_slice());
        prop_assert!(outcome.is_empty());
    }

    /// A page event never removes loaded records, and its reported max
    /// cursor is the maximum over the fetched rows.
    #[test]
    fn page_only_grows_the_set(
        initial in arb_records(12),
        page in arb_records(8),
    ) {
        let mut set = LoadedSet::new();
        set.apply(MergeEvent::Snapshot { rows: initial });
        let before: std::collections::HashSet<String> =
            set.records().iter().map(|r| r.id().to_string()).collect();

        let expected_max = page.iter().map(|r| r.cursor().clone()).max();
        let outcome = set.apply(MergeEvent::Page { rows: page });

        prop_assert_eq!(outcome.max_page_cursor, expected_max);
        prop_assert!(outcome.removed.is_empty());
        for id in &before {
            prop_assert!(set.contains(id), "page dropped record {}", id);
        }
    }
}
