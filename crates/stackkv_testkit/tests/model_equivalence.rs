//! Differential tests: the scope stack against the snapshot model.

use stackkv_testkit::prelude::*;

proptest! {
    #![proptest_config(PropTestConfig::default().to_proptest_config())]

    #[test]
    fn store_matches_model(ops in operation_sequence_strategy(1, 96)) {
        let mut harness = Harness::new();
        harness.run(&ops)?;
    }

    #[test]
    fn get_is_idempotent(
        ops in operation_sequence_strategy(0, 48),
        key in key_strategy(),
    ) {
        let mut harness = Harness::new();
        harness.run(&ops)?;

        let first = harness.store.get(&key).map(str::to_string);
        let second = harness.store.get(&key).map(str::to_string);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn rollback_restores_view_before_begin(
        prefix in operation_sequence_strategy(0, 32),
        body in operation_sequence_strategy(0, 32),
    ) {
        let mut harness = Harness::new();
        harness.run(&prefix)?;
        let before = harness.store.snapshot();
        let depth = harness.store.depth();

        harness.step(&Operation::Begin)?;
        for op in &body {
            // Keep the body from closing the transaction under test
            let closes = matches!(op, Operation::Commit | Operation::Rollback);
            if closes && harness.store.depth() == depth + 1 {
                continue;
            }
            harness.step(op)?;
        }
        while harness.store.depth() > depth + 1 {
            harness.step(&Operation::Commit)?;
        }
        harness.step(&Operation::Rollback)?;

        prop_assert_eq!(harness.store.snapshot(), before);
        prop_assert_eq!(harness.store.depth(), depth);
    }

    #[test]
    fn unwritten_keys_are_absent(ops in operation_sequence_strategy(0, 48)) {
        let mut harness = Harness::new();
        harness.run(&ops)?;

        // Generated keys never exceed one character
        prop_assert_eq!(harness.store.get("unwritten-key"), None);
    }
}

#[test]
fn commit_closes_exactly_one_level() {
    let mut harness = Harness::new();
    harness
        .run(&[
            Operation::Begin,
            Operation::Begin,
            Operation::Set {
                key: "k".into(),
                value: "1".into(),
            },
            Operation::Commit,
        ])
        .unwrap();

    assert_eq!(harness.store.depth(), 1);
    assert_eq!(harness.store.get("k"), Some("1"));
}
