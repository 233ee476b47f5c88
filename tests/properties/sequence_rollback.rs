//! Property tests for task sequences and their compensation stack.

use std::cell::RefCell;

use proptest::prelude::*;

use ballast::domain::entities::{CommandSpec, Operation, Task, TaskSequence};
use ballast::domain::ports::TaskExecutor;
use ballast::domain::value_objects::ExecutionResult;
use ballast::BallastResult;

/// Logs every operation; fails the step named in `failing`.
struct Recorder {
    failing: Option<String>,
    log: RefCell<Vec<String>>,
}

impl TaskExecutor for Recorder {
    fn execute(&self, operation: &Operation) -> BallastResult<ExecutionResult> {
        let name = operation.describe();
        self.log.borrow_mut().push(name.clone());
        if self.failing.as_deref() == Some(name.as_str()) {
            Ok(ExecutionResult::failure(format!("{name} failed")))
        } else {
            Ok(ExecutionResult::ok(format!("{name} ok")))
        }
    }
}

fn build(with_rollback: &[bool]) -> TaskSequence {
    let mut sequence = TaskSequence::new();
    for (i, has_rollback) in with_rollback.iter().enumerate() {
        let task = Task::exec(CommandSpec::new(format!("step{i}")));
        if *has_rollback {
            sequence.add_with_rollback(task, CommandSpec::new(format!("undo{i}")));
        } else {
            sequence.add(task);
        }
    }
    sequence
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: A failure at step k runs steps 0..=k, then exactly the
    /// rollbacks of completed steps, most recent first.
    #[test]
    fn property_failure_compensates_completed_steps_in_reverse(
        (with_rollback, fail_at) in proptest::collection::vec(any::<bool>(), 1..=8)
            .prop_flat_map(|v| { let len = v.len(); (Just(v), 0..len) })
    ) {
        let sequence = build(&with_rollback);
        let executor = Recorder {
            failing: Some(format!("step{fail_at}")),
            log: RefCell::new(Vec::new()),
        };

        let result = sequence.run(&executor).unwrap();

        let mut expected: Vec<String> = (0..=fail_at).map(|i| format!("step{i}")).collect();
        expected.extend(
            (0..fail_at)
                .rev()
                .filter(|i| with_rollback[*i])
                .map(|i| format!("undo{i}")),
        );
        prop_assert!(!result.is_success());
        prop_assert_eq!(result.message(), format!("step{fail_at} failed"));
        prop_assert_eq!(executor.log.into_inner(), expected);
    }

    /// PROPERTY: A sequence without failures runs every step once and never
    /// touches a rollback.
    #[test]
    fn property_success_never_rolls_back(
        with_rollback in proptest::collection::vec(any::<bool>(), 0..=8)
    ) {
        let sequence = build(&with_rollback);
        let executor = Recorder { failing: None, log: RefCell::new(Vec::new()) };

        let result = sequence.run(&executor).unwrap();

        let expected: Vec<String> = (0..with_rollback.len()).map(|i| format!("step{i}")).collect();
        prop_assert!(result.is_success());
        prop_assert_eq!(executor.log.into_inner(), expected);
    }
}
