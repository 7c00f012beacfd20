use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;

use super::*;
use crate::checks::CheckRegistry;
use crate::checks::test_fixtures::{Behavior, StubCheck};
use crate::engine::{FilePipeline, NullRenderer, RealFileStore, RunOptions};

fn paths(n: usize) -> Vec<PathBuf> {
    (0..n).map(|i| PathBuf::from(format!("f{i}.csv"))).collect()
}

fn ok_outcome(job: &FileJob) -> FileOutcome {
    let mut outcome = FileOutcome::operation_error(job.index, job.path.clone(), String::new());
    outcome.had_op_err = false;
    outcome.error = None;
    outcome.passed = 1;
    outcome
}

#[test]
fn empty_batch_returns_nothing() {
    let result = FileScheduler::new(4).run(&[], ok_outcome);
    assert!(result.outcomes.is_empty());
    assert!(!result.had_op_err);
    assert!(!result.had_val_fail);
}

#[test]
fn worker_count_is_bounded() {
    let scheduler = FileScheduler::new(4);
    assert_eq!(scheduler.worker_count(2), 2);
    assert_eq!(scheduler.worker_count(10), 4);
    assert_eq!(scheduler.worker_count(0), 1);
    assert_eq!(FileScheduler::new(0).worker_count(5), 1);
}

#[test]
fn outcomes_keep_input_order_despite_delay() {
    let input = paths(5);
    let finished = Mutex::new(Vec::new());

    let result = FileScheduler::new(2).run(&input, |job| {
        if job.index == 0 {
            std::thread::sleep(Duration::from_millis(150));
        }
        finished.lock().unwrap().push(job.index);
        ok_outcome(job)
    });

    let order: Vec<_> = result.outcomes.iter().map(|o| o.path.clone()).collect();
    assert_eq!(order, input);
    let indices: Vec<_> = result.outcomes.iter().map(|o| o.index).collect();
    assert_eq!(indices, [0, 1, 2, 3, 4]);
    // the slow first file finished after at least one later file
    assert_ne!(finished.lock().unwrap()[0], 0);
}

#[test]
fn every_file_processed_exactly_once() {
    let input = paths(40);
    let seen = Mutex::new(HashSet::new());
    let calls = AtomicUsize::new(0);

    let result = FileScheduler::new(8).run(&input, |job| {
        calls.fetch_add(1, Ordering::SeqCst);
        assert!(seen.lock().unwrap().insert(job.index));
        ok_outcome(job)
    });

    assert_eq!(calls.load(Ordering::SeqCst), 40);
    assert_eq!(result.outcomes.len(), 40);
    assert_eq!(result.cancelled(), 0);
}

#[test]
fn flags_are_or_aggregated() {
    let input = paths(3);
    let result = FileScheduler::new(3).run(&input, |job| {
        let mut outcome = ok_outcome(job);
        outcome.had_val_fail = job.index == 1;
        outcome
    });
    assert!(result.had_val_fail);
    assert!(!result.had_op_err);
}

#[test]
fn unreadable_file_does_not_block_others() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.csv");
    std::fs::write(&good, "term;\nx;\n").unwrap();
    let missing = dir.path().join("missing.csv");
    let also_good = dir.path().join("also.csv");
    std::fs::write(&also_good, "term;\ny;\n").unwrap();

    let mut registry = CheckRegistry::new();
    registry.register(StubCheck::new("has-term", 1, false, Behavior::PassIfContains("term")));
    let snapshot = registry.snapshot();
    let pipeline = FilePipeline::new(
        &snapshot,
        &[],
        RunOptions::default(),
        &RealFileStore,
        &NullRenderer,
    );

    let input = vec![good, missing, also_good];
    let result = FileScheduler::new(2).run(&input, |job| pipeline.process(job));

    assert!(result.had_op_err);
    assert!(!result.had_val_fail);
    let failed = &result.outcomes[1];
    assert!(failed.had_op_err);
    assert!(failed.summary.is_none());
    assert_eq!(failed.passed + failed.warned + failed.failed, 0);
    assert_eq!(failed.errored, 1);
    assert!(result.outcomes[0].is_ok());
    assert!(result.outcomes[2].is_ok());
}

#[test]
fn cancelled_before_start_dispatches_nothing() {
    let token = CancelToken::new();
    token.cancel();
    let calls = AtomicUsize::new(0);

    let result = FileScheduler::new(2)
        .with_cancel(token)
        .run(&paths(3), |job| {
            calls.fetch_add(1, Ordering::SeqCst);
            ok_outcome(job)
        });

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(result.cancelled(), 3);
    assert!(result.had_op_err);
    assert!(result.outcomes.iter().all(|o| o.summary.is_none()));
}

#[test]
fn cancel_mid_batch_finishes_in_flight_work() {
    let token = CancelToken::new();
    let scheduler = FileScheduler::new(1).with_cancel(token.clone());
    let calls = AtomicUsize::new(0);

    let result = scheduler.run(&paths(20), |job| {
        calls.fetch_add(1, Ordering::SeqCst);
        if job.index == 0 {
            token.cancel();
            std::thread::sleep(Duration::from_millis(100));
        }
        ok_outcome(job)
    });

    // the only worker is busy, so no job can be handed over after cancel
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(result.cancelled(), 19);
    assert!(!result.outcomes[0].cancelled);
    assert!(result.outcomes[19].cancelled);
}
