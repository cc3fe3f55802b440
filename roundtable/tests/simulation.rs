//! End-to-end dinner runs: termination, ledger completeness, validation.

use std::collections::HashSet;
use std::time::Duration;

use roundtable::{
    CompletionLedger, Philosopher, SimulationEngine, SimulationError, SimulationParameters,
};

/// Every run in this file must terminate; a hang is a deadlock bug.
const DINNER_DEADLINE: Duration = Duration::from_secs(30);

async fn run_dinner(
    params: SimulationParameters,
    philosophers: Vec<Philosopher>,
) -> CompletionLedger {
    let engine = SimulationEngine::new(params);
    tokio::time::timeout(DINNER_DEADLINE, engine.run(philosophers))
        .await
        .expect("dinner deadlocked")
        .expect("dinner failed")
}

fn assert_permutation(ledger: &CompletionLedger, philosophers: &[Philosopher]) {
    let order = ledger.snapshot();
    assert_eq!(order.len(), philosophers.len());

    let expected: HashSet<_> = philosophers.iter().map(|p| p.id().clone()).collect();
    let recorded: HashSet<_> = order.iter().cloned().collect();
    assert_eq!(recorded, expected);
    assert_eq!(order.len(), recorded.len(), "a philosopher finished twice");
}

#[tokio::test]
async fn five_philosophers_finish_dinner() {
    let philosophers = Philosopher::ring(5);
    let ledger = run_dinner(SimulationParameters::fast(), philosophers.clone()).await;
    assert_permutation(&ledger, &philosophers);
}

#[tokio::test]
async fn two_philosophers_share_both_forks() {
    // The minimum non-trivial cycle: both seats contend for the same two forks.
    let philosophers = Philosopher::ring(2);
    let ledger = run_dinner(SimulationParameters::fast(), philosophers.clone()).await;
    assert_permutation(&ledger, &philosophers);
}

#[tokio::test]
async fn seven_philosophers_two_rounds() {
    let params = SimulationParameters {
        rounds: 2,
        eat_duration: Duration::from_millis(1),
        think_duration: Duration::from_millis(1),
    };
    let philosophers = Philosopher::ring(7);
    let ledger = run_dinner(params, philosophers.clone()).await;
    assert_permutation(&ledger, &philosophers);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn dinner_terminates_under_real_parallelism() {
    let philosophers = Philosopher::ring(5);
    let ledger = run_dinner(SimulationParameters::fast(), philosophers.clone()).await;
    assert_permutation(&ledger, &philosophers);
}

#[tokio::test]
async fn concurrent_engines_do_not_interfere() {
    let first = SimulationEngine::new(SimulationParameters::fast());
    let second = SimulationEngine::new(SimulationParameters::fast());

    let (a, b) = tokio::time::timeout(
        DINNER_DEADLINE,
        async { tokio::join!(first.run(Philosopher::ring(3)), second.run(Philosopher::ring(4))) },
    )
    .await
    .expect("dinners deadlocked");

    assert_eq!(a.expect("first dinner").len(), 3);
    assert_eq!(b.expect("second dinner").len(), 4);
}

#[tokio::test]
async fn zero_rounds_is_rejected() {
    let params = SimulationParameters {
        rounds: 0,
        ..SimulationParameters::fast()
    };
    let engine = SimulationEngine::new(params);
    let err = engine
        .run(Philosopher::ring(3))
        .await
        .expect_err("rounds = 0 must be rejected");
    assert!(matches!(err, SimulationError::InvalidState(_)));
}

#[tokio::test]
async fn duplicate_ids_are_rejected() {
    let engine = SimulationEngine::new(SimulationParameters::fast());
    let seats = vec![
        Philosopher::new("P0", 1, 0),
        Philosopher::new("P0", 0, 1),
    ];
    let err = engine.run(seats).await.expect_err("duplicate id");
    assert!(matches!(err, SimulationError::InvalidState(_)));
}

#[tokio::test]
async fn out_of_range_fork_is_rejected() {
    let engine = SimulationEngine::new(SimulationParameters::fast());
    let seats = vec![Philosopher::new("P0", 1, 0), Philosopher::new("P1", 0, 7)];
    let err = engine.run(seats).await.expect_err("fork index out of range");
    assert!(matches!(err, SimulationError::InvalidState(_)));
}

#[tokio::test]
async fn lonely_philosopher_is_rejected() {
    let engine = SimulationEngine::new(SimulationParameters::fast());
    let err = engine
        .run(vec![Philosopher::new("P0", 0, 0)])
        .await
        .expect_err("a single seat is not a ring");
    assert!(matches!(err, SimulationError::InvalidState(_)));
}
