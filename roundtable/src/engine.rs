//! Simulation engine.
//!
//! The engine owns the run: it lays the table ([`ForkSet`]), raises the
//! [`StartBarrier`], spawns one task per philosopher, and waits for every
//! task to finish before handing back the finalized [`CompletionLedger`].
//!
//! By construction there is no partial-failure path: the acquisition policy
//! rules out deadlock, acquisition cannot fail, and the sleeps always
//! elapse. The only termination mode is every philosopher finishing all of
//! its rounds.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::barrier::StartBarrier;
use crate::error::{SimulationError, SimulationResult};
use crate::events::{EventSink, TableEvent};
use crate::forks::ForkSet;
use crate::ledger::CompletionLedger;
use crate::philosopher::{Philosopher, PhilosopherId};
use crate::policy::{AcquisitionPolicy, LowerIndexFirst};
use crate::time::{TimeProvider, TokioTimeProvider};

/// Constant configuration shared read-only by all philosophers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationParameters {
    /// How many eat/think rounds each philosopher performs. Must be >= 1.
    pub rounds: u32,
    /// How long a philosopher holds both forks per round.
    pub eat_duration: Duration,
    /// How long a philosopher pauses between rounds, forks released.
    pub think_duration: Duration,
}

impl SimulationParameters {
    /// Parameters scaled down to milliseconds, for tests and quick demos.
    pub fn fast() -> Self {
        Self {
            rounds: 3,
            eat_duration: Duration::from_millis(1),
            think_duration: Duration::from_millis(3),
        }
    }
}

impl Default for SimulationParameters {
    /// The classic table: three rounds, one second eating, three thinking.
    fn default() -> Self {
        Self {
            rounds: 3,
            eat_duration: Duration::from_secs(1),
            think_duration: Duration::from_secs(3),
        }
    }
}

/// Drives a full dinner: concurrent philosophers, shared forks, one ledger.
///
/// Engines are self-contained; two engines can run concurrently in the same
/// process without interfering.
#[derive(Clone)]
pub struct SimulationEngine<T: TimeProvider = TokioTimeProvider> {
    params: SimulationParameters,
    time: T,
    policy: Arc<dyn AcquisitionPolicy>,
    events: EventSink,
}

impl SimulationEngine {
    /// Create an engine running on real Tokio time.
    pub fn new(params: SimulationParameters) -> Self {
        Self::with_time(params, TokioTimeProvider::new())
    }
}

impl<T: TimeProvider> SimulationEngine<T> {
    /// Create an engine with an explicit time provider.
    pub fn with_time(params: SimulationParameters, time: T) -> Self {
        Self {
            params,
            time,
            policy: Arc::new(LowerIndexFirst),
            events: EventSink::disabled(),
        }
    }

    /// Replace the acquisition policy.
    ///
    /// Every replacement must still impose a total order on fork
    /// acquisition, or the dinner can deadlock.
    pub fn with_policy(mut self, policy: impl AcquisitionPolicy + 'static) -> Self {
        self.policy = Arc::new(policy);
        self
    }

    /// Subscribe to the real-time event stream for the next run.
    pub fn subscribe(&mut self) -> tokio::sync::mpsc::UnboundedReceiver<TableEvent> {
        let (sink, rx) = EventSink::channel();
        self.events = sink;
        rx
    }

    /// Run the dinner to completion and return the finalized ledger.
    ///
    /// Spawns one task per philosopher and blocks until all of them have
    /// returned. The returned ledger holds exactly one entry per
    /// philosopher, in real completion order.
    pub async fn run(&self, philosophers: Vec<Philosopher>) -> SimulationResult<CompletionLedger> {
        self.validate(&philosophers)?;

        let expected: Vec<_> = philosophers.iter().map(|p| p.id().clone()).collect();
        let forks = Arc::new(ForkSet::new(philosophers.len()));
        let barrier = Arc::new(StartBarrier::new(philosophers.len()));
        let ledger = CompletionLedger::new();
        let started = self.time.now();

        tracing::info!(
            philosophers = philosophers.len(),
            rounds = self.params.rounds,
            "the table is set"
        );

        let mut handles = Vec::with_capacity(philosophers.len());
        for philosopher in philosophers {
            handles.push(tokio::spawn(dine(
                philosopher,
                self.params,
                self.time.clone(),
                Arc::clone(&self.policy),
                Arc::clone(&forks),
                Arc::clone(&barrier),
                ledger.clone(),
                self.events.clone(),
            )));
        }

        let mut first_error = None;
        for handle in handles {
            match handle.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => first_error = first_error.or(Some(e)),
                Err(join_error) => {
                    first_error = first_error
                        .or(Some(SimulationError::PhilosopherPanicked(join_error.to_string())));
                }
            }
        }
        if let Some(error) = first_error {
            return Err(error);
        }

        finalize(&ledger, &expected)?;
        tracing::info!(elapsed = ?self.time.now().saturating_sub(started), "the table is empty");
        Ok(ledger)
    }

    fn validate(&self, philosophers: &[Philosopher]) -> SimulationResult<()> {
        if philosophers.len() < 2 {
            return Err(SimulationError::InvalidState(
                "a dinner needs at least two philosophers".to_string(),
            ));
        }
        if self.params.rounds == 0 {
            return Err(SimulationError::InvalidState(
                "rounds must be at least 1".to_string(),
            ));
        }

        let table_size = philosophers.len();
        let mut ids = HashSet::with_capacity(table_size);
        for philosopher in philosophers {
            if !ids.insert(philosopher.id()) {
                return Err(SimulationError::InvalidState(format!(
                    "duplicate philosopher id: {}",
                    philosopher.id()
                )));
            }
            for fork in [philosopher.left_fork(), philosopher.right_fork()] {
                if fork >= table_size {
                    return Err(SimulationError::InvalidState(format!(
                        "{} references fork {fork}, but the table has {table_size} forks",
                        philosopher.id()
                    )));
                }
            }
        }
        Ok(())
    }
}

/// One philosopher's full lifecycle:
/// `Seated -> (Waiting -> Eating -> Thinking) x rounds -> Finished`.
#[allow(clippy::too_many_arguments)]
async fn dine<T: TimeProvider>(
    philosopher: Philosopher,
    params: SimulationParameters,
    time: T,
    policy: Arc<dyn AcquisitionPolicy>,
    forks: Arc<ForkSet>,
    barrier: Arc<StartBarrier>,
    ledger: CompletionLedger,
    events: EventSink,
) -> SimulationResult<()> {
    let id = philosopher.id().clone();

    tracing::debug!(%id, "seated at the table");
    events.emit(TableEvent::Seated {
        philosopher: id.clone(),
    });
    barrier.arrive().await;

    let order = policy.acquisition_order(philosopher.left_fork(), philosopher.right_fork());

    for round in 0..params.rounds {
        let first = forks.acquire(order.first).await?;
        events.emit(TableEvent::ForkAcquired {
            philosopher: id.clone(),
            fork: first.index(),
        });
        tracing::debug!(%id, fork = first.index(), "picked up fork");

        let second = forks.acquire(order.second).await?;
        events.emit(TableEvent::ForkAcquired {
            philosopher: id.clone(),
            fork: second.index(),
        });
        tracing::debug!(%id, fork = second.index(), "picked up fork");

        events.emit(TableEvent::Eating {
            philosopher: id.clone(),
        });
        tracing::debug!(%id, round, "eating");
        time.sleep(params.eat_duration).await;

        // Report each release before the lock drops, so the stream shows the
        // release ahead of the next holder's pickup.
        events.emit(TableEvent::ForkReleased {
            philosopher: id.clone(),
            fork: second.index(),
        });
        drop(second);
        events.emit(TableEvent::ForkReleased {
            philosopher: id.clone(),
            fork: first.index(),
        });
        drop(first);
        tracing::debug!(%id, round, "put down the forks");

        events.emit(TableEvent::Thinking {
            philosopher: id.clone(),
        });
        time.sleep(params.think_duration).await;
    }

    ledger.record(id.clone());
    events.emit(TableEvent::Finished {
        philosopher: id.clone(),
    });
    tracing::debug!(%id, "left the table");
    Ok(())
}

/// Ledger-completeness check: exactly one entry per philosopher.
///
/// A mismatch here means a bug in the engine itself, not a runtime
/// condition; it is surfaced rather than silently returned.
fn finalize(ledger: &CompletionLedger, expected: &[PhilosopherId]) -> SimulationResult<()> {
    let order = ledger.snapshot();
    if order.len() != expected.len() {
        return Err(SimulationError::InvalidState(format!(
            "ledger holds {} entries, expected {}",
            order.len(),
            expected.len()
        )));
    }
    let recorded: HashSet<_> = order.iter().collect();
    for id in expected {
        if !recorded.contains(id) {
            return Err(SimulationError::InvalidState(format!(
                "{id} missing from the completion ledger"
            )));
        }
    }
    Ok(())
}
