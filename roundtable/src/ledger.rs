//! Completion-order ledger.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::philosopher::PhilosopherId;

/// Thread-safe, append-only record of the order philosophers finished.
///
/// Cloning yields another handle to the same ledger, so every task can be
/// given one at spawn time. Reading is only meaningful once
/// [`SimulationEngine::run`](crate::SimulationEngine::run) has returned.
#[derive(Debug, Clone, Default)]
pub struct CompletionLedger {
    inner: Arc<Mutex<Vec<PhilosopherId>>>,
}

impl CompletionLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finished philosopher. Appends are serialized; their order
    /// is the real completion order across tasks.
    pub fn record(&self, id: PhilosopherId) {
        self.lock().push(id);
    }

    /// Copy of the recorded sequence.
    pub fn snapshot(&self) -> Vec<PhilosopherId> {
        self.lock().clone()
    }

    /// Number of entries recorded so far.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // The guarded data is a plain Vec, valid even if a writer panicked.
    fn lock(&self) -> MutexGuard<'_, Vec<PhilosopherId>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
