//! Time provider abstraction.
//!
//! The engine never calls `tokio::time::sleep` directly; it goes through
//! [`TimeProvider`] so tests can substitute timing without touching the
//! coordination logic.

use async_trait::async_trait;
use std::time::Duration;

/// Provider trait for time operations used by the simulation.
///
/// Implementations must be cheap to clone, since every philosopher task
/// carries its own handle.
#[async_trait]
pub trait TimeProvider: Clone + Send + Sync + 'static {
    /// Suspend the calling task for the given duration.
    async fn sleep(&self, duration: Duration);

    /// Elapsed time since this provider was created.
    fn now(&self) -> Duration;
}

/// Real time provider backed by Tokio's timer.
#[derive(Debug, Clone)]
pub struct TokioTimeProvider {
    start: std::time::Instant,
}

impl TokioTimeProvider {
    /// Create a new Tokio time provider anchored at the current instant.
    pub fn new() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }
}

impl Default for TokioTimeProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TimeProvider for TokioTimeProvider {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    fn now(&self) -> Duration {
        self.start.elapsed()
    }
}
