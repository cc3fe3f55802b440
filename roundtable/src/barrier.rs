//! Synchronized start gate.
//!
//! Every philosopher registers at the barrier before its first round, so no
//! seat gets a head start in the race for forks. This is a fairness
//! property for observation; deadlock freedom does not depend on it.

use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Barrier;

/// Gate that releases only once all `size` philosophers have arrived.
#[derive(Debug)]
pub struct StartBarrier {
    inner: Barrier,
    size: usize,
    arrivals: AtomicUsize,
}

impl StartBarrier {
    /// Create a barrier for `size` philosophers.
    pub fn new(size: usize) -> Self {
        Self {
            inner: Barrier::new(size),
            size,
            arrivals: AtomicUsize::new(0),
        }
    }

    /// Register arrival and suspend until all philosophers have arrived.
    ///
    /// Called exactly once per philosopher at task start.
    pub async fn arrive(&self) {
        let arrived = self.arrivals.fetch_add(1, Ordering::SeqCst) + 1;
        assert!(
            arrived <= self.size,
            "arrive() called more than once per philosopher ({arrived} arrivals, {} seats)",
            self.size
        );
        self.inner.wait().await;
    }

    /// Number of philosophers the barrier waits for.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of philosophers that have arrived so far.
    pub fn arrived(&self) -> usize {
        self.arrivals.load(Ordering::SeqCst)
    }
}
