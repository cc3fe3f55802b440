//! The shared fork set.
//!
//! Each fork is an independent blocking lock. Acquisition suspends the
//! calling task until the fork is free; there is no timeout and no failure
//! path beyond process teardown. Holder counters instrument the
//! mutual-exclusion invariant: a fork observed with two holders means a bug
//! in the lock or the acquisition policy and is surfaced immediately.

use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::{Mutex, MutexGuard};

use crate::error::{SimulationError, SimulationResult};

#[derive(Debug, Default)]
struct Fork {
    lock: Mutex<()>,
    holders: AtomicUsize,
    peak_holders: AtomicUsize,
}

/// A fixed collection of mutually-exclusive forks, indexed `0..len`.
#[derive(Debug)]
pub struct ForkSet {
    forks: Vec<Fork>,
}

impl ForkSet {
    /// Lay the table with `count` forks, all free.
    pub fn new(count: usize) -> Self {
        Self {
            forks: (0..count).map(|_| Fork::default()).collect(),
        }
    }

    /// Number of forks on the table.
    pub fn len(&self) -> usize {
        self.forks.len()
    }

    /// Whether the table has no forks at all.
    pub fn is_empty(&self) -> bool {
        self.forks.is_empty()
    }

    /// Acquire the fork at `index`, suspending until it is uncontended.
    ///
    /// The returned guard releases the fork when dropped.
    pub async fn acquire(&self, index: usize) -> SimulationResult<ForkGuard<'_>> {
        let fork = self.forks.get(index).ok_or_else(|| {
            SimulationError::InvalidState(format!(
                "fork index {index} out of range (table has {} forks)",
                self.forks.len()
            ))
        })?;

        let guard = fork.lock.lock().await;
        let previous = fork.holders.fetch_add(1, Ordering::SeqCst);
        assert_eq!(previous, 0, "fork {index} acquired while already held");
        fork.peak_holders.fetch_max(previous + 1, Ordering::SeqCst);

        Ok(ForkGuard {
            _guard: guard,
            fork,
            index,
        })
    }

    /// Current number of holders of the fork at `index` (0 or 1).
    pub fn holder_count(&self, index: usize) -> usize {
        self.forks
            .get(index)
            .map(|f| f.holders.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// High-water mark of simultaneous holders observed for the fork at
    /// `index`. Anything above 1 is a mutual-exclusion violation.
    pub fn peak_holders(&self, index: usize) -> usize {
        self.forks
            .get(index)
            .map(|f| f.peak_holders.load(Ordering::SeqCst))
            .unwrap_or(0)
    }
}

/// Exclusive hold on a single fork; releasing is dropping.
#[derive(Debug)]
pub struct ForkGuard<'a> {
    _guard: MutexGuard<'a, ()>,
    fork: &'a Fork,
    index: usize,
}

impl ForkGuard<'_> {
    /// Index of the held fork.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl Drop for ForkGuard<'_> {
    fn drop(&mut self) {
        self.fork.holders.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn acquire_and_release_tracks_holders() {
        let forks = ForkSet::new(3);
        assert_eq!(forks.len(), 3);

        let guard = forks.acquire(1).await.expect("acquire");
        assert_eq!(guard.index(), 1);
        assert_eq!(forks.holder_count(1), 1);
        assert_eq!(forks.holder_count(0), 0);

        drop(guard);
        assert_eq!(forks.holder_count(1), 0);
        assert_eq!(forks.peak_holders(1), 1);
    }

    #[tokio::test]
    async fn out_of_range_index_is_rejected() {
        let forks = ForkSet::new(2);
        let err = forks.acquire(2).await.expect_err("index out of range");
        assert!(matches!(err, SimulationError::InvalidState(_)));
    }

    #[tokio::test]
    async fn contended_fork_never_has_two_holders() {
        let forks = Arc::new(ForkSet::new(1));
        let mut handles = Vec::new();
        for _ in 0..4 {
            let forks = Arc::clone(&forks);
            handles.push(tokio::spawn(async move {
                for _ in 0..25 {
                    let guard = forks.acquire(0).await.expect("acquire");
                    tokio::time::sleep(Duration::from_micros(50)).await;
                    drop(guard);
                }
            }));
        }
        for handle in handles {
            handle.await.expect("task");
        }
        assert_eq!(forks.peak_holders(0), 1);
        assert_eq!(forks.holder_count(0), 0);
    }
}
