//! Philosopher identity and seating arrangement.

use std::fmt;

/// Opaque identity of a philosopher.
///
/// Identities are plain labels; the engine only compares them for equality
/// and records them in the [`CompletionLedger`](crate::CompletionLedger).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhilosopherId(String);

impl PhilosopherId {
    /// View the identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhilosopherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PhilosopherId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for PhilosopherId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// A seat at the table: an identity plus the two forks the philosopher
/// must hold simultaneously to eat.
///
/// Immutable after construction. Fork fields are indices into the
/// [`ForkSet`](crate::ForkSet) created by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Philosopher {
    id: PhilosopherId,
    left_fork: usize,
    right_fork: usize,
}

impl Philosopher {
    /// Create a philosopher with explicit fork indices.
    pub fn new(id: impl Into<PhilosopherId>, left_fork: usize, right_fork: usize) -> Self {
        Self {
            id: id.into(),
            left_fork,
            right_fork,
        }
    }

    /// The philosopher's identity.
    pub fn id(&self) -> &PhilosopherId {
        &self.id
    }

    /// Index of the fork to the philosopher's left.
    pub fn left_fork(&self) -> usize {
        self.left_fork
    }

    /// Index of the fork to the philosopher's right.
    pub fn right_fork(&self) -> usize {
        self.right_fork
    }

    /// Build a closed ring of `count` philosophers named `P0`..`P{count-1}`.
    ///
    /// Philosopher `i` is seated between forks `(i + count - 1) % count`
    /// (left) and `i` (right), so each philosopher's right fork is the next
    /// philosopher's left fork and the shared-resource cycle is closed.
    ///
    /// # Panics
    ///
    /// Panics if `count < 2`; a single philosopher cannot form a ring.
    pub fn ring(count: usize) -> Vec<Philosopher> {
        assert!(count >= 2, "a dining ring needs at least two philosophers");
        (0..count)
            .map(|i| Philosopher::new(format!("P{i}"), (i + count - 1) % count, i))
            .collect()
    }
}
