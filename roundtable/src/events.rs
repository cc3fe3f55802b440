//! Real-time observability event stream.
//!
//! The engine emits a discrete event for every lifecycle step of every
//! philosopher. Rendering is left to the consumer (see `src/bin/dining.rs`);
//! the core only guarantees the events are available as they happen.
//!
//! Release events are emitted while the fork is still held, so for any
//! single fork the stream always reads acquire, release, acquire, release —
//! which makes the stream itself usable as a mutual-exclusion instrument.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::philosopher::PhilosopherId;

/// A discrete step in a philosopher's lifecycle, tagged with its identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    /// The philosopher took its seat, before the start barrier.
    Seated {
        /// Who sat down.
        philosopher: PhilosopherId,
    },
    /// The philosopher picked up a fork.
    ForkAcquired {
        /// Who picked it up.
        philosopher: PhilosopherId,
        /// Which fork.
        fork: usize,
    },
    /// The philosopher holds both forks and started eating.
    Eating {
        /// Who is eating.
        philosopher: PhilosopherId,
    },
    /// The philosopher is about to put a fork down.
    ForkReleased {
        /// Who is putting it down.
        philosopher: PhilosopherId,
        /// Which fork.
        fork: usize,
    },
    /// The philosopher released both forks and started thinking.
    Thinking {
        /// Who is thinking.
        philosopher: PhilosopherId,
    },
    /// The philosopher finished all rounds and left the table.
    Finished {
        /// Who left.
        philosopher: PhilosopherId,
    },
}

impl TableEvent {
    /// Identity the event is tagged with.
    pub fn philosopher(&self) -> &PhilosopherId {
        match self {
            TableEvent::Seated { philosopher }
            | TableEvent::ForkAcquired { philosopher, .. }
            | TableEvent::Eating { philosopher }
            | TableEvent::ForkReleased { philosopher, .. }
            | TableEvent::Thinking { philosopher }
            | TableEvent::Finished { philosopher } => philosopher,
        }
    }
}

/// Cloneable emitter handed to each philosopher task.
///
/// With no subscriber the sink is a no-op; a dropped receiver is also fine,
/// observation must never stall the table.
#[derive(Debug, Clone, Default)]
pub struct EventSink {
    tx: Option<UnboundedSender<TableEvent>>,
}

impl EventSink {
    /// A sink that discards every event.
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    /// A connected sink plus the receiving end of the stream.
    pub fn channel() -> (Self, UnboundedReceiver<TableEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx: Some(tx) }, rx)
    }

    /// Emit one event. Never blocks, never fails.
    pub fn emit(&self, event: TableEvent) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connected_sink_delivers_in_order() {
        let (sink, mut rx) = EventSink::channel();
        sink.emit(TableEvent::Seated {
            philosopher: "P0".into(),
        });
        sink.emit(TableEvent::Finished {
            philosopher: "P0".into(),
        });

        let first = rx.recv().await.expect("first event");
        assert_eq!(first.philosopher(), &PhilosopherId::from("P0"));
        assert!(matches!(first, TableEvent::Seated { .. }));
        assert!(matches!(rx.recv().await, Some(TableEvent::Finished { .. })));
    }

    #[test]
    fn disabled_sink_is_a_no_op() {
        EventSink::disabled().emit(TableEvent::Eating {
            philosopher: "P1".into(),
        });
    }
}
