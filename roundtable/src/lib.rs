//! # roundtable
//!
//! A concurrency simulation of the dining philosophers problem.
//!
//! N philosophers sit around a table with N forks between them; each needs
//! both neighbouring forks to eat. With naive acquisition every seat can end
//! up holding one fork and waiting forever for the other. This crate builds
//! the coordination engine that makes the dinner always terminate:
//!
//! - [`ForkSet`]: the shared forks, one blocking lock each
//! - [`Philosopher`]: an identity plus its two fork indices, with a
//!   [`Philosopher::ring`] factory for the closed seating cycle
//! - [`AcquisitionPolicy`] / [`LowerIndexFirst`]: the deadlock-avoidance
//!   rule — a total order on fork acquisition breaks the cyclic wait
//! - [`StartBarrier`]: no seat starts eating before everyone is seated
//! - [`SimulationEngine`]: spawns one task per philosopher and drives the
//!   acquire → eat → release → think rounds to completion
//! - [`CompletionLedger`]: the order in which philosophers finished
//!
//! ## Quick start
//!
//! ```ignore
//! use roundtable::{Philosopher, SimulationEngine, SimulationParameters};
//!
//! let engine = SimulationEngine::new(SimulationParameters::fast());
//! let ledger = engine.run(Philosopher::ring(5)).await?;
//! assert_eq!(ledger.len(), 5);
//! ```
//!
//! Every lifecycle step is also published as a [`TableEvent`] through
//! [`SimulationEngine::subscribe`]; the `dining` binary renders that stream
//! to the console.

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]

mod barrier;
mod engine;
mod error;
mod events;
mod forks;
mod ledger;
mod philosopher;
mod policy;
mod time;

pub use barrier::StartBarrier;
pub use engine::{SimulationEngine, SimulationParameters};
pub use error::{SimulationError, SimulationResult};
pub use events::{EventSink, TableEvent};
pub use forks::{ForkGuard, ForkSet};
pub use ledger::CompletionLedger;
pub use philosopher::{Philosopher, PhilosopherId};
pub use policy::{AcquisitionOrder, AcquisitionPolicy, LowerIndexFirst};
pub use time::{TimeProvider, TokioTimeProvider};
