//! Error types for the simulation engine.

use thiserror::Error;

/// Errors that can occur when configuring or running a simulation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// The simulation was configured with invalid inputs.
    #[error("invalid simulation state: {0}")]
    InvalidState(String),

    /// A philosopher task panicked instead of running to completion.
    #[error("philosopher task panicked: {0}")]
    PhilosopherPanicked(String),
}

/// A type alias for `Result<T, SimulationError>`.
pub type SimulationResult<T> = Result<T, SimulationError>;
