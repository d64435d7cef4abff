//! Error types shared across the simulation core
//!
//! Configuration errors are fatal and surface before any simulation runs.
//! Ring buffer errors are recoverable and indicate a caller bug.

use thiserror::Error;

/// A scenario or parameter set that cannot be simulated
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("scenario contains no bodies")]
    EmptyScenario,

    #[error("body name '{0}' is used more than once")]
    DuplicateName(String),

    #[error("body '{body}' orbits '{primary}', which is not part of the scenario")]
    UnresolvedPrimary { body: String, primary: String },

    #[error("body '{body}' is part of a cyclic primary chain")]
    CyclicHierarchy { body: String },

    #[error("body '{body}' has non-positive mass {mass}")]
    NonPositiveMass { body: String, mass: f64 },

    #[error("invalid value for {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Misuse of a [`RingBuffer`](crate::utils::ring_buffer::RingBuffer)
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingBufferError {
    #[error("ring buffer capacity must be greater than zero")]
    InvalidArgument,

    #[error("index {index} is out of range for a ring buffer holding {len} elements")]
    OutOfRange { index: isize, len: usize },
}

/// Errors raised while assembling a [`SimulationController`](crate::controller::SimulationController)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("telemetry buffer: {0}")]
    Telemetry(#[from] RingBufferError),
}
