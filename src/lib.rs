//! Spacesim library
//!
//! A hierarchical orbital-mechanics toy: bodies orbit their primaries under a
//! softened inverse-square law, advanced a fixed number of sub-steps per
//! displayed frame, with a rolling window of frame times for the chart.

pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod physics;
pub mod plugins;
pub mod prelude;
pub mod utils;

#[cfg(test)]
pub mod test_utils;

pub use controller::SimulationController;
pub use error::{ConfigurationError, RingBufferError, SimulationError};
pub use utils::RingBuffer;
