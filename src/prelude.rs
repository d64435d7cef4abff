//! Spacesim prelude module
//!
//! This module re-exports the most commonly used types, traits, and functions
//! across the application to reduce import boilerplate.

// External crate re-exports
pub use bevy::prelude::*;

// Internal re-exports - Config
pub use crate::config::SimulationConfig;

// Internal re-exports - Simulation
pub use crate::controller::SimulationController;
pub use crate::events::SimulationCommand;

// Internal re-exports - Physics
pub use crate::physics::math::{Scalar, Vector};
pub use crate::physics::{BodyId, BodyRegistry, BodySnapshot, GravityIntegrator};
