//! Numerical integration methods for the gravity engine
//!
//! Integrators are stateless: the gravity engine evaluates one acceleration
//! per body from the pre-step state and hands it to [`Integrator::step`].

use crate::physics::math::{Scalar, Vector};
use serde::{Deserialize, Serialize};

pub mod explicit_euler;
pub mod semi_implicit_euler;

pub use explicit_euler::ExplicitEuler;
pub use semi_implicit_euler::SemiImplicitEuler;

/// Base trait for all integrators
pub trait Integrator: Send + Sync {
    /// Advance a single body's state by one time step
    ///
    /// # Arguments
    /// * `position` - Mutable reference to position
    /// * `velocity` - Mutable reference to velocity vector
    /// * `acceleration` - Acceleration evaluated at the current position
    /// * `dt` - Time step
    fn step(&self, position: &mut Vector, velocity: &mut Vector, acceleration: Vector, dt: Scalar);

    /// Get the name of this integrator
    fn name(&self) -> &'static str;

    /// Get the order of this integrator
    fn order(&self) -> usize;
}

/// Selectable integration scheme
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorType {
    #[default]
    SemiImplicitEuler,
    ExplicitEuler,
}

impl IntegratorType {
    pub fn integrator(self) -> &'static dyn Integrator {
        match self {
            Self::SemiImplicitEuler => &SemiImplicitEuler,
            Self::ExplicitEuler => &ExplicitEuler,
        }
    }
}
