//! Explicit Euler integration method (forward Euler)
//!
//! Kept for comparison: on closed orbits its energy drifts steadily, which is
//! what the semi-implicit scheme avoids.

use super::Integrator;
use crate::physics::math::{Scalar, Vector};

/// Explicit Euler integrator (forward Euler method)
///
/// Position is advanced with the velocity from the start of the step:
///
/// ```text
/// x(t+dt) = x(t) + v(t) * dt
/// v(t+dt) = v(t) + a(t) * dt
/// ```
#[derive(Debug, Copy, Clone, Default)]
pub struct ExplicitEuler;

impl Integrator for ExplicitEuler {
    fn step(&self, position: &mut Vector, velocity: &mut Vector, acceleration: Vector, dt: Scalar) {
        *position += *velocity * dt;
        *velocity += acceleration * dt;
    }

    fn name(&self) -> &'static str {
        "Explicit Euler"
    }

    fn order(&self) -> usize {
        1
    }
}
