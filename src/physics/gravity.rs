//! Hierarchical gravity engine
//!
//! Every body is pulled by each ancestor in its primary chain and by nothing
//! else; siblings never interact. This two-body-per-link decomposition is an
//! approximation of full N-body gravitation and is what the scenarios are
//! tuned for.

use crate::physics::body::{Body, BodyId};
use crate::physics::integrators::IntegratorType;
use crate::physics::math::{DEFAULT_SOFTENING, Scalar, Vector, softened_acceleration};
use crate::physics::registry::BodyRegistry;
use serde::{Deserialize, Serialize};

/// When a satellite observes its ancestors' positions within one step
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum UpdateOrder {
    /// All accelerations are evaluated from the pre-step state before any
    /// body moves
    #[default]
    Simultaneous,
    /// Primaries are advanced first and satellites see their already-updated
    /// positions from the same step
    Hierarchical,
}

/// Advances a [`BodyRegistry`] through time
///
/// Holds only immutable parameters, so [`GravityIntegrator::step`] is a pure
/// function of the registry and `dt`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GravityIntegrator {
    softening: Scalar,
    update_order: UpdateOrder,
    integrator: IntegratorType,
}

impl Default for GravityIntegrator {
    fn default() -> Self {
        Self {
            softening: DEFAULT_SOFTENING,
            update_order: UpdateOrder::default(),
            integrator: IntegratorType::default(),
        }
    }
}

impl GravityIntegrator {
    pub fn new(softening: Scalar, update_order: UpdateOrder, integrator: IntegratorType) -> Self {
        Self {
            softening,
            update_order,
            integrator,
        }
    }

    pub fn with_softening(mut self, softening: Scalar) -> Self {
        self.softening = softening;
        self
    }

    pub fn with_update_order(mut self, update_order: UpdateOrder) -> Self {
        self.update_order = update_order;
        self
    }

    pub fn with_integrator(mut self, integrator: IntegratorType) -> Self {
        self.integrator = integrator;
        self
    }

    pub fn softening(&self) -> Scalar {
        self.softening
    }

    pub fn update_order(&self) -> UpdateOrder {
        self.update_order
    }

    pub fn integrator(&self) -> IntegratorType {
        self.integrator
    }

    /// Advance every body exactly once by `dt` seconds
    pub fn step(&self, registry: &mut BodyRegistry, dt: Scalar) {
        match self.update_order {
            UpdateOrder::Simultaneous => self.step_simultaneous(registry, dt),
            UpdateOrder::Hierarchical => self.step_hierarchical(registry, dt),
        }
    }

    /// Total acceleration on body `id` from its primary chain, or `None` if
    /// `id` does not belong to `registry`
    pub fn acceleration_on(&self, registry: &BodyRegistry, id: BodyId) -> Option<Vector> {
        registry
            .get(id)
            .map(|_| self.acceleration_at(&registry.bodies, id.0))
    }

    /// `index` must be in bounds; primary links are validated at build time
    pub(crate) fn acceleration_at(&self, bodies: &[Body], index: usize) -> Vector {
        let satellite = bodies[index].position;
        let mut acceleration = Vector::ZERO;
        let mut next = bodies[index].primary;

        while let Some(id) = next {
            let primary = &bodies[id.0];
            if let Some(gm) = primary.gravitational_parameter {
                acceleration += softened_acceleration(gm, primary.position, satellite, self.softening);
            }
            next = primary.primary;
        }

        acceleration
    }

    fn step_simultaneous(&self, registry: &mut BodyRegistry, dt: Scalar) {
        let BodyRegistry {
            bodies,
            accelerations,
            ..
        } = registry;

        accelerations.clear();
        {
            let bodies: &[Body] = bodies;
            accelerations
                .extend((0..bodies.len()).map(|index| self.acceleration_at(bodies, index)));
        }

        let integrator = self.integrator.integrator();
        for (body, &acceleration) in bodies.iter_mut().zip(accelerations.iter()) {
            integrator.step(&mut body.position, &mut body.velocity, acceleration, dt);
        }
    }

    fn step_hierarchical(&self, registry: &mut BodyRegistry, dt: Scalar) {
        let BodyRegistry {
            bodies,
            hierarchy_order,
            ..
        } = registry;

        let integrator = self.integrator.integrator();
        for id in hierarchy_order.iter() {
            let acceleration = self.acceleration_at(bodies, id.0);
            let body = &mut bodies[id.0];
            integrator.step(&mut body.position, &mut body.velocity, acceleration, dt);
        }
    }
}
