//! Arena of bodies with a forest-shaped primary relation
//!
//! Bodies are stored contiguously and addressed by [`BodyId`]. A body's
//! primary is a plain index back-reference that is resolved and checked for
//! cycles once, when the registry is built. After that the hierarchy never
//! changes; only positions and velocities move.

use crate::error::ConfigurationError;
use crate::physics::body::{Body, BodyId, BodySnapshot, BodySpec, InitialOrbit};
use crate::physics::math::{
    GRAVITATIONAL_CONSTANT, Scalar, Vector, orbital_tangent, radial_direction,
};
use bevy::log::debug;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct BodyRegistry {
    pub(crate) bodies: Vec<Body>,
    /// Primaries always precede their satellites
    pub(crate) hierarchy_order: Vec<BodyId>,
    /// Per-step acceleration scratch space, sized once at build time
    pub(crate) accelerations: Vec<Vector>,
}

impl BodyRegistry {
    /// Resolve and validate `specs`, then place every body at its initial orbit
    pub fn build(specs: &[BodySpec]) -> Result<Self, ConfigurationError> {
        if specs.is_empty() {
            return Err(ConfigurationError::EmptyScenario);
        }

        let mut ids_by_name = HashMap::with_capacity(specs.len());
        for (index, spec) in specs.iter().enumerate() {
            if ids_by_name.insert(spec.name.as_str(), BodyId(index)).is_some() {
                return Err(ConfigurationError::DuplicateName(spec.name.clone()));
            }
        }

        let mut primaries = Vec::with_capacity(specs.len());
        for spec in specs {
            if !(spec.mass > 0.0 && spec.mass.is_finite()) {
                return Err(ConfigurationError::NonPositiveMass {
                    body: spec.name.clone(),
                    mass: spec.mass,
                });
            }

            let primary = match &spec.primary {
                Some(name) => Some(*ids_by_name.get(name.as_str()).ok_or_else(|| {
                    ConfigurationError::UnresolvedPrimary {
                        body: spec.name.clone(),
                        primary: name.clone(),
                    }
                })?),
                None => None,
            };
            primaries.push(primary);
        }

        let depths = hierarchy_depths(specs, &primaries)?;
        let mut hierarchy_order: Vec<BodyId> = (0..specs.len()).map(BodyId).collect();
        hierarchy_order.sort_by_key(|id| depths[id.0]);

        let bodies = specs
            .iter()
            .zip(&primaries)
            .enumerate()
            .map(|(index, (spec, &primary))| {
                let has_satellites = primaries.contains(&Some(BodyId(index)));
                let gravitational_parameter = match spec.gravitational_parameter {
                    Some(gm) => Some(gm),
                    None if has_satellites => {
                        let derived = GRAVITATIONAL_CONSTANT * spec.mass;
                        debug!(
                            "Derived gravitational parameter {:e} for '{}' from its mass",
                            derived, spec.name
                        );
                        Some(derived)
                    }
                    None => None,
                };

                Body {
                    id: BodyId(index),
                    name: spec.name.clone(),
                    primary,
                    position: Vector::ZERO,
                    velocity: Vector::ZERO,
                    mass: spec.mass,
                    inverse_mass: spec.mass.recip(),
                    gravitational_parameter,
                    radius: spec.radius,
                    color: spec.color,
                    orbit: InitialOrbit {
                        distance: spec.distance,
                        speed: spec.orbital_speed,
                        angle: spec.initial_angle,
                    },
                }
            })
            .collect();

        let mut registry = Self {
            bodies,
            hierarchy_order,
            accelerations: Vec::with_capacity(specs.len()),
        };
        registry.reset();

        debug!(
            "Built body registry with {} bodies and {} roots",
            registry.len(),
            registry.roots().count()
        );

        Ok(registry)
    }

    /// Put every body back on its initial orbit, primaries first
    pub fn reset(&mut self) {
        for &BodyId(index) in &self.hierarchy_order {
            let (origin, origin_velocity) = match self.bodies[index].primary {
                Some(BodyId(primary)) => (self.bodies[primary].position, self.bodies[primary].velocity),
                None => (Vector::ZERO, Vector::ZERO),
            };

            let body = &mut self.bodies[index];
            let orbit = body.orbit;
            body.position = origin + radial_direction(orbit.angle) * orbit.distance;
            body.velocity = origin_velocity + orbital_tangent(orbit.angle) * orbit.speed;
        }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn find(&self, name: &str) -> Option<BodyId> {
        self.bodies
            .iter()
            .find(|body| body.name == name)
            .map(|body| body.id)
    }

    /// Bodies in an order where every primary precedes its satellites
    pub fn hierarchy_order(&self) -> &[BodyId] {
        &self.hierarchy_order
    }

    pub fn roots(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(|body| body.primary.is_none())
    }

    pub fn satellites_of(&self, id: BodyId) -> impl Iterator<Item = &Body> {
        self.bodies
            .iter()
            .filter(move |body| body.primary == Some(id))
    }

    /// Primary chain of `id`, nearest first
    pub fn ancestors(&self, id: BodyId) -> Ancestors<'_> {
        Ancestors {
            bodies: &self.bodies,
            next: self.get(id).and_then(|body| body.primary),
        }
    }

    /// Topmost body of the hierarchy `id` belongs to
    pub fn root_of(&self, id: BodyId) -> BodyId {
        self.ancestors(id).last().map_or(id, |body| body.id)
    }

    pub fn snapshot(&self, id: BodyId) -> Option<BodySnapshot> {
        let body = self.get(id)?;
        let root = &self.bodies[self.root_of(id).0];

        Some(BodySnapshot {
            id: body.id,
            name: body.name.clone(),
            primary: body.primary,
            position: body.position,
            velocity: body.velocity,
            radius: body.radius,
            color: body.color,
            distance_from_root: body.position.distance(root.position),
            speed: body.velocity.length(),
        })
    }

    pub fn snapshots(&self) -> impl Iterator<Item = BodySnapshot> + '_ {
        self.bodies.iter().filter_map(|body| self.snapshot(body.id))
    }

    /// Sum of `½ v²` and the pairwise potentials along every primary link,
    /// per unit mass. Constant for an exact integration of the hierarchy.
    pub fn specific_orbital_energy(&self) -> Scalar {
        self.bodies
            .iter()
            .map(|body| {
                let kinetic = 0.5 * body.velocity.length_squared();
                let potential: Scalar = self
                    .ancestors(body.id)
                    .filter_map(|primary| {
                        primary.gravitational_parameter.map(|gm| {
                            -gm / primary.position.distance(body.position)
                        })
                    })
                    .sum();
                kinetic + potential
            })
            .sum()
    }
}

impl PartialEq for BodyRegistry {
    fn eq(&self, other: &Self) -> bool {
        self.bodies == other.bodies && self.hierarchy_order == other.hierarchy_order
    }
}

/// Iterator over a body's primary chain
pub struct Ancestors<'a> {
    bodies: &'a [Body],
    next: Option<BodyId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a Body;

    fn next(&mut self) -> Option<Self::Item> {
        let body = &self.bodies[self.next?.0];
        self.next = body.primary;
        Some(body)
    }
}

/// Depth of every body in the forest, failing on cycles
fn hierarchy_depths(
    specs: &[BodySpec],
    primaries: &[Option<BodyId>],
) -> Result<Vec<usize>, ConfigurationError> {
    let mut depths = Vec::with_capacity(primaries.len());

    for (index, spec) in specs.iter().enumerate() {
        let mut depth = 0;
        let mut next = primaries[index];
        while let Some(BodyId(primary)) = next {
            depth += 1;
            if depth > primaries.len() {
                return Err(ConfigurationError::CyclicHierarchy {
                    body: spec.name.clone(),
                });
            }
            next = primaries[primary];
        }
        depths.push(depth);
    }

    Ok(depths)
}
