//! Body records and the data used to create them

use crate::physics::math::{Scalar, Vector};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable index of a body inside its [`BodyRegistry`](super::registry::BodyRegistry)
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub(crate) usize);

impl BodyId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Static orbital parameters a body is reset from
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct InitialOrbit {
    /// Distance from the primary (m)
    pub distance: Scalar,
    /// Speed relative to the primary (m/s)
    pub speed: Scalar,
    /// Angle of the starting position around the primary (rad)
    pub angle: Scalar,
}

/// Serializable description of one body in a scenario
///
/// Primaries are referenced by name and resolved when the registry is built.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BodySpec {
    pub name: String,
    #[serde(default)]
    pub primary: Option<String>,
    /// Mass (kg)
    pub mass: Scalar,
    /// Radius (m), only used for drawing
    pub radius: Scalar,
    /// Standard gravitational parameter (m³ s⁻²); derived from mass when a
    /// primary leaves it unset
    #[serde(default)]
    pub gravitational_parameter: Option<Scalar>,
    /// Distance from the primary (m)
    #[serde(default)]
    pub distance: Scalar,
    /// Speed relative to the primary (m/s)
    #[serde(default)]
    pub orbital_speed: Scalar,
    /// Starting angle around the primary (rad)
    #[serde(default)]
    pub initial_angle: Scalar,
    /// sRGB color
    #[serde(default = "BodySpec::default_color")]
    pub color: [f32; 3],
}

impl BodySpec {
    /// A body at the origin with nothing to orbit
    pub fn root(name: impl Into<String>, mass: Scalar, radius: Scalar) -> Self {
        Self {
            name: name.into(),
            primary: None,
            mass,
            radius,
            gravitational_parameter: None,
            distance: 0.0,
            orbital_speed: 0.0,
            initial_angle: 0.0,
            color: Self::default_color(),
        }
    }

    /// A body orbiting `primary` at `distance` with `orbital_speed`
    pub fn satellite(
        name: impl Into<String>,
        primary: impl Into<String>,
        mass: Scalar,
        radius: Scalar,
        distance: Scalar,
        orbital_speed: Scalar,
    ) -> Self {
        Self {
            primary: Some(primary.into()),
            distance,
            orbital_speed,
            ..Self::root(name, mass, radius)
        }
    }

    pub fn with_gravitational_parameter(mut self, gravitational_parameter: Scalar) -> Self {
        self.gravitational_parameter = Some(gravitational_parameter);
        self
    }

    pub fn with_initial_angle(mut self, angle: Scalar) -> Self {
        self.initial_angle = angle;
        self
    }

    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }

    fn default_color() -> [f32; 3] {
        [1.0, 1.0, 1.0]
    }
}

/// A simulated body
///
/// Position and velocity are only written by the gravity integrator and by
/// registry resets; everything else is fixed once the registry is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub(crate) id: BodyId,
    pub(crate) name: String,
    pub(crate) primary: Option<BodyId>,
    pub(crate) position: Vector,
    pub(crate) velocity: Vector,
    pub(crate) mass: Scalar,
    pub(crate) inverse_mass: Scalar,
    pub(crate) gravitational_parameter: Option<Scalar>,
    pub(crate) radius: Scalar,
    pub(crate) color: [f32; 3],
    pub(crate) orbit: InitialOrbit,
}

impl Body {
    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn primary(&self) -> Option<BodyId> {
        self.primary
    }

    pub fn position(&self) -> Vector {
        self.position
    }

    pub fn velocity(&self) -> Vector {
        self.velocity
    }

    pub fn mass(&self) -> Scalar {
        self.mass
    }

    pub fn inverse_mass(&self) -> Scalar {
        self.inverse_mass
    }

    pub fn gravitational_parameter(&self) -> Option<Scalar> {
        self.gravitational_parameter
    }

    pub fn radius(&self) -> Scalar {
        self.radius
    }

    pub fn color(&self) -> [f32; 3] {
        self.color
    }

    pub fn initial_orbit(&self) -> InitialOrbit {
        self.orbit
    }
}

/// Read-only copy of a body handed to the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct BodySnapshot {
    pub id: BodyId,
    pub name: String,
    pub primary: Option<BodyId>,
    pub position: Vector,
    pub velocity: Vector,
    pub radius: Scalar,
    pub color: [f32; 3],
    /// Distance from the root of this body's hierarchy (m)
    pub distance_from_root: Scalar,
    /// Magnitude of the velocity (m/s)
    pub speed: Scalar,
}
