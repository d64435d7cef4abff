/// Scalar type for physics calculations (f64 for precision)
pub type Scalar = f64;

/// 2D vector type for positions, velocities, and accelerations
pub type Vector = bevy::math::DVec2;

/// Gravitational constant (m³ kg⁻¹ s⁻²)
pub const GRAVITATIONAL_CONSTANT: Scalar = 6.67408e-11;

/// Default softening added to separations before cubing (m)
pub const DEFAULT_SOFTENING: Scalar = 1e-9;

/// Acceleration a satellite at `satellite` feels from a primary at `primary`
///
/// The displacement is left unnormalized and divided by the cubed softened
/// distance, which folds the unit direction and the inverse-square magnitude
/// into one expression:
///
/// ```text
/// a = GM * (p - s) / (|p - s| + ε)³
/// ```
pub fn softened_acceleration(
    gravitational_parameter: Scalar,
    primary: Vector,
    satellite: Vector,
    softening: Scalar,
) -> Vector {
    let displacement = primary - satellite;
    let distance = libm::sqrt(displacement.length_squared()) + softening;
    displacement * (gravitational_parameter / (distance * distance * distance))
}

/// Unit vector pointing at `angle` radians from +x
pub fn radial_direction(angle: Scalar) -> Vector {
    Vector::new(libm::cos(angle), libm::sin(angle))
}

/// Unit vector a quarter turn clockwise from [`radial_direction`]
///
/// At angle zero this points toward -y, the direction of travel used by the
/// built-in scenarios.
pub fn orbital_tangent(angle: Scalar) -> Vector {
    Vector::new(libm::sin(angle), -libm::cos(angle))
}

/// Period of a circular orbit of radius `distance` around a primary with
/// parameter `gravitational_parameter`
pub fn circular_orbit_period(gravitational_parameter: Scalar, distance: Scalar) -> Scalar {
    2.0 * core::f64::consts::PI * libm::sqrt(distance * distance * distance / gravitational_parameter)
}

/// Speed of a circular orbit of radius `distance`
pub fn circular_orbit_speed(gravitational_parameter: Scalar, distance: Scalar) -> Scalar {
    libm::sqrt(gravitational_parameter / distance)
}
