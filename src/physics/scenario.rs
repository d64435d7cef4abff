//! Built-in scenarios
//!
//! Scenarios are plain lists of [`BodySpec`]s so a configuration file can
//! replace them wholesale.

use crate::physics::body::BodySpec;
use crate::physics::math::Scalar;
use serde::{Deserialize, Serialize};

// https://en.wikipedia.org/wiki/Standard_gravitational_parameter
pub const GM_SUN: Scalar = 1.3271244e20;
pub const GM_EARTH: Scalar = 3.986004418e14;
pub const GM_JUPITER: Scalar = 1.26686534e17;
pub const GM_SATURN: Scalar = 3.7931187e16;

const YELLOW: [f32; 3] = [0.992, 0.976, 0.0];
const GRAY: [f32; 3] = [0.510, 0.510, 0.510];
const GREEN: [f32; 3] = [0.0, 0.894, 0.188];
const BLUE: [f32; 3] = [0.0, 0.475, 0.945];
const RED: [f32; 3] = [0.902, 0.161, 0.216];
const ORANGE: [f32; 3] = [1.0, 0.631, 0.0];
const BEIGE: [f32; 3] = [0.827, 0.690, 0.514];
const SKY_BLUE: [f32; 3] = [0.4, 0.749, 1.0];
const DARK_BLUE: [f32; 3] = [0.0, 0.322, 0.675];
const LIGHT_GRAY: [f32; 3] = [0.784, 0.784, 0.784];

#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioPreset {
    /// The Sun, eight planets and three large moons
    #[default]
    SolarSystem,
    /// The Sun and eight planets
    Planets,
    /// The Sun, Earth and the Moon
    EarthMoon,
}

impl ScenarioPreset {
    pub fn bodies(self) -> Vec<BodySpec> {
        match self {
            Self::SolarSystem => {
                let mut bodies = planets();
                bodies.extend(moons());
                bodies
            }
            Self::Planets => planets(),
            Self::EarthMoon => vec![
                sun(),
                earth(),
                BodySpec::satellite("Moon", "Earth", 7.342e22, 1.7374e6, 3.844e8, 1.022e3)
                    .with_color(LIGHT_GRAY),
            ],
        }
    }
}

fn sun() -> BodySpec {
    BodySpec::root("Sun", 1.98550e30, 6.95700e8)
        .with_gravitational_parameter(GM_SUN)
        .with_color(YELLOW)
}

fn earth() -> BodySpec {
    BodySpec::satellite("Earth", "Sun", 5.9720e24, 6.378100e6, 1.4959789e11, 2.9786e4)
        .with_gravitational_parameter(GM_EARTH)
        .with_color(BLUE)
}

// https://en.wikipedia.org/wiki/List_of_gravitationally_rounded_objects_of_the_Solar_System
fn planets() -> Vec<BodySpec> {
    vec![
        sun(),
        BodySpec::satellite("Mercury", "Sun", 3.3020e23, 2.439640e6, 5.7909175e10, 4.7870e4)
            .with_color(GRAY),
        BodySpec::satellite("Venus", "Sun", 4.8690e24, 6.051590e6, 1.0820893e11, 3.5020e4)
            .with_color(GREEN),
        earth(),
        BodySpec::satellite("Mars", "Sun", 6.4191e23, 3.397000e6, 2.2793664e11, 2.4077e4)
            .with_color(RED),
        BodySpec::satellite("Jupiter", "Sun", 1.8987e27, 7.149268e7, 7.7841201e11, 1.3070e4)
            .with_gravitational_parameter(GM_JUPITER)
            .with_color(ORANGE),
        BodySpec::satellite("Saturn", "Sun", 5.6851e26, 6.026714e7, 1.4267254e12, 9.6900e3)
            .with_gravitational_parameter(GM_SATURN)
            .with_color(BEIGE),
        BodySpec::satellite("Uranus", "Sun", 8.6849e25, 2.555725e7, 2.8709722e12, 6.8100e3)
            .with_color(SKY_BLUE),
        BodySpec::satellite("Neptune", "Sun", 1.0244e26, 2.476636e7, 4.4982529e12, 5.4300e3)
            .with_color(DARK_BLUE),
    ]
}

fn moons() -> Vec<BodySpec> {
    vec![
        BodySpec::satellite("Moon", "Earth", 7.342e22, 1.7374e6, 3.844e8, 1.022e3)
            .with_color(LIGHT_GRAY),
        BodySpec::satellite("Ganymede", "Jupiter", 1.4819e23, 2.6341e6, 1.0704e9, 1.0880e4)
            .with_color(LIGHT_GRAY),
        BodySpec::satellite("Titan", "Saturn", 1.3452e23, 2.5747e6, 1.22187e9, 5.57e3)
            .with_color(BEIGE),
    ]
}
