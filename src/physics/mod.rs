//! Orbital mechanics core: bodies, their hierarchy, and the gravity engine

pub mod body;
pub mod gravity;
pub mod integrators;
pub mod math;
pub mod registry;
pub mod scenario;

pub use body::{Body, BodyId, BodySnapshot, BodySpec, InitialOrbit};
pub use gravity::{GravityIntegrator, UpdateOrder};
pub use registry::BodyRegistry;
pub use scenario::ScenarioPreset;
