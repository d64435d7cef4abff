pub mod controls;
pub mod simulation;
pub mod visualization;

pub use controls::ControlsPlugin;
pub use simulation::{SimulationPlugin, SimulationSet};
pub use visualization::VisualizationPlugin;
