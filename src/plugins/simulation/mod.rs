//! Simulation plugin - Self-contained plugin pattern
//!
//! Owns the [`SimulationController`] resource and drives it once per frame:
//! queued commands are applied, the frame is advanced, and at the very end of
//! the frame the measured frame duration is recorded for the chart.

use crate::prelude::*;

mod actions;

use actions::{advance_simulation, apply_simulation_commands, record_frame_duration};

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Input,
    Commands,
    Advance,
    Render,
}

pub struct SimulationPlugin {
    controller: SimulationController,
}

impl SimulationPlugin {
    pub fn new(controller: SimulationController) -> Self {
        Self { controller }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.controller.clone());
        app.add_event::<SimulationCommand>();

        app.configure_sets(
            Update,
            (
                SimulationSet::Input,
                SimulationSet::Commands,
                SimulationSet::Advance,
                SimulationSet::Render,
            )
                .chain(),
        );

        app.add_systems(
            Update,
            (
                apply_simulation_commands.in_set(SimulationSet::Commands),
                advance_simulation.in_set(SimulationSet::Advance),
            ),
        );
        app.add_systems(Last, record_frame_duration);
    }
}
