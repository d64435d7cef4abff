//! Centralized event definitions
//!
//! Input collaborators never touch the controller directly; they send
//! [`SimulationCommand`]s which the simulation plugin applies in order before
//! the frame is advanced.

use bevy::prelude::*;

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum SimulationCommand {
    TogglePause,
    Reset,
    /// Zoom steps; positive zooms in
    Zoom(f32),
    /// Screen-space pan in pixels
    Pan(Vec2),
    /// Replace the frame-time buffer with one of the given capacity
    SetTelemetryCapacity(usize),
}
