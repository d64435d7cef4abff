//! Controls plugin - Self-contained plugin pattern
//!
//! This plugin translates keyboard and mouse wheel input into
//! SimulationCommand events. It never touches the controller directly.

use crate::config::ViewConfig;
use crate::plugins::simulation::SimulationSet;
use crate::prelude::*;
use bevy::input::mouse::{AccumulatedMouseScroll, MouseScrollUnit};

/// Scroll distance in pixels treated as one wheel notch
const PIXELS_PER_SCROLL_LINE: f32 = 40.0;

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ControlSettings {
    /// Pixels per second while an arrow key is held
    pub pan_speed: f32,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            pan_speed: ViewConfig::default().pan_speed,
        }
    }
}

#[derive(Default)]
pub struct ControlsPlugin {
    settings: ControlSettings,
}

impl ControlsPlugin {
    pub fn new(view: &ViewConfig) -> Self {
        Self {
            settings: ControlSettings {
                pan_speed: view.pan_speed,
            },
        }
    }
}

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.settings);

        app.add_systems(
            Update,
            (
                keyboard_input_handler,
                zoom_on_scroll,
                pan_on_arrow_keys,
                #[cfg(not(target_arch = "wasm32"))]
                quit_on_escape,
            )
                .in_set(SimulationSet::Input),
        );
    }
}

fn keyboard_input_handler(
    keys: Res<ButtonInput<KeyCode>>,
    controller: Res<SimulationController>,
    mut commands: EventWriter<SimulationCommand>,
) {
    for &keycode in keys.get_just_pressed() {
        match keycode {
            KeyCode::Space => {
                commands.write(SimulationCommand::TogglePause);
            }
            KeyCode::KeyR => {
                commands.write(SimulationCommand::Reset);
            }
            KeyCode::Equal | KeyCode::NumpadAdd => {
                commands.write(SimulationCommand::Zoom(1.0));
            }
            KeyCode::Minus | KeyCode::NumpadSubtract => {
                commands.write(SimulationCommand::Zoom(-1.0));
            }
            KeyCode::BracketLeft => {
                let capacity = controller.frame_times().capacity();
                commands.write(SimulationCommand::SetTelemetryCapacity((capacity / 2).max(1)));
            }
            KeyCode::BracketRight => {
                let capacity = controller.frame_times().capacity();
                commands.write(SimulationCommand::SetTelemetryCapacity(
                    capacity.saturating_mul(2),
                ));
            }
            _ => {}
        }
    }
}

fn zoom_on_scroll(
    scroll: Res<AccumulatedMouseScroll>,
    mut commands: EventWriter<SimulationCommand>,
) {
    let notches = match scroll.unit {
        MouseScrollUnit::Line => scroll.delta.y,
        MouseScrollUnit::Pixel => scroll.delta.y / PIXELS_PER_SCROLL_LINE,
    };
    if notches != 0.0 {
        commands.write(SimulationCommand::Zoom(notches));
    }
}

fn pan_on_arrow_keys(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time<Real>>,
    settings: Res<ControlSettings>,
    mut commands: EventWriter<SimulationCommand>,
) {
    let mut direction = Vec2::ZERO;
    if keys.pressed(KeyCode::ArrowLeft) {
        direction.x += 1.0;
    }
    if keys.pressed(KeyCode::ArrowRight) {
        direction.x -= 1.0;
    }
    if keys.pressed(KeyCode::ArrowUp) {
        direction.y -= 1.0;
    }
    if keys.pressed(KeyCode::ArrowDown) {
        direction.y += 1.0;
    }

    if direction != Vec2::ZERO {
        // Held keys still pan on the first frame, before any real time has passed
        let seconds = time.delta_secs().max(1.0 / 60.0);
        commands.write(SimulationCommand::Pan(
            direction * settings.pan_speed * seconds,
        ));
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn quit_on_escape(keys: Res<ButtonInput<KeyCode>>, mut exit: EventWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write_default();
    }
}
