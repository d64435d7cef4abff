//! Test utilities for plugin testing

use crate::plugins::simulation::SimulationPlugin;
use crate::prelude::*;
use bevy::input::ButtonState;
use bevy::input::keyboard::{Key, KeyboardInput, NativeKey};

/// Creates a minimal app with input handling and a default simulation
pub fn create_test_app() -> App {
    let controller = SimulationController::from_config(&SimulationConfig::default())
        .expect("default configuration is valid");
    create_test_app_with(controller)
}

pub fn create_test_app_with(controller: SimulationController) -> App {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins,
        bevy::input::InputPlugin,
        SimulationPlugin::new(controller),
    ));
    app
}

fn send_key(app: &mut App, key: KeyCode, state: ButtonState) {
    app.world_mut().send_event(KeyboardInput {
        key_code: key,
        logical_key: Key::Unidentified(NativeKey::Unidentified),
        state,
        text: None,
        repeat: false,
        window: Entity::PLACEHOLDER,
    });
}

/// Queue a key press, seen as `just_pressed` on the next update
pub fn press_key(app: &mut App, key: KeyCode) {
    send_key(app, key, ButtonState::Pressed);
}

/// Queue a key release, applied on the next update
pub fn release_key(app: &mut App, key: KeyCode) {
    send_key(app, key, ButtonState::Released);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_app() {
        let app = create_test_app();
        assert!(app.world().contains_resource::<Time>());
        assert!(app.world().contains_resource::<ButtonInput<KeyCode>>());
        assert!(app.world().contains_resource::<SimulationController>());
    }

    #[test]
    fn test_key_helpers() {
        let mut app = create_test_app();

        press_key(&mut app, KeyCode::Space);
        app.update();
        let input = app.world().resource::<ButtonInput<KeyCode>>();
        assert!(input.just_pressed(KeyCode::Space));

        release_key(&mut app, KeyCode::Space);
        app.update();
        let input = app.world().resource::<ButtonInput<KeyCode>>();
        assert!(!input.pressed(KeyCode::Space));
    }
}
