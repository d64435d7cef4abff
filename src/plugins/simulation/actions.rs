//! Systems that translate commands and frame timing into controller calls

use crate::prelude::*;

pub fn apply_simulation_commands(
    mut commands: EventReader<SimulationCommand>,
    mut controller: ResMut<SimulationController>,
) {
    for command in commands.read() {
        match *command {
            SimulationCommand::TogglePause => controller.toggle_pause(),
            SimulationCommand::Reset => {
                controller.reset();
                info!("Simulation reset");
            }
            SimulationCommand::Zoom(delta) => controller.zoom_by(delta),
            SimulationCommand::Pan(delta) => controller.pan_by(delta),
            SimulationCommand::SetTelemetryCapacity(capacity) => {
                if let Err(e) = controller.set_telemetry_capacity(capacity) {
                    warn!("Ignoring telemetry capacity {}: {}", capacity, e);
                }
            }
        }
    }
}

pub fn advance_simulation(time: Res<Time>, mut controller: ResMut<SimulationController>) {
    controller.advance_frame(time.delta_secs());
}

pub fn record_frame_duration(time: Res<Time<Real>>, mut controller: ResMut<SimulationController>) {
    controller.record_frame_duration(time.delta_secs() * 1000.0);
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use crate::test_utils::create_test_app;

    #[test]
    fn test_commands_reach_the_controller() {
        let mut app = create_test_app();
        app.update();

        app.world_mut().send_event(SimulationCommand::TogglePause);
        app.world_mut().send_event(SimulationCommand::Pan(Vec2::new(3.0, 4.0)));
        app.world_mut()
            .send_event(SimulationCommand::SetTelemetryCapacity(16));
        app.update();

        let controller = app.world().resource::<SimulationController>();
        assert!(controller.is_paused());
        assert_eq!(controller.pan(), Vec2::new(3.0, 4.0));
        assert_eq!(controller.frame_times().capacity(), 16);
    }

    #[test]
    fn test_zero_capacity_command_is_ignored() {
        let mut app = create_test_app();
        app.world_mut()
            .send_event(SimulationCommand::SetTelemetryCapacity(0));
        app.update();

        let controller = app.world().resource::<SimulationController>();
        assert_eq!(controller.frame_times().capacity(), 256);
    }

    #[test]
    fn test_every_frame_advances_and_records() {
        let mut app = create_test_app();
        for _ in 0..5 {
            app.update();
        }

        let controller = app.world().resource::<SimulationController>();
        assert_eq!(controller.frame_count(), 5);
        assert_eq!(controller.frame_times().len(), 5);
        assert!(controller.simulated_time() > 0.0);
    }

    #[test]
    fn test_paused_frames_are_still_recorded() {
        let mut app = create_test_app();
        app.world_mut().send_event(SimulationCommand::TogglePause);
        app.update();
        let initial = app.world().resource::<SimulationController>().registry().clone();

        for _ in 0..3 {
            app.update();
        }

        let controller = app.world().resource::<SimulationController>();
        assert_eq!(controller.registry(), &initial);
        assert_eq!(controller.frame_times().len(), 4);
    }
}
