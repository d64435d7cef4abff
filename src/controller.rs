//! Simulation controller
//!
//! The single owner of simulation state. It runs a fixed number of gravity
//! sub-steps per displayed frame, independent of the wall-clock frame time,
//! and keeps the rolling window of frame durations the chart reads.

use crate::config::SimulationConfig;
use crate::error::{RingBufferError, SimulationError};
use crate::physics::body::{BodyId, BodySnapshot, BodySpec};
use crate::physics::gravity::GravityIntegrator;
use crate::physics::math::Scalar;
use crate::physics::registry::BodyRegistry;
use crate::utils::ring_buffer::RingBuffer;
use bevy::log::{debug, info, trace};
use bevy::math::Vec2;
use bevy::prelude::Resource;

#[derive(Resource, Debug, Clone)]
pub struct SimulationController {
    registry: BodyRegistry,
    gravity: GravityIntegrator,
    sub_step: Scalar,
    substeps_per_frame: usize,
    paused: bool,
    zoom: f32,
    zoom_factor: f32,
    zoom_range: (f32, f32),
    pan: Vec2,
    frame_times: RingBuffer<f32>,
    simulated_time: Scalar,
    frame_count: u64,
}

impl SimulationController {
    /// Validate `config`, build its scenario and allocate the telemetry buffer
    pub fn from_config(config: &SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;

        let bodies = config.scenario.bodies();
        let registry = Self::build_registry(&bodies)?;

        let physics = &config.physics;
        let gravity = GravityIntegrator::new(
            physics.softening,
            physics.update_order,
            physics.integrator,
        );

        info!(
            "Simulating {} bodies: {} sub-steps of {:.1} s per frame, {:?} update order, {}",
            registry.len(),
            physics.substeps_per_frame,
            physics.sub_step(),
            physics.update_order,
            physics.integrator.integrator().name(),
        );

        Ok(Self {
            registry,
            gravity,
            sub_step: physics.sub_step(),
            substeps_per_frame: physics.substeps_per_frame,
            paused: false,
            zoom: config.view.zoom.clamp(config.view.min_zoom, config.view.max_zoom),
            zoom_factor: config.view.zoom_factor,
            zoom_range: (config.view.min_zoom, config.view.max_zoom),
            pan: Vec2::ZERO,
            frame_times: RingBuffer::new(config.telemetry.capacity)?,
            simulated_time: 0.0,
            frame_count: 0,
        })
    }

    fn build_registry(bodies: &[BodySpec]) -> Result<BodyRegistry, SimulationError> {
        Ok(BodyRegistry::build(bodies)?)
    }

    pub fn toggle_pause(&mut self) {
        self.set_paused(!self.paused);
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            info!("Simulation {}", if paused { "paused" } else { "resumed" });
        }
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Return every body to the scenario's initial conditions
    pub fn reset(&mut self) {
        self.registry.reset();
        self.simulated_time = 0.0;
        debug!("Simulation reset after {} frames", self.frame_count);
    }

    /// Run one displayed frame worth of simulation
    ///
    /// `frame_dt` is the wall-clock frame interval; it is only reported; the
    /// simulated interval per frame is always `substeps_per_frame * sub_step`.
    pub fn advance_frame(&mut self, frame_dt: f32) {
        self.frame_count += 1;
        if self.paused {
            return;
        }

        for _ in 0..self.substeps_per_frame {
            self.gravity.step(&mut self.registry, self.sub_step);
        }
        self.simulated_time += self.sub_step * self.substeps_per_frame as Scalar;

        trace!(
            "Frame {} ({:.2} ms wall clock) advanced simulation to {:.0} s",
            self.frame_count,
            frame_dt * 1000.0,
            self.simulated_time
        );
    }

    /// Record how long the previous frame took, paused or not
    pub fn record_frame_duration(&mut self, milliseconds: f32) {
        self.frame_times.push(milliseconds);
    }

    /// Multiply the zoom by `zoom_factor^delta`
    pub fn zoom_by(&mut self, delta: f32) {
        let (min, max) = self.zoom_range;
        self.zoom = (self.zoom * self.zoom_factor.powf(delta)).clamp(min, max);
    }

    /// Shift the view by `delta` screen pixels
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    /// Replace the telemetry buffer with an empty one of `capacity` samples
    ///
    /// On error the current buffer is left untouched.
    pub fn set_telemetry_capacity(&mut self, capacity: usize) -> Result<(), RingBufferError> {
        let replacement = RingBuffer::new(capacity)?;
        let previous = std::mem::replace(&mut self.frame_times, replacement);
        debug!(
            "Telemetry capacity changed from {} to {}",
            previous.capacity(),
            capacity
        );
        previous.release();
        Ok(())
    }

    pub fn registry(&self) -> &BodyRegistry {
        &self.registry
    }

    pub fn gravity(&self) -> &GravityIntegrator {
        &self.gravity
    }

    pub fn frame_times(&self) -> &RingBuffer<f32> {
        &self.frame_times
    }

    pub fn snapshot(&self, id: BodyId) -> Option<BodySnapshot> {
        self.registry.snapshot(id)
    }

    pub fn snapshots(&self) -> impl Iterator<Item = BodySnapshot> + '_ {
        self.registry.snapshots()
    }

    /// Simulated seconds covered by one integrator call
    pub fn sub_step(&self) -> Scalar {
        self.sub_step
    }

    pub fn substeps_per_frame(&self) -> usize {
        self.substeps_per_frame
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    /// Simulated seconds since the last reset
    pub fn simulated_time(&self) -> Scalar {
        self.simulated_time
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigurationError;
    use crate::physics::scenario::ScenarioPreset;

    fn controller() -> SimulationController {
        SimulationController::from_config(&SimulationConfig::default()).unwrap()
    }

    #[test]
    fn test_advance_frame_runs_every_substep() {
        let mut controller = controller();
        let mut expected = controller.registry().clone();
        let gravity = *controller.gravity();
        for _ in 0..4 {
            gravity.step(&mut expected, controller.sub_step());
        }

        controller.advance_frame(1.0 / 60.0);

        assert_eq!(controller.registry(), &expected);
        assert!((controller.simulated_time() - 4.0 * 2e6 / 240.0).abs() < 1e-6);
        assert_eq!(controller.frame_count(), 1);
    }

    #[test]
    fn test_wall_clock_does_not_change_the_step() {
        let mut fast = controller();
        let mut slow = controller();

        fast.advance_frame(0.001);
        slow.advance_frame(0.5);

        assert_eq!(fast.registry(), slow.registry());
    }

    #[test]
    fn test_paused_frames_do_no_work_but_still_record() {
        let mut controller = controller();
        let initial = controller.registry().clone();

        controller.toggle_pause();
        assert!(controller.is_paused());
        for _ in 0..10 {
            controller.advance_frame(1.0 / 60.0);
            controller.record_frame_duration(16.7);
        }

        assert_eq!(controller.registry(), &initial);
        assert_eq!(controller.simulated_time(), 0.0);
        assert_eq!(controller.frame_times().len(), 10);

        controller.toggle_pause();
        controller.advance_frame(1.0 / 60.0);
        assert_ne!(controller.registry(), &initial);
    }

    #[test]
    fn test_reset_restores_initial_conditions() {
        let mut controller = controller();
        let initial = controller.registry().clone();

        for _ in 0..120 {
            controller.advance_frame(1.0 / 60.0);
        }
        controller.set_paused(true);
        controller.reset();

        assert_eq!(controller.registry(), &initial);
        assert_eq!(controller.simulated_time(), 0.0);
        assert!(controller.is_paused());
    }

    #[test]
    fn test_zoom_and_pan() {
        let mut controller = controller();
        let initial = controller.zoom();

        controller.zoom_by(1.0);
        assert!((controller.zoom() - initial * 1.1).abs() < initial * 1e-5);
        controller.zoom_by(-1.0);
        assert!((controller.zoom() - initial).abs() < initial * 1e-5);

        controller.zoom_by(1000.0);
        assert_eq!(controller.zoom(), SimulationConfig::default().view.max_zoom);

        controller.pan_by(Vec2::new(10.0, -5.0));
        controller.pan_by(Vec2::new(1.0, 1.0));
        assert_eq!(controller.pan(), Vec2::new(11.0, -4.0));
    }

    #[test]
    fn test_telemetry_capacity_change() {
        let mut controller = controller();
        for sample in 0..300 {
            controller.record_frame_duration(sample as f32);
        }
        assert_eq!(controller.frame_times().len(), 256);
        assert_eq!(*controller.frame_times().get(-1).unwrap(), 299.0);

        controller.set_telemetry_capacity(32).unwrap();
        assert_eq!(controller.frame_times().capacity(), 32);
        assert!(controller.frame_times().is_empty());

        assert_eq!(
            controller.set_telemetry_capacity(0),
            Err(RingBufferError::InvalidArgument)
        );
        assert_eq!(controller.frame_times().capacity(), 32);
    }

    #[test]
    fn test_invalid_scenario_fails_before_simulation() {
        let mut config = SimulationConfig::default();
        let mut bodies = ScenarioPreset::EarthMoon.bodies();
        bodies[2].primary = Some("Terra".into());
        config.scenario.bodies = Some(bodies);

        assert!(matches!(
            SimulationController::from_config(&config),
            Err(SimulationError::Configuration(
                ConfigurationError::UnresolvedPrimary { .. }
            ))
        ));
    }

    #[test]
    fn test_snapshots_cover_every_body() {
        let controller = controller();
        let snapshots: Vec<_> = controller.snapshots().collect();
        assert_eq!(snapshots.len(), controller.registry().len());

        let sun = controller.registry().find("Sun").unwrap();
        assert_eq!(controller.snapshot(sun).unwrap().distance_from_root, 0.0);
    }
}
