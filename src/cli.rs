//! Command line interface for Spacesim

use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use thiserror::Error;

use crate::config::SimulationConfig;
use crate::controller::SimulationController;
use crate::error::SimulationError;
use crate::physics::body::BodySpec;
use crate::physics::gravity::UpdateOrder;
use crate::physics::scenario::ScenarioPreset;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("failed to load configuration from {path}: {source}")]
    ConfigLoad {
        path: PathBuf,
        #[source]
        source: config::ConfigError,
    },
    #[error(transparent)]
    Simulation(#[from] SimulationError),
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Spacesim - hierarchical orbital mechanics toy
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (TOML format)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Built-in scenario to simulate (overrides config file)
    #[arg(short, long, value_enum, value_name = "PRESET")]
    pub scenario: Option<ScenarioPreset>,

    /// Simulated seconds per second of base time step (overrides config file)
    #[arg(short = 't', long, value_name = "X")]
    pub time_multiplier: Option<f64>,

    /// Gravity sub-steps per displayed frame (overrides config file)
    #[arg(long, value_name = "N")]
    pub substeps: Option<usize>,

    /// Number of frame times kept for the chart (overrides config file)
    #[arg(long, value_name = "N")]
    pub telemetry_capacity: Option<usize>,

    /// Order in which bodies see each other's updates (overrides config file)
    #[arg(long, value_enum, value_name = "ORDER")]
    pub update_order: Option<UpdateOrder>,

    /// Start paused
    #[arg(short = 'p', long)]
    pub paused: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Print the resolved scenario and exit
    #[arg(long)]
    pub list_bodies: bool,

    /// Advance FRAMES frames without a window, print every body and exit
    #[arg(long, value_name = "FRAMES")]
    pub headless: Option<u64>,
}

/// Loads configuration from file or defaults, then applies command-line overrides
pub fn load_and_apply_config(args: &Args) -> Result<SimulationConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path).map_err(|source| CliError::ConfigLoad {
            path: path.clone(),
            source,
        })?,
        None => SimulationConfig::load_from_user_config(),
    };

    if let Some(preset) = args.scenario {
        config.scenario.preset = preset;
        config.scenario.bodies = None;
    }
    if let Some(multiplier) = args.time_multiplier {
        config.physics.time_multiplier = multiplier;
    }
    if let Some(substeps) = args.substeps {
        config.physics.substeps_per_frame = substeps;
    }
    if let Some(capacity) = args.telemetry_capacity {
        config.telemetry.capacity = capacity;
    }
    if let Some(update_order) = args.update_order {
        config.physics.update_order = update_order;
    }

    Ok(config)
}

/// Handles the --list-bodies flag
pub fn list_bodies(config: &SimulationConfig, out: &mut impl Write) -> io::Result<()> {
    let bodies = config.scenario.bodies();
    writeln!(out, "{} bodies:", bodies.len())?;
    for BodySpec {
        name,
        primary,
        mass,
        radius,
        distance,
        orbital_speed,
        ..
    } in &bodies
    {
        match primary {
            Some(primary) => writeln!(
                out,
                "  - {name:<10} orbits {primary:<8} at {distance:.4e} m, {orbital_speed:.4e} m/s (mass {mass:.4e} kg, radius {radius:.4e} m)"
            )?,
            None => writeln!(
                out,
                "  - {name:<10} root (mass {mass:.4e} kg, radius {radius:.4e} m)"
            )?,
        }
    }
    Ok(())
}

/// Handles the --headless flag: advance `frames` frames and print the result
pub fn run_headless(
    config: &SimulationConfig,
    frames: u64,
    out: &mut impl Write,
) -> Result<SimulationController, CliError> {
    let mut controller = SimulationController::from_config(config)?;
    for _ in 0..frames {
        controller.advance_frame(0.0);
    }

    writeln!(
        out,
        "After {} frames ({:.3} simulated days):",
        controller.frame_count(),
        controller.simulated_time() / 86_400.0
    )?;
    writeln!(
        out,
        "{:<10} {:>14} {:>14} {:>14} {:>12}",
        "body", "x [m]", "y [m]", "from root [m]", "speed [m/s]"
    )?;
    for snapshot in controller.snapshots() {
        writeln!(
            out,
            "{:<10} {:>14.6e} {:>14.6e} {:>14.6e} {:>12.4e}",
            snapshot.name,
            snapshot.position.x,
            snapshot.position.y,
            snapshot.distance_from_root,
            snapshot.speed
        )?;
    }

    Ok(controller)
}
