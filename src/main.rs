use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::window::WindowPlugin;
use clap::Parser;
use spacesim::cli::{self, Args};
use spacesim::plugins::{ControlsPlugin, SimulationPlugin, VisualizationPlugin};
use spacesim::prelude::*;

fn main() -> AppExit {
    let args = Args::parse();

    let config = match cli::load_and_apply_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return AppExit::error();
        }
    };

    if args.list_bodies {
        return exit_with(cli::list_bodies(&config, &mut std::io::stdout()).map_err(Into::into));
    }

    if let Some(frames) = args.headless {
        return exit_with(cli::run_headless(&config, frames, &mut std::io::stdout()).map(drop));
    }

    let mut controller = match SimulationController::from_config(&config) {
        Ok(controller) => controller,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            return AppExit::error();
        }
    };
    controller.set_paused(args.paused);

    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(LogPlugin {
                level: if args.verbose {
                    bevy::log::Level::DEBUG
                } else {
                    bevy::log::Level::INFO
                },
                filter: "wgpu=error,naga=warn".to_string(),
                ..default()
            })
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Space Sim".to_string(),
                    ..default()
                }),
                ..default()
            }),
    );

    info!(
        "Spacesim {} (built {})",
        env!("CARGO_PKG_VERSION"),
        env!("BUILD_DATE")
    );
    debug!(
        "Configuration:\n{}",
        toml::to_string_pretty(&config).unwrap_or_default()
    );

    app.add_plugins((
        SimulationPlugin::new(controller),
        ControlsPlugin::new(&config.view),
        VisualizationPlugin::new(&config.view),
    ));
    app.insert_resource(config);

    app.run()
}

fn exit_with(result: Result<(), cli::CliError>) -> AppExit {
    match result {
        Ok(()) => AppExit::Success,
        Err(e) => {
            eprintln!("Error: {e}");
            AppExit::error()
        }
    }
}
