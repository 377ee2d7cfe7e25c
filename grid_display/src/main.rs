// main.rs - Window front end for the Game of Life simulation
//
// Keys: Space pause, S step, R reset, C clear, 1-6 palette, P next pattern,
// Esc quit. Hold the left button to revive cells, the right button to kill.

use std::env;

use anyhow::Context;
use conway::config::parse_seed;
use conway::{Config, ConfigError, Simulation};
use tracing_subscriber::EnvFilter;

mod app;
mod fps;
mod input;
mod render;

use app::LifeApp;

/// Applies the optional `LIFE_SEED`, `LIFE_BACKEND` and `LIFE_PALETTE`
/// overrides on top of the built-in constants.
fn config_from_env() -> Result<Config, ConfigError> {
    let mut config = Config::default();

    if let Ok(seed) = env::var("LIFE_SEED") {
        config.seed = Some(parse_seed(&seed)?);
    }
    if let Ok(backend) = env::var("LIFE_BACKEND") {
        config.backend = backend.parse()?;
    }
    if let Ok(palette) = env::var("LIFE_PALETTE") {
        config.palette = palette.parse()?;
    }

    config.validate()?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config_from_env().context("invalid configuration")?;
    let sim = Simulation::new(config.clone()).context("failed to start the simulation")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(app::TITLE)
            .with_inner_size([config.window_width as f32, config.window_height as f32])
            .with_resizable(false),
        ..Default::default()
    };

    eframe::run_native(
        app::TITLE,
        options,
        Box::new(|_cc| Box::new(LifeApp::new(sim))),
    )
    .map_err(|err| anyhow::anyhow!("window error: {err}"))
}
