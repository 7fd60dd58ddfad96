// main.rs - Conway's Game of Life window
//
// A tokio ticker advances the board at the current update period while the
// egui window renders it and turns keys and clicks into controller commands.
// Both go through the same Controller, so they never interleave.

use anyhow::Context as _;
use eframe::egui;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod input;
mod ticker;
mod ui;

use config::AppConfig;
use conway::Controller;
use ui::LifeApp;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let config = AppConfig::from_env()?;
    info!(
        width = config.simulation.width,
        height = config.simulation.height,
        workers = config.simulation.workers,
        interval_ms = config.simulation.interval_ms,
        stop_on_cycle = config.simulation.stop_on_cycle,
        "configuration loaded"
    );

    let controller = Controller::new(&config.simulation)?;
    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |cc| Box::new(LifeApp::new(cc, controller, runtime, &config))),
    )
    .map_err(|e| anyhow::anyhow!("window closed with error: {e}"))?;

    info!("exiting");
    Ok(())
}
