//! Program entry point: sets up logging, loads the optional config,
//! constructs the zoo clock, and launches the egui/eframe UI.

mod config;
mod ui;
mod zoo;

use eframe::{egui, NativeOptions};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use config::ZooConfig;
use ui::ZooApp;
use zoo::ZooClock;

fn main() -> eframe::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let config = ZooConfig::load();
    let clock = ZooClock::new(config.cycle_period());
    tracing::info!(cycle = ?clock.cycle_period(), "zoo clock running");

    // eframe 0.27: configure via ViewportBuilder
    let native_options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(egui::vec2(config.window.width, config.window.height))
            .with_title("Zoo Clock"),
        ..Default::default()
    };

    eframe::run_native(
        "Zoo Clock",
        native_options,
        Box::new(move |cc| Box::new(ZooApp::new(cc, clock, &config))),
    )
}
