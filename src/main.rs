mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::anyhow;
use app::LaunchDashApp;
use clap::Parser;
use config::Cli;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    // The dashboard has nothing to show without its dataset.
    let dataset = match data::loader::load_file(&cli.data) {
        Ok(ds) => ds,
        Err(e) => {
            log::error!("Failed to load launch records: {e:#}");
            return Err(e);
        }
    };
    let bounds = dataset.payload_bounds();
    log::info!(
        "Loaded {} launches from {} sites, payload {}..={} kg",
        dataset.len(),
        dataset.sites().len(),
        bounds.low,
        bounds.high
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([cli.width, cli.height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Launch Records Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchDashApp::new(dataset)))),
    )
    .map_err(|e| anyhow!("dashboard window failed: {e}"))
}
