mod app;
mod color;
mod config;
mod data;
mod export;
mod state;
mod ui;

use anyhow::{Context, anyhow};
use app::CafeWalkApp;
use clap::Parser;
use config::Cli;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let paths = cli.data_paths();
    let selection = cli.walk_time;
    let data = data::loader::load_dashboard(&paths)
        .with_context(|| format!("loading dashboard data from {}", paths.dir.display()))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Cafe Walk – Coffee Shops by Walk Time",
        options,
        Box::new(move |_cc| Ok(Box::new(CafeWalkApp::new(data, paths.dir, selection)))),
    )
    .map_err(|e| anyhow!("running the dashboard window: {e}"))
}
