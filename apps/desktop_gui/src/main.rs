//! Driftline Desktop entry point: wires the bootstrap worker to the gating
//! app shell and hands control to eframe.

use std::path::PathBuf;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

mod backend_bridge;
mod controller;
mod settings;
mod ui;

use controller::events::BootstrapEvent;

#[derive(Debug, Parser)]
#[command(name = "driftline-desktop", about = "Driftline community client")]
struct Cli {
    /// Server base URL, e.g. http://127.0.0.1:8443
    #[arg(long)]
    server_url: Option<String>,
    /// Directory holding saved credentials.
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let cli = Cli::parse();
    let settings = settings::load_settings(cli.server_url, cli.data_dir);
    tracing::info!(server_url = %settings.server_url, "starting bootstrap");

    let (event_tx, event_rx) = bounded::<BootstrapEvent>(16);
    backend_bridge::spawn_bootstrap_thread(settings, event_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(ui::doc_title::DEFAULT_TITLE)
            .with_inner_size([1180.0, 760.0])
            .with_min_inner_size([860.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Driftline Desktop",
        options,
        Box::new(|_cc| Ok(Box::new(ui::app::DesktopApp::new(event_rx)))),
    )
}
