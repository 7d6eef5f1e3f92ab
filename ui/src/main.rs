#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::Context as _;
use log::{debug, info, warn};
use nomina_business::BusinessConfig;
use nomina_ui::NominaApp;
use nomina_ui::state::State;

mod alloc {
    #[global_allocator]
    static MALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;
}

fn main() -> anyhow::Result<()> {
    // Load `.env` before the logger so RUST_LOG can live there too.
    let dotenv = dotenvy::dotenv();

    // Log to stderr (if you run with `RUST_LOG=debug`).
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_module("egui_winit::clipboard", log::LevelFilter::Off)
        .init();

    if let Err(err) = dotenv {
        debug!("No .env file loaded: {err}");
    }

    // Commands are spawned on this runtime from the UI thread.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start the tokio runtime")?;
    let _guard = runtime.enter();

    let config = BusinessConfig::from_env().context("Invalid database configuration")?;
    match &config {
        Some(config) => info!("Using database at {}", config.api_base_url),
        None => warn!("NOMINA_API_URL is not set; running on demo data"),
    }
    let state = State::new(config);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 640.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Nómina RH",
        native_options,
        Box::new(move |_cc| Ok(Box::new(NominaApp::new(state)))),
    )
    .map_err(|err| anyhow::anyhow!("eframe exited with an error: {err}"))
}
