//! Native egui front end for gridkit.
//!
//! Exposes a `run` helper so the workspace root can launch the grid UI
//! without duplicating initialization logic.

mod app;
/// Save worker + protocol types used by the GUI and headless tests.
pub mod backend;

use app::GridApp;
use eframe::egui;
use gridkit_core::{Dataset, GridConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("gridkit=warn,gridkit_core=warn,gridkit_gui=info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

/// Loads the configured dataset, or the built-in demo when none is set.
///
/// # Errors
/// Returns the dataset's I/O, parse, or validation error.
fn load_dataset(config: &GridConfig) -> Result<Dataset, gridkit_core::GridError> {
    match config.dataset_path.as_deref() {
        Some(path) => Dataset::load(path),
        None => {
            info!("no dataset configured; using demo dataset");
            Ok(Dataset::demo())
        }
    }
}

/// Start the grid UI with tracing enabled.
///
/// # Returns
/// The result of `eframe::run_native`.
///
/// # Errors
/// Propagates any `eframe` initialization or runtime error (including app
/// creation failures when the dataset cannot be loaded).
pub fn run() -> eframe::Result<()> {
    init_tracing();

    let config = GridConfig::from_env();
    let dataset =
        load_dataset(&config).map_err(|err| eframe::Error::AppCreation(Box::new(err)))?;
    let app = GridApp::new(config, dataset)
        .map_err(|err| eframe::Error::AppCreation(Box::new(err)))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(app::DEFAULT_WINDOW_SIZE)
            .with_min_inner_size(app::MIN_WINDOW_SIZE)
            .with_title("gridkit"),
        ..Default::default()
    };

    eframe::run_native("gridkit", options, Box::new(|_cc| Ok(Box::new(app))))
}
