// Entry point for the Find the Mole TUI application
// Sets up optional file logging, loads preferences and launches the main UI

use std::env;
use std::error::Error;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

// Module declarations
mod xtm_color;  // Palette and colour-depth fallback
mod xtm_config; // User preferences
mod xtm_error;  // Error type shared by all modules
mod xtm_game;   // Game state and rules
mod xtm_input;  // Board geometry and pointer hit-testing
mod xtm_lang;   // Multi-language string resources
mod xtm_ui;     // Terminal setup and the frame loop
mod xtm_view;   // Header and board widgets

use xtm_config::{Config, load_config};
use xtm_error::AppError;
use xtm_lang::Lang;
use xtm_ui::run as run_ui;

/// Path of the log file; logging is off when unset
const LOG_ENV: &str = "XTMOLE_LOG";

fn main() -> Result<(), Box<dyn Error>> {
    init_logging()?;

    // Preferences are optional; a broken file must not keep the game from starting
    let cfg = match load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(error = %e, "falling back to default configuration");
            Config::default()
        }
    };

    let lang = Lang::new(&cfg.language);
    info!(language = %lang.current_lang, "starting");

    run_ui(&cfg, &lang)?;
    info!("exited");
    Ok(())
}

/// Send tracing output to the file named by XTMOLE_LOG.
/// The terminal itself is the game's display, so logs never go to stdout.
fn init_logging() -> Result<(), AppError> {
    let Some(path) = env::var_os(LOG_ENV).map(PathBuf::from) else {
        return Ok(());
    };
    let file = File::create(&path).map_err(|source| AppError::LogFile { path, source })?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}
