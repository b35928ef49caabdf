#![warn(clippy::all, clippy::pedantic)]
mod config;
mod editor;
mod error;
mod key;
mod logging;
mod render;
mod terminal;
mod viewport;

use anyhow::Context;
use config::Config;
use editor::{Editor, Exit};
pub use error::EditorError;
pub use key::Key;
use std::io;
use std::process::ExitCode;
pub use terminal::{RawMode, Terminal};
use tracing::{error, info, warn};
pub use viewport::{Position, Size, Viewport};

fn main() -> anyhow::Result<ExitCode> {
    let (config, config_failure) = Config::load();
    logging::init(&config.log);
    info!("txed {} starting", env!("CARGO_PKG_VERSION"));
    if let Some(reason) = config_failure {
        warn!("{reason}, using defaults");
    }

    let outcome = run(&config);
    if let Err(e) = Terminal::clear_screen() {
        error!("failed to clear screen: {e}");
    }

    match outcome {
        Ok(Exit::Quit) if config.session.quit_is_failure => {
            eprintln!("Exit Program");
            Ok(ExitCode::FAILURE)
        }
        Ok(Exit::Quit) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            error!("fatal: {e}");
            Err(e).context("editor session aborted")
        }
    }
}

/// Takes the config.
/// Runs one session with the terminal held in raw mode.
///
/// The terminal is restored before this returns, whatever the outcome.
fn run(config: &Config) -> Result<Exit, EditorError> {
    let mut raw_mode = RawMode::enable(config.input.read_timeout_ds())?;
    let exit = Editor::new(io::stdin(), io::stdout(), Terminal::size(), config)
        .and_then(|mut editor| editor.run());
    raw_mode.disable()?;
    exit
}
