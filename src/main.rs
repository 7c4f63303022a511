//! Translates stdin line by line with the workspace's translations file.
//!
//! Usage: `locale-table [WORKSPACE]`. Requested lines are merged into the
//! translations file on exit unless `regenerateOnExit` is false.

use std::io::{
    self,
    BufRead,
    Write,
};
use std::path::PathBuf;
use std::process::ExitCode;

use locale_table::config::ConfigManager;
use locale_table::{
    SharedTranslator,
    Translated,
};
use tracing_subscriber::EnvFilter;

/// Installs logging and runs the translator.
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Translates stdin to stdout, then regenerates the translations file.
fn run() -> Result<(), Box<dyn std::error::Error>> {
    let workspace_root = match std::env::args_os().nth(1) {
        Some(root) => PathBuf::from(root),
        None => std::env::current_dir()?,
    };

    let mut config_manager = ConfigManager::new();
    config_manager.load_settings(workspace_root)?;
    let translations_path = config_manager.translations_path();
    let translator = SharedTranslator::new(config_manager.open_store());
    tracing::info!(
        path = %translations_path.display(),
        locale = ?translator.current_locale(),
        available = ?translator.available_locales(),
        "Translator ready"
    );

    let mut stdout = io::stdout().lock();
    for line in io::stdin().lock().lines() {
        let line = line?;
        writeln!(stdout, "{}", line.translated(&translator))?;
    }
    stdout.flush()?;

    if config_manager.get_settings().regenerate_on_exit {
        translator.regenerate_file()?;
    }
    Ok(())
}
