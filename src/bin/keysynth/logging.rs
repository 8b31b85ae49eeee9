//! Tracing setup. The terminal belongs to the UI, so logs go to a file.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use tracing_subscriber::EnvFilter;

const FILTER_ENV: &str = "KEYSYNTH_LOG";
const FILE_ENV: &str = "KEYSYNTH_LOG_FILE";

pub fn init() -> EyreResult<()> {
    let path = std::env::var_os(FILE_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("keysynth.log"));
    let file = File::create(&path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;

    let filter = EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| eyre!("failed to install tracing subscriber: {err}"))?;

    tracing::info!(log_file = %path.display(), "logging initialised");
    Ok(())
}
