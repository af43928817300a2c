use dirs::home_dir;
use std::{env, path::PathBuf};

const DEFAULT_DIR_NAME: &str = ".preview_core";
const SETTINGS_FILE: &str = "settings.json";

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::from_default_env().add_directive("preview_core=info".parse().unwrap());

    fmt().with_env_filter(filter).init();
}

/// Returns the application data directory, defaulting to `~/.preview_core`.
///
/// The `PREVIEW_CORE_HOME` environment variable overrides the location.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("PREVIEW_CORE_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Absolute path to the shared settings key-value file.
pub fn settings_file() -> PathBuf {
    app_data_dir().join(SETTINGS_FILE)
}
