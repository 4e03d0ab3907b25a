//! Path utilities for the simulator data directory

use std::path::PathBuf;
use std::sync::OnceLock;

/// Global storage for custom data directory path
static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Initialize the data directory with an optional custom path.
/// Must be called early in main() before any other path functions are used.
/// If custom_path is None, uses the default ~/.pipeline-sim location.
pub fn init_data_dir(custom_path: Option<PathBuf>) {
    let path = custom_path.unwrap_or_else(default_data_dir);
    if DATA_DIR.set(path.clone()).is_err() {
        let existing = DATA_DIR
            .get()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<unknown>".to_string());
        tracing::debug!(
            path = %path.display(),
            existing = %existing,
            "Data directory already initialized"
        );
    }
}

/// Get the default data directory path (~/.pipeline-sim)
fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".pipeline-sim"))
        .unwrap_or_else(|| PathBuf::from(".pipeline-sim"))
}

/// Get the base data directory.
/// Returns the custom path if set via init_data_dir(), otherwise ~/.pipeline-sim
pub fn data_dir() -> PathBuf {
    DATA_DIR.get().cloned().unwrap_or_else(default_data_dir)
}

/// Get the logs directory (~/.pipeline-sim/logs)
pub fn logs_dir() -> PathBuf {
    data_dir().join("logs")
}

/// Get the default log file path (~/.pipeline-sim/logs/pipeline-sim.log)
pub fn log_file_path() -> PathBuf {
    logs_dir().join("pipeline-sim.log")
}

/// Get the config file path (~/.pipeline-sim/config.toml)
pub fn config_path() -> PathBuf {
    data_dir().join("config.toml")
}

/// Get the default progress file path (~/.pipeline-sim/progress.json)
pub fn progress_path() -> PathBuf {
    data_dir().join("progress.json")
}
