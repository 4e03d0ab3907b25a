//! Progress persistence backends

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use super::{ProgressError, ProgressState};

/// Where progress is loaded from and saved to
pub trait ProgressStore {
    fn load(&self) -> Result<ProgressState, ProgressError>;
    fn save(&self, state: &ProgressState) -> Result<(), ProgressError>;
    fn clear(&self) -> Result<(), ProgressError>;
}

/// JSON file store (~/.pipeline-sim/progress.json by default)
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressStore for JsonFileStore {
    /// Missing or corrupt files load as fresh progress
    fn load(&self) -> Result<ProgressState, ProgressError> {
        if !self.path.exists() {
            return Ok(ProgressState::default());
        }

        let contents = fs::read_to_string(&self.path)?;
        match serde_json::from_str(&contents) {
            Ok(state) => Ok(state),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Ignoring unreadable progress file"
                );
                Ok(ProgressState::default())
            }
        }
    }

    fn save(&self, state: &ProgressState) -> Result<(), ProgressError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), ProgressError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// Store that keeps progress for the lifetime of the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<Option<ProgressState>>,
}

impl MemoryStore {
    pub fn with_state(state: ProgressState) -> Self {
        Self {
            state: Mutex::new(Some(state)),
        }
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self) -> Result<ProgressState, ProgressError> {
        Ok(self.state.lock().clone().unwrap_or_default())
    }

    fn save(&self, state: &ProgressState) -> Result<(), ProgressError> {
        *self.state.lock() = Some(state.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), ProgressError> {
        *self.state.lock() = None;
        Ok(())
    }
}
