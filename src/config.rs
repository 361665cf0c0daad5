use std::path::{Path, PathBuf};

pub const DEFAULT_TASKS_FILE: &str = "tasks.json";

/// Where a `TaskStore` keeps its tasks. Each store owns its own path, so
/// several stores can live side by side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TASKS_FILE)
    }
}
