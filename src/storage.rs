//! Whole-file JSON persistence for the task store.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::tasks::TaskManager;

/// Directory holding the store, created under the base directory on first
/// save.
pub const TASKR_DIR: &str = ".taskr";

/// Store file name inside [`TASKR_DIR`].
pub const TASK_FILE: &str = "tasks.json";

/// File-backed task store. Every load reads the whole file and every save
/// rewrites it; there is no partial update and no locking.
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    /// Store rooted at `<base_dir>/.taskr/tasks.json`.
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            dir: base_dir.as_ref().join(TASKR_DIR),
        }
    }

    pub fn file_path(&self) -> PathBuf {
        self.dir.join(TASK_FILE)
    }

    /// Load the whole store. A missing file is an empty task list.
    pub fn load(&self) -> Result<TaskManager> {
        let path = self.file_path();
        if !path.exists() {
            return Ok(TaskManager::new());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let manager = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(manager)
    }

    /// Overwrite the whole store, creating the directory on first use.
    pub fn save(&self, manager: &TaskManager) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create {}", self.dir.display()))?;
        let content = serde_json::to_string_pretty(manager)?;
        fs::write(self.file_path(), content)
            .with_context(|| format!("failed to write {}", self.file_path().display()))?;
        Ok(())
    }
}
