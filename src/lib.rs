//! Taskr Library
//!
//! A personal task list with whole-file JSON persistence, bundled with a
//! small astral toolkit that computes planetary hours and zodiacal
//! positions for a given date.
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **Facade Layer**: [`Taskr`] - one load→mutate→save cycle per operation,
//!   surfacing coarse [`TaskrStatus`] outcomes to the interactive caller
//! - **Domain Layer**: `tasks` and `astral` modules - task records and the
//!   planetary-hour / zodiac computations
//! - **Persistence Layer**: `storage` module - whole-file JSON storage under
//!   `.taskr/tasks.json`
//!
//! # Example
//!
//! ```no_run
//! use taskr::{ObsidianTask, Task, Taskr};
//!
//! let taskr = Taskr::new(".");
//! let task = ObsidianTask::from(Task::new("water plants", "balcony first", 2, None));
//! let _status = taskr.add_task(task);
//! ```

pub mod astral;
pub mod geo;
pub mod menu;
pub mod report;
pub mod storable;
pub mod storage;
pub mod tasks;
pub mod timing;

use std::path::Path;

use anyhow::{Result, anyhow};

// Re-export commonly used types
pub use astral::{
    AstralError, Planet, PlanetaryDay, PlanetaryHour, ZodiacSign, ZodiacalPosition,
    planetary_hours, which_sign,
};
pub use storable::Storable;
pub use storage::Storage;
pub use tasks::{ObsidianTask, Task, TaskManager};
pub use timing::{Duration, Timing, TimingError};

/// Coarse outcome of a store operation, surfaced to the interactive caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskrStatus {
    Success,
    Failure,
}

impl TaskrStatus {
    pub fn is_success(self) -> bool {
        self == TaskrStatus::Success
    }
}

/// Facade over the task store.
///
/// Every mutating call loads the whole store, applies one change, and
/// writes the whole store back. File-system and parse failures are logged
/// and collapsed into [`TaskrStatus::Failure`]; read paths degrade to empty
/// results the same way. Two concurrent writers can clobber each other -
/// there is no locking.
pub struct Taskr {
    storage: Storage,
}

impl Taskr {
    /// Store rooted at `<base_dir>/.taskr/tasks.json`, created on first use.
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            storage: Storage::new(base_dir),
        }
    }

    pub fn add_task(&self, task: ObsidianTask) -> TaskrStatus {
        self.mutate("add task", |manager| {
            manager.add_task(task);
            Ok(())
        })
    }

    pub fn remove_task(&self, name: &str) -> TaskrStatus {
        self.mutate("remove task", |manager| {
            manager
                .remove_task(name)
                .map(|_| ())
                .ok_or_else(|| anyhow!("no task named '{name}'"))
        })
    }

    pub fn complete_task(&self, name: &str) -> TaskrStatus {
        self.mutate("complete task", |manager| {
            manager
                .complete_task(name)
                .then_some(())
                .ok_or_else(|| anyhow!("no task named '{name}'"))
        })
    }

    pub fn uncomplete_task(&self, name: &str) -> TaskrStatus {
        self.mutate("uncomplete task", |manager| {
            manager
                .uncomplete_task(name)
                .then_some(())
                .ok_or_else(|| anyhow!("no task named '{name}'"))
        })
    }

    /// All tasks in priority order. Load failures degrade to an empty list
    /// with the error logged.
    pub fn tasks(&self) -> Vec<ObsidianTask> {
        match self.storage.load() {
            Ok(manager) => manager.tasks().to_vec(),
            Err(error) => {
                log::error!("failed to load tasks: {error:#}");
                Vec::new()
            }
        }
    }

    /// First task with the given name, if any.
    pub fn get_task(&self, name: &str) -> Option<ObsidianTask> {
        self.tasks()
            .into_iter()
            .find(|task| task.task.name == name)
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    fn mutate(
        &self,
        action: &str,
        change: impl FnOnce(&mut TaskManager) -> Result<()>,
    ) -> TaskrStatus {
        let outcome = self.storage.load().and_then(|mut manager| {
            change(&mut manager)?;
            self.storage.save(&manager)
        });
        match outcome {
            Ok(()) => TaskrStatus::Success,
            Err(error) => {
                log::error!("failed to {action}: {error:#}");
                TaskrStatus::Failure
            }
        }
    }
}
