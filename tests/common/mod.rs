//! Common test utilities for integration tests.

use chrono::{NaiveDate, NaiveDateTime};
use taskr::Taskr;
use taskr::tasks::{ObsidianTask, Task};
use tempfile::TempDir;

/// Create a task store rooted in a fresh temporary directory.
pub fn temp_taskr() -> (Taskr, TempDir) {
    let dir = TempDir::new().unwrap();
    (Taskr::new(dir.path()), dir)
}

/// Minimal task with the given name and priority.
pub fn sample_task(name: &str, priority: u8) -> ObsidianTask {
    ObsidianTask::from(Task::new(
        name,
        format!("{name} description"),
        priority,
        None,
    ))
}

pub fn timestamp(text: &str) -> NaiveDateTime {
    text.parse().unwrap()
}

pub fn date(text: &str) -> NaiveDate {
    text.parse().unwrap()
}
