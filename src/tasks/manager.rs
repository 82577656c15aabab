//! The ordered task collection.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tasks::ObsidianTask;

/// An ordered collection of tasks, kept sorted by ascending priority after
/// every insertion.
///
/// Names are expected to be unique but this is not enforced; name lookups
/// return the first match. The mapping form is `{"tasks": [...]}`, and
/// deserialization feeds every loaded task back through [`add_task`] so a
/// hand-edited file comes back sorted.
///
/// [`add_task`]: TaskManager::add_task
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TaskList")]
pub struct TaskManager {
    tasks: Vec<ObsidianTask>,
}

/// Raw mapping form of the store document.
#[derive(Deserialize)]
struct TaskList {
    #[serde(default)]
    tasks: Vec<ObsidianTask>,
}

impl From<TaskList> for TaskManager {
    fn from(list: TaskList) -> Self {
        let mut manager = TaskManager::new();
        for task in list.tasks {
            manager.add_task(task);
        }
        manager
    }
}

impl TaskManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a task and restore the ascending-priority order. The sort is
    /// stable, so earlier insertions stay ahead at equal priority.
    pub fn add_task(&mut self, task: ObsidianTask) {
        self.tasks.push(task);
        self.tasks.sort_by_key(|task| task.task.priority);
    }

    /// Remove the first task with the given name and return it.
    pub fn remove_task(&mut self, name: &str) -> Option<ObsidianTask> {
        let index = self.tasks.iter().position(|task| task.task.name == name)?;
        Some(self.tasks.remove(index))
    }

    /// Mark the first task with the given name completed. Returns false if
    /// no task matches.
    pub fn complete_task(&mut self, name: &str) -> bool {
        self.set_completed(name, true)
    }

    /// Clear the completed flag on the first task with the given name.
    /// Returns false if no task matches.
    pub fn uncomplete_task(&mut self, name: &str) -> bool {
        self.set_completed(name, false)
    }

    fn set_completed(&mut self, name: &str, completed: bool) -> bool {
        match self.tasks.iter_mut().find(|task| task.task.name == name) {
            Some(task) => {
                task.task.completed = completed;
                true
            }
            None => false,
        }
    }

    /// First task with the given name, if any.
    pub fn get_task(&self, name: &str) -> Option<&ObsidianTask> {
        self.tasks.iter().find(|task| task.task.name == name)
    }

    pub fn tasks(&self) -> &[ObsidianTask] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl fmt::Display for TaskManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for task in &self.tasks {
            writeln!(f, "{task}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::Task;

    fn task(name: &str, priority: u8) -> ObsidianTask {
        ObsidianTask::from(Task::new(name, "", priority, None))
    }

    #[test]
    fn insertion_keeps_ascending_priority_order() {
        let mut manager = TaskManager::new();
        manager.add_task(task("low", 4));
        manager.add_task(task("urgent", 1));
        manager.add_task(task("middle", 3));
        let names: Vec<&str> = manager.tasks().iter().map(|t| t.name()).collect();
        assert_eq!(names, ["urgent", "middle", "low"]);
    }

    #[test]
    fn equal_priorities_keep_insertion_order() {
        let mut manager = TaskManager::new();
        manager.add_task(task("first", 2));
        manager.add_task(task("second", 2));
        let names: Vec<&str> = manager.tasks().iter().map(|t| t.name()).collect();
        assert_eq!(names, ["first", "second"]);
    }

    #[test]
    fn name_lookups_return_the_first_match() {
        let mut manager = TaskManager::new();
        manager.add_task(task("dup", 2));
        manager.add_task(task("dup", 1));
        assert_eq!(manager.get_task("dup").unwrap().priority(), 1);
        assert!(manager.get_task("missing").is_none());
    }

    #[test]
    fn completion_toggles_round_trip() {
        let mut manager = TaskManager::new();
        manager.add_task(task("chore", 3));
        assert!(manager.complete_task("chore"));
        assert!(manager.get_task("chore").unwrap().task.completed);
        assert!(manager.uncomplete_task("chore"));
        assert!(!manager.get_task("chore").unwrap().task.completed);
        assert!(!manager.complete_task("missing"));
    }

    #[test]
    fn deserialization_restores_the_sort_order() {
        let raw = r#"{"tasks":[
            {"name":"b","description":"","priority":5,"completed":false},
            {"name":"a","description":"","priority":1,"completed":false}
        ]}"#;
        let manager: TaskManager = serde_json::from_str(raw).unwrap();
        assert_eq!(manager.tasks()[0].name(), "a");
    }
}
