//! Task records: the plain list entry and its Obsidian-flavored variant.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single entry on the task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    pub description: String,
    pub priority: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
}

impl Task {
    /// A fresh, uncompleted task.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        priority: u8,
        due_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            priority,
            due_date,
            completed: false,
        }
    }

    fn checkbox(&self) -> &'static str {
        if self.completed { "[x]" } else { "[ ]" }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            " - {} {} - {} - {}",
            self.checkbox(),
            self.name,
            self.description,
            self.priority
        )?;
        if let Some(due) = self.due_date {
            write!(f, " - {due}")?;
        }
        Ok(())
    }
}

/// Priority glyphs used by the Obsidian tasks plugin, lowest (1) to
/// highest (5).
fn priority_glyph(priority: u8) -> Option<&'static str> {
    match priority {
        1 => Some("⏬"),
        2 => Some("🔽"),
        3 => Some("🔼"),
        4 => Some("⏫"),
        5 => Some("🔺"),
        _ => None,
    }
}

/// Marker appended after a due date in Obsidian task lines.
const DUE_GLYPH: &str = "📅";

/// A task rendered for an Obsidian vault: adds tags and glyph-based
/// priority display. The mapping form flattens into the plain task fields
/// plus an optional `tags` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObsidianTask {
    #[serde(flatten)]
    pub task: Task,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl ObsidianTask {
    pub fn new(task: Task, tags: Vec<String>) -> Self {
        Self { task, tags }
    }

    pub fn name(&self) -> &str {
        &self.task.name
    }

    pub fn priority(&self) -> u8 {
        self.task.priority
    }
}

impl From<Task> for ObsidianTask {
    fn from(task: Task) -> Self {
        Self {
            task,
            tags: Vec::new(),
        }
    }
}

impl fmt::Display for ObsidianTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " - {} ", self.task.checkbox())?;
        match priority_glyph(self.task.priority) {
            Some(glyph) => write!(f, "{glyph} ")?,
            None => write!(f, "{} ", self.task.priority)?,
        }
        write!(f, "{} - {}", self.task.name, self.task.description)?;
        if let Some(due) = self.task.due_date {
            write!(f, " - {due} {DUE_GLYPH}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_task_renders_as_a_checklist_line() {
        let mut task = Task::new("water plants", "balcony first", 3, None);
        assert_eq!(task.to_string(), " - [ ] water plants - balcony first - 3");
        task.completed = true;
        assert!(task.to_string().starts_with(" - [x]"));
    }

    #[test]
    fn obsidian_task_uses_glyphs_in_range() {
        let date = "2025-01-15".parse().unwrap();
        let task = ObsidianTask::from(Task::new("pay rent", "wire it", 5, Some(date)));
        assert_eq!(task.to_string(), " - [ ] 🔺 pay rent - wire it - 2025-01-15 📅");
    }

    #[test]
    fn obsidian_task_falls_back_to_the_number() {
        let task = ObsidianTask::from(Task::new("odd one", "priority out of range", 9, None));
        assert_eq!(task.to_string(), " - [ ] 9 odd one - priority out of range");
    }

    #[test]
    fn tags_are_omitted_from_the_mapping_when_empty() {
        let task = ObsidianTask::from(Task::new("water plants", "balcony first", 3, None));
        let value = serde_json::to_value(&task).unwrap();
        assert!(value.get("tags").is_none());
        assert_eq!(value["name"], "water plants");
    }
}
