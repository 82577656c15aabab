//! Interactive numbered menu over the task store.
//!
//! The loop is generic over its reader and writer so tests can script a
//! whole session through an in-memory buffer.

use std::io::{self, BufRead, Write};

use chrono::NaiveDate;

use crate::tasks::{ObsidianTask, Task};
use crate::{Taskr, TaskrStatus};

/// The interactive menu application.
pub struct App<R, W> {
    taskr: Taskr,
    input: R,
    output: W,
}

impl App<io::BufReader<io::Stdin>, io::Stdout> {
    /// Menu bound to stdin/stdout.
    pub fn standard(taskr: Taskr) -> Self {
        App::new(taskr, io::BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(taskr: Taskr, input: R, output: W) -> Self {
        Self {
            taskr,
            input,
            output,
        }
    }

    /// Run until the user exits or the input reaches end-of-file.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.present()?;
            let Some(option) = self.read_line()? else {
                break;
            };
            match option.trim() {
                "1" => self.add_task()?,
                "2" => self.remove_task()?,
                "3" => self.complete_task()?,
                "4" => self.uncomplete_task()?,
                "5" => self.list_tasks()?,
                "6" => break,
                _ => writeln!(self.output, "Invalid option!")?,
            }
        }
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        writeln!(self.output, "Welcome to Taskr! Please choose an option:")?;
        writeln!(self.output, "1. Add Task")?;
        writeln!(self.output, "2. Remove Task")?;
        writeln!(self.output, "3. Complete Task")?;
        writeln!(self.output, "4. Uncomplete Task")?;
        writeln!(self.output, "5. Get All Tasks")?;
        writeln!(self.output, "6. Exit")?;
        write!(self.output, "Option: ")?;
        self.output.flush()
    }

    /// Next input line without its terminator; `None` at end-of-file.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        self.read_line()
    }

    fn add_task(&mut self) -> io::Result<()> {
        let Some(name) = self.prompt("Name: ")? else {
            return Ok(());
        };
        let Some(description) = self.prompt("Description: ")? else {
            return Ok(());
        };
        let Some(priority_raw) = self.prompt("Priority (1-5): ")? else {
            return Ok(());
        };
        let Ok(priority) = priority_raw.trim().parse::<u8>() else {
            return writeln!(self.output, "Invalid priority!");
        };
        let Some(due_raw) = self.prompt("Due Date (YYYY-MM-DD, blank for none): ")? else {
            return Ok(());
        };
        let due_date = match due_raw.trim() {
            "" => None,
            text => match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(_) => return writeln!(self.output, "Invalid date! Use YYYY-MM-DD."),
            },
        };
        let Some(tags_raw) = self.prompt("Tags (separated by comma): ")? else {
            return Ok(());
        };
        let tags: Vec<String> = tags_raw
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(String::from)
            .collect();

        let task = ObsidianTask::new(
            Task::new(name.trim(), description.trim(), priority, due_date),
            tags,
        );
        let status = self.taskr.add_task(task);
        self.report(status, "Task added successfully!", "Error adding task!")
    }

    fn remove_task(&mut self) -> io::Result<()> {
        let Some(name) = self.prompt("Name: ")? else {
            return Ok(());
        };
        if self.taskr.get_task(name.trim()).is_none() {
            return writeln!(self.output, "Task not found!");
        }
        let status = self.taskr.remove_task(name.trim());
        self.report(status, "Task removed successfully!", "Error removing task!")
    }

    fn complete_task(&mut self) -> io::Result<()> {
        let Some(name) = self.prompt("Name: ")? else {
            return Ok(());
        };
        if self.taskr.get_task(name.trim()).is_none() {
            return writeln!(self.output, "Task not found!");
        }
        let status = self.taskr.complete_task(name.trim());
        self.report(
            status,
            "Task completed successfully!",
            "Error completing task!",
        )
    }

    fn uncomplete_task(&mut self) -> io::Result<()> {
        let Some(name) = self.prompt("Name: ")? else {
            return Ok(());
        };
        if self.taskr.get_task(name.trim()).is_none() {
            return writeln!(self.output, "Task not found!");
        }
        let status = self.taskr.uncomplete_task(name.trim());
        self.report(
            status,
            "Task uncompleted successfully!",
            "Error uncompleting task!",
        )
    }

    fn list_tasks(&mut self) -> io::Result<()> {
        let tasks = self.taskr.tasks();
        if tasks.is_empty() {
            return writeln!(self.output, "No tasks found!");
        }
        for task in tasks {
            writeln!(self.output, "{task}")?;
        }
        Ok(())
    }

    fn report(&mut self, status: TaskrStatus, success: &str, failure: &str) -> io::Result<()> {
        if status.is_success() {
            writeln!(self.output, "{success}")
        } else {
            writeln!(self.output, "{failure}")
        }
    }
}
