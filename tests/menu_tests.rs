// Scripted sessions through the interactive menu.

mod common;

use std::io::Cursor;

use common::{sample_task, temp_taskr};
use taskr::Taskr;
use taskr::menu::App;

/// Run one scripted session against a store in `dir`, returning the output.
fn run_session(taskr: Taskr, script: &str) -> String {
    let mut output = Vec::new();
    let mut app = App::new(taskr, Cursor::new(script.to_string()), &mut output);
    app.run().unwrap();
    String::from_utf8(output).unwrap()
}

#[test]
fn add_then_list_then_exit() {
    let (taskr, dir) = temp_taskr();
    let script = "1\n\
                  Wash dishes\n\
                  Kitchen duty\n\
                  2\n\
                  2025-01-15\n\
                  home, chores\n\
                  5\n\
                  6\n";
    let output = run_session(taskr, script);

    assert!(output.contains("Welcome to Taskr!"));
    assert!(output.contains("Task added successfully!"));
    assert!(output.contains("Wash dishes - Kitchen duty"));
    assert!(output.contains("📅"));

    // the session wrote through to the file
    let reopened = Taskr::new(dir.path());
    let task = reopened.get_task("Wash dishes").unwrap();
    assert_eq!(task.priority(), 2);
    assert_eq!(task.tags, ["home", "chores"]);
}

#[test]
fn blank_due_date_and_tags_are_accepted() {
    let (taskr, dir) = temp_taskr();
    let script = "1\nQuick note\nNo frills\n3\n\n\n6\n";
    let output = run_session(taskr, script);
    assert!(output.contains("Task added successfully!"));

    let task = Taskr::new(dir.path()).get_task("Quick note").unwrap();
    assert!(task.task.due_date.is_none());
    assert!(task.tags.is_empty());
}

#[test]
fn invalid_priority_aborts_the_add() {
    let (taskr, dir) = temp_taskr();
    let script = "1\nBad entry\nwhatever\nhigh\n6\n";
    let output = run_session(taskr, script);
    assert!(output.contains("Invalid priority!"));
    assert!(Taskr::new(dir.path()).tasks().is_empty());
}

#[test]
fn invalid_date_aborts_the_add() {
    let (taskr, dir) = temp_taskr();
    let script = "1\nBad entry\nwhatever\n2\nnot-a-date\n6\n";
    let output = run_session(taskr, script);
    assert!(output.contains("Invalid date!"));
    assert!(Taskr::new(dir.path()).tasks().is_empty());
}

#[test]
fn unknown_names_print_not_found() {
    let (taskr, _dir) = temp_taskr();
    let script = "2\nghost\n3\nghost\n4\nghost\n6\n";
    let output = run_session(taskr, script);
    assert_eq!(output.matches("Task not found!").count(), 3);
}

#[test]
fn complete_and_remove_flow() {
    let (taskr, dir) = temp_taskr();
    taskr.add_task(sample_task("errand", 2));

    let script = "3\nerrand\n5\n2\nerrand\n5\n6\n";
    let output = run_session(taskr, script);
    assert!(output.contains("Task completed successfully!"));
    assert!(output.contains("[x]"));
    assert!(output.contains("Task removed successfully!"));
    assert!(output.contains("No tasks found!"));
    assert!(Taskr::new(dir.path()).tasks().is_empty());
}

#[test]
fn unknown_option_is_reported_and_the_loop_continues() {
    let (taskr, _dir) = temp_taskr();
    let output = run_session(taskr, "9\n6\n");
    assert!(output.contains("Invalid option!"));
}

#[test]
fn end_of_input_ends_the_session() {
    let (taskr, _dir) = temp_taskr();
    let output = run_session(taskr, "5\n");
    assert!(output.contains("No tasks found!"));
}
