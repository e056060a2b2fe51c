//! Task management commands for CLI.

use clap::Subcommand;
use pomojournal_core::task::split_lines;
use pomojournal_core::{Store, TaskFilter, TaskRepository};

use super::{report, CmdResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add tasks, one per non-blank line
    Add {
        /// Task text; each line becomes a task
        text: Vec<String>,
    },
    /// List tasks
    List {
        /// all, active or completed
        #[arg(long, default_value = "all")]
        filter: TaskFilter,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Flip a task between active and completed
    Toggle {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
    /// Delete every completed task
    ClearCompleted,
}

pub fn run(action: TaskAction) -> CmdResult {
    let mut repo = TaskRepository::open(Store::open_default()?);

    match action {
        TaskAction::Add { text } => {
            let joined = text.join("\n");
            let created = report(repo.create_batch(split_lines(&joined))?);
            println!("Added {} task(s)", created.len());
            for task in &created {
                println!("{}  {}", task.id, task.text);
            }
        }
        TaskAction::List { filter, json } => {
            let tasks = repo.list(filter);
            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else {
                if tasks.is_empty() {
                    println!("No tasks");
                }
                for task in tasks {
                    let mark = if task.completed { "x" } else { " " };
                    println!("[{mark}] {}  {}", task.id, task.text);
                }
                let remaining = repo.remaining();
                println!(
                    "{remaining} task{} remaining",
                    if remaining == 1 { "" } else { "s" }
                );
            }
        }
        TaskAction::Toggle { id } => match report(repo.toggle_completed(&id)) {
            Some(true) => println!("Task completed: {id}"),
            Some(false) => println!("Task reopened: {id}"),
            None => println!("Task not found: {id}"),
        },
        TaskAction::Delete { id } => {
            if repo.get(&id).is_none() {
                println!("Task not found: {id}");
            } else {
                report(repo.delete(&id));
                println!("Task deleted: {id}");
            }
        }
        TaskAction::ClearCompleted => {
            let removed = report(repo.clear_completed());
            println!("Cleared {removed} completed task(s)");
        }
    }
    Ok(())
}
