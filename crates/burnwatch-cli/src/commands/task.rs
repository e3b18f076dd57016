//! The `burnwatch task` command.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{Cell, Table};

use burnwatch_core::{Entry, Priority, Task, TaskDraft, TaskStatus};

use super::open_journal;
use crate::config::BurnwatchConfig;
use crate::TaskAction;

fn parse_due(s: &str) -> Result<NaiveDate> {
    s.parse::<NaiveDate>()
        .with_context(|| format!("invalid due date '{s}', expected YYYY-MM-DD"))
}

fn parse_priority(s: &str) -> Result<Priority> {
    s.parse::<Priority>().map_err(anyhow::Error::msg)
}

fn parse_status(s: &str) -> Result<TaskStatus> {
    s.parse::<TaskStatus>().map_err(anyhow::Error::msg)
}

/// `None` for an absent flag, `Some(None)` for an explicit "none".
fn parse_clearable<T>(
    value: Option<String>,
    parse: fn(&str) -> Result<T>,
) -> Result<Option<Option<T>>> {
    match value.as_deref() {
        None => Ok(None),
        Some(s) if s.eq_ignore_ascii_case("none") || s.is_empty() => Ok(Some(None)),
        Some(s) => parse(s).map(|v| Some(Some(v))),
    }
}

pub fn execute(config: &BurnwatchConfig, action: TaskAction) -> Result<()> {
    let mut journal = open_journal(config)?;

    match action {
        TaskAction::Add {
            name,
            description,
            due,
            priority,
            notes,
        } => {
            let mut draft = TaskDraft::named(name).description(description).notes(notes);
            if let Some(due) = due.as_deref() {
                draft = draft.due(parse_due(due)?);
            }
            if let Some(priority) = priority.as_deref() {
                draft = draft.priority(parse_priority(priority)?);
            }
            let task = journal.add_task(draft).context("failed to add task")?;
            println!("Added task {} ({})", task.task_name(), task.entry_id());
        }
        TaskAction::List {
            status,
            priority,
            upcoming,
        } => {
            let status = status.as_deref().map(parse_status).transpose()?;
            let priority = priority.as_deref().map(parse_priority).transpose()?;
            let workload = journal.workload();
            let tasks: Vec<Task> = if upcoming {
                workload.upcoming(config.upcoming_days)
            } else {
                workload.all()
            }
            .into_iter()
            .filter(|t| status.map_or(true, |s| t.status() == s))
            .filter(|t| priority.map_or(true, |p| t.priority() == Some(p)))
            .collect();

            if tasks.is_empty() {
                println!("No tasks found.");
            } else {
                println!("{}", task_table(&tasks));
            }
            println!(
                "{} total, {} completed ({:.1}%), {} overdue",
                workload.total_count(),
                workload.completed_count(),
                workload.completion_rate(),
                workload.overdue().len()
            );
        }
        TaskAction::Update {
            id,
            name,
            description,
            due,
            priority,
            status,
            notes,
        } => {
            let Some(existing) = journal.workload().by_id(&id) else {
                anyhow::bail!("no task with id {id}");
            };
            let mut draft = existing.to_draft();
            if let Some(name) = name {
                draft.task_name = name;
            }
            if let Some(description) = description {
                draft.description = description;
            }
            if let Some(due) = parse_clearable(due, parse_due)? {
                draft.due_date = due;
            }
            if let Some(priority) = parse_clearable(priority, parse_priority)? {
                draft.priority = priority;
            }
            if let Some(status) = status.as_deref() {
                draft.status = parse_status(status)?;
            }
            journal
                .update_task(&id, draft)
                .context("failed to update task")?;
            if let Some(notes) = notes {
                journal
                    .set_task_notes(&id, &notes)
                    .context("failed to update task")?;
            }
            println!("Updated task {id}");
        }
        TaskAction::Done { id } => {
            if !journal
                .set_task_status(&id, TaskStatus::Completed)
                .context("failed to update task")?
            {
                anyhow::bail!("no task with id {id}");
            }
            println!("Marked task {id} completed");
        }
        TaskAction::Remove { id } => {
            if !journal.remove_task(&id).context("failed to remove task")? {
                anyhow::bail!("no task with id {id}");
            }
            println!("Removed task {id}");
        }
    }

    Ok(())
}

fn task_table(tasks: &[Task]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Task", "Due", "Priority", "Status"]);
    for task in tasks {
        table.add_row(vec![
            Cell::new(task.entry_id()),
            Cell::new(task.task_name()),
            Cell::new(
                task.due_date()
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".into()),
            ),
            Cell::new(
                task.priority()
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "-".into()),
            ),
            Cell::new(task.status()),
        ]);
    }
    table
}
