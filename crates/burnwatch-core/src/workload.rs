//! Academic task collection: CRUD, prioritised views, and workload intensity.
//!
//! The overdue transition is re-evaluated against the clock on every pass
//! over the collection. Mutating passes write it back; read passes apply it
//! to the copies they hand out, so callers always see the status as of today.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Duration, NaiveDate};

use crate::error::{CoreError, Result};
use crate::model::{Priority, Task, TaskDraft, TaskStatus};
use crate::traits::{Clock, Entry, SystemClock};

/// Owns the collection of tasks.
pub struct WorkloadManager {
    tasks: Vec<Task>,
    clock: Arc<dyn Clock>,
}

impl Default for WorkloadManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for WorkloadManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkloadManager")
            .field("tasks", &self.tasks)
            .finish_non_exhaustive()
    }
}

/// Sort weight used for ordering; a task with no priority sorts last.
fn sort_weight(priority: Option<Priority>) -> u32 {
    priority.map(Priority::weight).unwrap_or(0)
}

/// High before Medium before Low, then earliest due date; undated last.
pub fn priority_then_due(a: &Task, b: &Task) -> Ordering {
    sort_weight(b.priority())
        .cmp(&sort_weight(a.priority()))
        .then_with(|| match (a.due_date(), b.due_date()) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}

/// Urgency bonus for a task due in `days` (negative when overdue).
fn urgency_bonus(days: i64) -> u32 {
    match days {
        d if d < 0 => 5,
        d if d <= 2 => 4,
        d if d <= 5 => 2,
        _ => 0,
    }
}

/// Keep the first task per id, in order. Returns the kept tasks and how
/// many duplicates were dropped.
pub fn dedup_by_id(tasks: Vec<Task>) -> (Vec<Task>, usize) {
    let mut seen = HashSet::new();
    let mut dropped = 0;
    let kept = tasks
        .into_iter()
        .filter(|t| {
            if seen.insert(t.entry_id().to_string()) {
                true
            } else {
                tracing::warn!(id = t.entry_id(), "dropping task with duplicate id");
                dropped += 1;
                false
            }
        })
        .collect();
    (kept, dropped)
}

impl WorkloadManager {
    /// A manager reading the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            tasks: Vec::new(),
            clock,
        }
    }

    fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    fn refresh(&mut self) {
        let today = self.today();
        for task in &mut self.tasks {
            if task.refresh_overdue(today) {
                tracing::debug!(id = task.entry_id(), "task is now overdue");
            }
        }
    }

    /// Copies of every task with today's status applied, unordered.
    fn snapshot(&self) -> Vec<Task> {
        let today = self.today();
        self.tasks
            .iter()
            .cloned()
            .map(|mut t| {
                t.refresh_overdue(today);
                t
            })
            .collect()
    }

    fn sorted(mut tasks: Vec<Task>) -> Vec<Task> {
        tasks.sort_by(priority_then_due);
        tasks
    }

    /// Add a task. Fails if a task with the same id is already present.
    pub fn add(&mut self, task: Task) -> Result<()> {
        if self.tasks.iter().any(|t| t.entry_id() == task.entry_id()) {
            return Err(CoreError::DuplicateId(task.entry_id().to_string()));
        }
        self.tasks.push(task);
        self.refresh();
        Ok(())
    }

    /// Replace the whole collection (load time). The first task with a given
    /// id wins; later ones are dropped and counted in the return value.
    pub fn replace_all(&mut self, tasks: Vec<Task>) -> usize {
        let (kept, dropped) = dedup_by_id(tasks);
        self.tasks = kept;
        self.refresh();
        dropped
    }

    /// Replace the notes of a task. Returns `false` when no such task exists.
    pub fn set_notes(&mut self, id: &str, notes: impl Into<String>) -> bool {
        let Some(existing) = self.tasks.iter_mut().find(|t| t.entry_id() == id) else {
            return false;
        };
        existing.set_notes(notes);
        true
    }

    /// Remove by id. Returns `false` when no such task exists.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.entry_id() != id);
        let removed = self.tasks.len() != before;
        if removed {
            self.refresh();
        }
        removed
    }

    /// Overwrite name, description, due date, priority and status of the
    /// task sharing `task`'s id. Returns `false` when no such task exists.
    pub fn update(&mut self, task: &Task) -> Result<bool> {
        self.update_fields(task.entry_id(), task.to_draft())
    }

    /// Same as [`update`](Self::update) but driven by an id and a draft.
    /// Notes are left untouched.
    pub fn update_fields(&mut self, id: &str, draft: TaskDraft) -> Result<bool> {
        let Some(existing) = self.tasks.iter_mut().find(|t| t.entry_id() == id) else {
            return Ok(false);
        };
        existing.set_task_name(draft.task_name)?;
        existing.set_description(draft.description);
        existing.set_due_date(draft.due_date);
        existing.set_priority(draft.priority);
        existing.set_status(draft.status);
        self.refresh();
        Ok(true)
    }

    /// Set only the status. Returns `false` when no such task exists.
    pub fn set_status(&mut self, id: &str, status: TaskStatus) -> bool {
        let Some(existing) = self.tasks.iter_mut().find(|t| t.entry_id() == id) else {
            return false;
        };
        existing.set_status(status);
        self.refresh();
        true
    }

    pub fn by_id(&self, id: &str) -> Option<Task> {
        let today = self.today();
        self.tasks
            .iter()
            .find(|t| t.entry_id() == id)
            .cloned()
            .map(|mut t| {
                t.refresh_overdue(today);
                t
            })
    }

    /// Every task in insertion order, as persisted.
    pub fn in_collection_order(&self) -> Vec<Task> {
        self.snapshot()
    }

    /// Every task, ordered by priority then due date.
    pub fn all(&self) -> Vec<Task> {
        Self::sorted(self.snapshot())
    }

    pub fn by_priority(&self, priority: Priority) -> Vec<Task> {
        Self::sorted(
            self.snapshot()
                .into_iter()
                .filter(|t| t.priority() == Some(priority))
                .collect(),
        )
    }

    pub fn by_status(&self, status: TaskStatus) -> Vec<Task> {
        Self::sorted(
            self.snapshot()
                .into_iter()
                .filter(|t| t.status() == status)
                .collect(),
        )
    }

    /// Unfinished tasks due within `[today, today + days]`. A look-ahead past
    /// the end of the calendar covers every later due date.
    pub fn upcoming(&self, days: i64) -> Vec<Task> {
        let today = self.today();
        let end = Duration::try_days(days)
            .and_then(|span| today.checked_add_signed(span))
            .unwrap_or(NaiveDate::MAX);
        Self::sorted(
            self.snapshot()
                .into_iter()
                .filter(|t| t.status() != TaskStatus::Completed)
                .filter(|t| t.due_date().is_some_and(|d| d >= today && d <= end))
                .collect(),
        )
    }

    /// Tasks in `Overdue` status as of today.
    pub fn overdue(&self) -> Vec<Task> {
        self.by_status(TaskStatus::Overdue)
    }

    /// Load score over unfinished tasks: 1 + priority weight + urgency bonus each.
    pub fn workload_intensity(&self) -> u32 {
        let today = self.today();
        self.tasks
            .iter()
            .filter(|t| t.status() != TaskStatus::Completed)
            .map(|t| {
                let base = 1 + t.priority().map(Priority::weight).unwrap_or(1);
                let urgency = t.days_until_due(today).map(urgency_bonus).unwrap_or(0);
                base + urgency
            })
            .sum()
    }

    /// Percentage of tasks completed; `0.0` with no tasks.
    pub fn completion_rate(&self) -> f64 {
        if self.tasks.is_empty() {
            return 0.0;
        }
        100.0 * self.completed_count() as f64 / self.tasks.len() as f64
    }

    pub fn total_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.status() == TaskStatus::Completed)
            .count()
    }

    /// Tasks not yet completed.
    pub fn pending_count(&self) -> usize {
        self.total_count() - self.completed_count()
    }
}
