//! A session over one data directory.
//!
//! [`Journal`] loads everything on open, keeps the collections in memory, and
//! writes each change through to the [`DataStore`]. New records are appended;
//! edits and removals rewrite the affected file. When a write fails the
//! in-memory change stands and the error is returned to the caller.

use std::path::PathBuf;
use std::sync::Arc;

use crate::burnout::BurnoutAnalyzer;
use crate::error::{CoreError, Result};
use crate::model::{MoodLog, Task, TaskDraft, TaskStatus, User};
use crate::mood::MoodTracker;
use crate::storage::{DataStore, Loaded};
use crate::traits::{Clock, Entry};
use crate::workload::WorkloadManager;

/// What happened while loading a data directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub profile_loaded: bool,
    pub moods: usize,
    pub tasks: usize,
    /// Malformed mood and task lines, plus repeated task ids, that were skipped.
    pub skipped: usize,
    /// Files that could not be read at all; their collections start empty.
    pub failures: Vec<String>,
}

pub struct Journal {
    store: DataStore,
    profile: Option<User>,
    moods: MoodTracker,
    workload: WorkloadManager,
    clock: Arc<dyn Clock>,
}

impl Journal {
    /// Open `dir` (creating it if needed) and load every data file.
    ///
    /// Only failing to create the directory is an error. A profile or
    /// collection that cannot be loaded is logged, listed in the summary, and
    /// starts out absent or empty.
    pub fn open(dir: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Result<(Self, LoadSummary)> {
        let store = DataStore::open(dir)?;
        let mut failures = Vec::new();

        let profile = match store.load_user() {
            Ok(profile) => profile,
            Err(e @ CoreError::MalformedRecord { .. }) => {
                tracing::warn!("ignoring unreadable profile: {e}");
                None
            }
            Err(e) => {
                tracing::error!("failed to load profile: {e}");
                failures.push(e.to_string());
                None
            }
        };
        let moods = store.load_moods().unwrap_or_else(|e| {
            tracing::error!("failed to load mood logs: {e}");
            failures.push(e.to_string());
            Loaded::default()
        });
        let tasks = store.load_tasks().unwrap_or_else(|e| {
            tracing::error!("failed to load tasks: {e}");
            failures.push(e.to_string());
            Loaded::default()
        });

        let summary = LoadSummary {
            profile_loaded: profile.is_some(),
            moods: moods.records.len(),
            tasks: tasks.records.len(),
            skipped: moods.skipped + tasks.skipped,
            failures,
        };

        let mut tracker = MoodTracker::new();
        tracker.replace_all(moods.records);
        let mut workload = WorkloadManager::with_clock(Arc::clone(&clock));
        workload.replace_all(tasks.records);

        Ok((
            Self {
                store,
                profile,
                moods: tracker,
                workload,
                clock,
            },
            summary,
        ))
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    pub fn profile(&self) -> Option<&User> {
        self.profile.as_ref()
    }

    /// Replace the profile and save it.
    pub fn set_profile(&mut self, user: User) -> Result<()> {
        let user = self.profile.insert(user);
        self.store.save_user(user)
    }

    pub fn moods(&self) -> &MoodTracker {
        &self.moods
    }

    pub fn workload(&self) -> &WorkloadManager {
        &self.workload
    }

    /// Record a mood log now and append it to disk.
    pub fn log_mood(&mut self, mood: i64, stress: i64, notes: &str) -> Result<MoodLog> {
        let log = MoodLog::new(self.clock.now(), mood, stress, notes)?;
        self.moods.add(log.clone());
        self.store.append_mood(&log)?;
        Ok(log)
    }

    /// Create a task now and append it to disk. Returns the task as stored,
    /// with today's status applied.
    pub fn add_task(&mut self, draft: TaskDraft) -> Result<Task> {
        let task = Task::new(self.clock.now(), draft)?;
        let id = task.entry_id().to_string();
        self.workload.add(task.clone())?;
        let stored = self.workload.by_id(&id).unwrap_or(task);
        self.store.append_task(&stored)?;
        Ok(stored)
    }

    /// Overwrite the editable fields of a task. `Ok(false)` when the id is
    /// unknown.
    pub fn update_task(&mut self, id: &str, draft: TaskDraft) -> Result<bool> {
        if !self.workload.update_fields(id, draft)? {
            return Ok(false);
        }
        self.save_tasks()?;
        Ok(true)
    }

    pub fn set_task_status(&mut self, id: &str, status: TaskStatus) -> Result<bool> {
        if !self.workload.set_status(id, status) {
            return Ok(false);
        }
        self.save_tasks()?;
        Ok(true)
    }

    /// Replace a task's notes. `Ok(false)` when the id is unknown.
    pub fn set_task_notes(&mut self, id: &str, notes: &str) -> Result<bool> {
        if !self.workload.set_notes(id, notes) {
            return Ok(false);
        }
        self.save_tasks()?;
        Ok(true)
    }

    pub fn remove_task(&mut self, id: &str) -> Result<bool> {
        if !self.workload.remove(id) {
            return Ok(false);
        }
        self.save_tasks()?;
        Ok(true)
    }

    /// Rewrite every data file from memory.
    pub fn save_all(&self) -> Result<()> {
        if let Some(user) = &self.profile {
            self.store.save_user(user)?;
        }
        self.store.save_moods(&self.moods.all())?;
        self.save_tasks()
    }

    fn save_tasks(&self) -> Result<()> {
        self.store.save_tasks(&self.workload.in_collection_order())
    }

    /// Analyzer over this journal's moods and tasks.
    pub fn analyzer(&self) -> BurnoutAnalyzer<'_> {
        BurnoutAnalyzer::new(&self.moods, self.clock()).with_workload(&self.workload)
    }
}
