//! Core data model types for burnwatch.
//!
//! Three record kinds are persisted: the [`User`] profile, [`MoodLog`]
//! entries, and academic [`Task`]s. Mood logs and tasks share the
//! [`Entry`] capability (id, timestamp, notes) without sharing any state.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, ValidationError};
use crate::traits::{Entry, EntryKind};

/// Lowest accepted mood or stress level.
pub const SCALE_MIN: u8 = 1;
/// Highest accepted mood or stress level.
pub const SCALE_MAX: u8 = 10;

/// Generate a fresh entry id: eight uppercase hex characters.
pub fn generate_entry_id() -> String {
    let simple = Uuid::new_v4().simple().to_string();
    simple[..8].to_uppercase()
}

fn check_scale(field: &'static str, value: i64) -> std::result::Result<u8, ValidationError> {
    if (SCALE_MIN as i64..=SCALE_MAX as i64).contains(&value) {
        Ok(value as u8)
    } else {
        Err(ValidationError::ValueOutOfRange {
            field,
            value,
            min: SCALE_MIN as i64,
            max: SCALE_MAX as i64,
        })
    }
}

fn check_required(field: &'static str, value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::EmptyField(field))
    } else {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MoodLog
// ---------------------------------------------------------------------------

/// A self-reported mood and stress reading.
///
/// Both levels are always within `1..=10`; the constructor is the only way
/// in and there are no setters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodLog {
    entry_id: String,
    timestamp: NaiveDateTime,
    mood_level: u8,
    stress_level: u8,
    notes: String,
}

impl MoodLog {
    /// Create a new log with a freshly generated id.
    pub fn new(
        timestamp: NaiveDateTime,
        mood_level: i64,
        stress_level: i64,
        notes: impl Into<String>,
    ) -> Result<Self> {
        Self::from_parts(generate_entry_id(), timestamp, mood_level, stress_level, notes)
    }

    /// Rebuild a log with a known id (used when loading from disk).
    pub fn from_parts(
        entry_id: impl Into<String>,
        timestamp: NaiveDateTime,
        mood_level: i64,
        stress_level: i64,
        notes: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            entry_id: entry_id.into(),
            timestamp,
            mood_level: check_scale("mood level", mood_level)?,
            stress_level: check_scale("stress level", stress_level)?,
            notes: notes.into(),
        })
    }

    pub fn mood_level(&self) -> u8 {
        self.mood_level
    }

    pub fn stress_level(&self) -> u8 {
        self.stress_level
    }
}

impl Entry for MoodLog {
    fn entry_id(&self) -> &str {
        &self.entry_id
    }

    fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    fn notes(&self) -> &str {
        &self.notes
    }

    fn kind(&self) -> EntryKind {
        EntryKind::Mood
    }
}

// ---------------------------------------------------------------------------
// Task
// ---------------------------------------------------------------------------

/// Task priority. Weights drive both ordering and workload intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// High=3, Medium=2, Low=1.
    pub fn weight(self) -> u32 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "High"),
            Priority::Medium => write!(f, "Medium"),
            Priority::Low => write!(f, "Low"),
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Overdue,
    /// Standing item that is never promoted to overdue.
    Checklist,
}

impl TaskStatus {
    /// Whether the overdue transition may touch a task in this state.
    fn can_become_overdue(self) -> bool {
        !matches!(
            self,
            TaskStatus::Completed | TaskStatus::Overdue | TaskStatus::Checklist
        )
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "Pending"),
            TaskStatus::InProgress => write!(f, "In Progress"),
            TaskStatus::Completed => write!(f, "Completed"),
            TaskStatus::Overdue => write!(f, "Overdue"),
            TaskStatus::Checklist => write!(f, "Checklist"),
        }
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "in progress" | "in-progress" | "in_progress" => Ok(TaskStatus::InProgress),
            "completed" | "done" => Ok(TaskStatus::Completed),
            "overdue" => Ok(TaskStatus::Overdue),
            "checklist" => Ok(TaskStatus::Checklist),
            other => Err(format!("unknown status: {other}")),
        }
    }
}

/// An academic task or workload item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    entry_id: String,
    timestamp: NaiveDateTime,
    task_name: String,
    description: String,
    due_date: Option<NaiveDate>,
    priority: Option<Priority>,
    status: TaskStatus,
    notes: String,
}

/// The mutable fields of a task, as supplied by a caller creating or
/// editing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub task_name: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
    pub status: TaskStatus,
    pub notes: String,
}

impl TaskDraft {
    /// A pending task with just a name.
    pub fn named(task_name: impl Into<String>) -> Self {
        Self {
            task_name: task_name.into(),
            description: String::new(),
            due_date: None,
            priority: None,
            status: TaskStatus::Pending,
            notes: String::new(),
        }
    }

    pub fn due(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

impl Task {
    /// Create a task with a freshly generated id. The name must be non-empty.
    pub fn new(created: NaiveDateTime, draft: TaskDraft) -> Result<Self> {
        Self::from_parts(generate_entry_id(), created, draft)
    }

    /// Rebuild a task with a known id.
    pub fn from_parts(
        entry_id: impl Into<String>,
        created: NaiveDateTime,
        draft: TaskDraft,
    ) -> Result<Self> {
        check_required("task name", &draft.task_name)?;
        Ok(Self {
            entry_id: entry_id.into(),
            timestamp: created,
            task_name: draft.task_name,
            description: draft.description,
            due_date: draft.due_date,
            priority: draft.priority,
            status: draft.status,
            notes: draft.notes,
        })
    }

    pub fn task_name(&self) -> &str {
        &self.task_name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    pub fn priority(&self) -> Option<Priority> {
        self.priority
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn set_task_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        check_required("task name", &name)?;
        self.task_name = name;
        Ok(())
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_due_date(&mut self, due_date: Option<NaiveDate>) {
        self.due_date = due_date;
    }

    pub fn set_priority(&mut self, priority: Option<Priority>) {
        self.priority = priority;
    }

    pub fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    /// The caller-editable fields of this task.
    pub fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            task_name: self.task_name.clone(),
            description: self.description.clone(),
            due_date: self.due_date,
            priority: self.priority,
            status: self.status,
            notes: self.notes.clone(),
        }
    }

    /// Promote to `Overdue` if past due on `today`. Returns whether the
    /// status changed. Never reverts an overdue task.
    pub fn refresh_overdue(&mut self, today: NaiveDate) -> bool {
        match self.due_date {
            Some(due) if due < today && self.status.can_become_overdue() => {
                self.status = TaskStatus::Overdue;
                true
            }
            _ => false,
        }
    }

    /// Whole days from `today` until the due date; negative when past due.
    pub fn days_until_due(&self, today: NaiveDate) -> Option<i64> {
        self.due_date.map(|due| (due - today).num_days())
    }
}

impl Entry for Task {
    fn entry_id(&self) -> &str {
        &self.entry_id
    }

    fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    fn notes(&self) -> &str {
        &self.notes
    }

    fn kind(&self) -> EntryKind {
        EntryKind::Task
    }
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// The single student profile of an installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    student_id: String,
    full_name: String,
    email: String,
    age: u32,
    course: String,
}

impl User {
    /// Build a profile. Student id and full name are required, age must be positive.
    pub fn new(
        student_id: impl Into<String>,
        full_name: impl Into<String>,
        email: impl Into<String>,
        age: i64,
        course: impl Into<String>,
    ) -> Result<Self> {
        let student_id = student_id.into();
        let full_name = full_name.into();
        check_required("student id", &student_id)?;
        check_required("full name", &full_name)?;
        if age <= 0 {
            return Err(ValidationError::NonPositiveAge(age).into());
        }
        let age = u32::try_from(age).map_err(|_| ValidationError::ValueOutOfRange {
            field: "age",
            value: age,
            min: 1,
            max: u32::MAX as i64,
        })?;
        Ok(Self {
            student_id,
            full_name,
            email: email.into(),
            age,
            course: course.into(),
        })
    }

    pub fn student_id(&self) -> &str {
        &self.student_id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn course(&self) -> &str {
        &self.course
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_course(&mut self, course: impl Into<String>) {
        self.course = course.into();
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}), {}, age {}, {}",
            self.full_name, self.student_id, self.email, self.age, self.course
        )
    }
}
