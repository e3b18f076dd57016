//! Core trait definitions.
//!
//! [`Entry`] is the capability shared by every persisted record kind, and
//! [`Clock`] is the seam through which all "what time is it" questions flow,
//! so the overdue transition and the trailing burnout window can be pinned
//! in tests.

use chrono::{Local, NaiveDate, NaiveDateTime};

// ---------------------------------------------------------------------------
// Entry capability
// ---------------------------------------------------------------------------

/// The literal tag written into the second field of a persisted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Mood,
    Task,
}

impl EntryKind {
    /// On-disk tag for this kind.
    pub fn tag(self) -> &'static str {
        match self {
            EntryKind::Mood => "MOOD",
            EntryKind::Task => "TASK",
        }
    }
}

/// Identity and timestamp shared by mood logs and tasks.
///
/// Ids are unique only within their own collection; a mood log and a task
/// may carry the same id.
pub trait Entry {
    /// Opaque identifier, fixed at creation.
    fn entry_id(&self) -> &str;

    /// When the entry was created or logged.
    fn timestamp(&self) -> NaiveDateTime;

    /// Free-text notes, possibly empty.
    fn notes(&self) -> &str;

    /// Which record kind this is.
    fn kind(&self) -> EntryKind;
}

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Source of the current local instant.
pub trait Clock: Send + Sync {
    /// The current local date-time.
    fn now(&self) -> NaiveDateTime;

    /// The current local calendar date.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Reads the operating system's local time on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    /// Freeze at noon on the given date.
    pub fn at_noon(date: NaiveDate) -> Self {
        FixedClock(date.and_hms_opt(12, 0, 0).unwrap_or_default())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
