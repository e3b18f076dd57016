//! Line-oriented codec for persisted records.
//!
//! One record per line, fields separated by `|`:
//!
//! ```text
//! studentId|fullName|email|age|course
//! entryId|MOOD|isoTimestamp|moodLevel|stressLevel|notes
//! entryId|TASK|isoTimestamp|taskName|description|dueDate|priority|status|notes
//! ```
//!
//! Free-text fields escape a literal `|` as `&#124;` and a newline as the two
//! characters `\n`. Timestamps are ISO 8601 local date-times; due dates are
//! ISO dates. A missing due date or priority is an empty field.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{CoreError, Result};
use crate::model::{MoodLog, Task, TaskDraft, User};
use crate::traits::{Entry, EntryKind};

const SEPARATOR: char = '|';
const ESCAPED_SEPARATOR: &str = "&#124;";
const ESCAPED_NEWLINE: &str = "\\n";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

const USER_FIELDS: usize = 5;
const MOOD_FIELDS: usize = 6;
const TASK_FIELDS: usize = 9;

/// Escape a free-text field for a single-line record.
pub fn escape_field(s: &str) -> String {
    s.replace(SEPARATOR, ESCAPED_SEPARATOR)
        .replace('\n', ESCAPED_NEWLINE)
}

/// Reverse [`escape_field`].
pub fn unescape_field(s: &str) -> String {
    s.replace(ESCAPED_SEPARATOR, "|").replace(ESCAPED_NEWLINE, "\n")
}

fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

fn parse_timestamp(kind: &'static str, s: &str) -> Result<NaiveDateTime> {
    s.parse::<NaiveDateTime>()
        .map_err(|e| CoreError::malformed(kind, format!("bad timestamp '{s}': {e}")))
}

fn parse_int(kind: &'static str, field: &str, s: &str) -> Result<i64> {
    s.trim()
        .parse::<i64>()
        .map_err(|_| CoreError::malformed(kind, format!("{field} is not an integer: '{s}'")))
}

fn split_fields<'a>(kind: &'static str, line: &'a str, expected: usize) -> Result<Vec<&'a str>> {
    let parts: Vec<&str> = line.split(SEPARATOR).collect();
    if parts.len() != expected {
        return Err(CoreError::malformed(
            kind,
            format!("expected {expected} fields, got {}", parts.len()),
        ));
    }
    Ok(parts)
}

fn expect_tag(kind: &'static str, found: &str, expected: EntryKind) -> Result<()> {
    if found != expected.tag() {
        return Err(CoreError::malformed(
            kind,
            format!("expected tag {}, got '{found}'", expected.tag()),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

pub fn encode_user(user: &User) -> String {
    format!(
        "{}|{}|{}|{}|{}",
        escape_field(user.student_id()),
        escape_field(user.full_name()),
        escape_field(user.email()),
        user.age(),
        escape_field(user.course()),
    )
}

pub fn decode_user(line: &str) -> Result<User> {
    const KIND: &str = "user";
    let parts = split_fields(KIND, line, USER_FIELDS)?;
    let age = parse_int(KIND, "age", parts[3])?;
    User::new(
        unescape_field(parts[0]),
        unescape_field(parts[1]),
        unescape_field(parts[2]),
        age,
        unescape_field(parts[4]),
    )
    .map_err(|e| CoreError::malformed(KIND, e.to_string()))
}

// ---------------------------------------------------------------------------
// MoodLog
// ---------------------------------------------------------------------------

pub fn encode_mood(log: &MoodLog) -> String {
    format!(
        "{}|{}|{}|{}|{}|{}",
        log.entry_id(),
        EntryKind::Mood.tag(),
        format_timestamp(log.timestamp()),
        log.mood_level(),
        log.stress_level(),
        escape_field(log.notes()),
    )
}

pub fn decode_mood(line: &str) -> Result<MoodLog> {
    const KIND: &str = "mood";
    let parts = split_fields(KIND, line, MOOD_FIELDS)?;
    expect_tag(KIND, parts[1], EntryKind::Mood)?;
    let timestamp = parse_timestamp(KIND, parts[2])?;
    let mood = parse_int(KIND, "mood level", parts[3])?;
    let stress = parse_int(KIND, "stress level", parts[4])?;
    MoodLog::from_parts(parts[0], timestamp, mood, stress, unescape_field(parts[5]))
        .map_err(|e| CoreError::malformed(KIND, e.to_string()))
}

// ---------------------------------------------------------------------------
// Task
// ---------------------------------------------------------------------------

pub fn encode_task(task: &Task) -> String {
    format!(
        "{}|{}|{}|{}|{}|{}|{}|{}|{}",
        task.entry_id(),
        EntryKind::Task.tag(),
        format_timestamp(task.timestamp()),
        escape_field(task.task_name()),
        escape_field(task.description()),
        task.due_date().map(|d| d.to_string()).unwrap_or_default(),
        task.priority().map(|p| p.to_string()).unwrap_or_default(),
        task.status(),
        escape_field(task.notes()),
    )
}

pub fn decode_task(line: &str) -> Result<Task> {
    const KIND: &str = "task";
    let parts = split_fields(KIND, line, TASK_FIELDS)?;
    expect_tag(KIND, parts[1], EntryKind::Task)?;
    let created = parse_timestamp(KIND, parts[2])?;

    let due_date = match parts[5].trim() {
        "" => None,
        s => Some(
            s.parse::<NaiveDate>()
                .map_err(|e| CoreError::malformed(KIND, format!("bad due date '{s}': {e}")))?,
        ),
    };
    let priority = match parts[6].trim() {
        "" => None,
        s => Some(s.parse().map_err(|e: String| CoreError::malformed(KIND, e))?),
    };
    let status = parts[7]
        .parse()
        .map_err(|e: String| CoreError::malformed(KIND, e))?;

    let draft = TaskDraft {
        task_name: unescape_field(parts[3]),
        description: unescape_field(parts[4]),
        due_date,
        priority,
        status,
        notes: unescape_field(parts[8]),
    };
    Task::from_parts(parts[0], created, draft).map_err(|e| CoreError::malformed(KIND, e.to_string()))
}
