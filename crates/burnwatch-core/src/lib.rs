//! burnwatch-core: entry model, persistence, and burnout analytics.
//!
//! This crate defines the mood and task records, the line-oriented file
//! format they are stored in, and the scoring logic that turns a week of
//! history into a burnout risk tier.

pub mod burnout;
pub mod codec;
pub mod error;
pub mod journal;
pub mod model;
pub mod mood;
pub mod storage;
pub mod traits;
pub mod workload;

pub use burnout::{BurnoutAnalyzer, RiskTier, ScoreBreakdown, WorkloadLevel};
pub use error::{CoreError, Result, ValidationError};
pub use journal::{Journal, LoadSummary};
pub use model::{MoodLog, Priority, Task, TaskDraft, TaskStatus, User};
pub use mood::MoodTracker;
pub use storage::DataStore;
pub use traits::{Clock, Entry, EntryKind, FixedClock, SystemClock};
pub use workload::WorkloadManager;
