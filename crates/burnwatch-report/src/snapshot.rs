//! Structured figures behind the weekly report, for JSON output.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use burnwatch_core::burnout::{RiskTier, ScoreBreakdown, WorkloadLevel};
use burnwatch_core::{Entry, MoodLog, Priority, TaskStatus};

use crate::weekly::ReportGenerator;

#[derive(Debug, Clone, Serialize)]
pub struct WeeklySnapshot {
    pub generated_at: NaiveDateTime,
    pub period_start: NaiveDateTime,
    pub period_end: NaiveDateTime,
    pub mood: Option<LevelSummary>,
    pub stress: Option<LevelSummary>,
    pub tasks: Option<TaskSummary>,
    pub burnout: BurnoutSummary,
}

/// Count and spread of one level over the window. Absent when no entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelSummary {
    pub entries: usize,
    pub average: f64,
    pub highest: u8,
    pub lowest: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskSummary {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub overdue: usize,
    pub completion_rate: f64,
    pub workload_intensity: u32,
    pub workload_level: WorkloadLevel,
    pub upcoming: Vec<UpcomingTask>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpcomingTask {
    pub id: String,
    pub name: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
    pub status: TaskStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct BurnoutSummary {
    pub tier: RiskTier,
    pub score: u32,
    pub breakdown: ScoreBreakdown,
    pub high_stress: bool,
    pub mood_decline: bool,
    pub warnings: Vec<String>,
}

fn level_summary(logs: &[MoodLog], level: impl Fn(&MoodLog) -> u8) -> Option<LevelSummary> {
    if logs.is_empty() {
        return None;
    }
    let values: Vec<u8> = logs.iter().map(level).collect();
    Some(LevelSummary {
        entries: values.len(),
        average: values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64,
        highest: values.iter().copied().max().unwrap_or_default(),
        lowest: values.iter().copied().min().unwrap_or_default(),
    })
}

impl WeeklySnapshot {
    pub fn capture(generator: &ReportGenerator<'_>) -> Self {
        let analyzer = generator.analyzer();
        let (period_start, period_end) = analyzer.window();
        let logs = analyzer.window_logs();

        let tasks = generator
            .workload()
            .filter(|w| w.total_count() > 0)
            .map(|w| {
                let intensity = w.workload_intensity();
                TaskSummary {
                    total: w.total_count(),
                    completed: w.completed_count(),
                    pending: w.pending_count(),
                    overdue: w.overdue().len(),
                    completion_rate: w.completion_rate(),
                    workload_intensity: intensity,
                    workload_level: WorkloadLevel::from_intensity(intensity),
                    upcoming: w
                        .upcoming(generator.upcoming_days())
                        .into_iter()
                        .map(|t| UpcomingTask {
                            id: t.entry_id().to_string(),
                            name: t.task_name().to_string(),
                            due_date: t.due_date(),
                            priority: t.priority(),
                            status: t.status(),
                        })
                        .collect(),
                }
            });

        let breakdown = analyzer.score_breakdown();
        let burnout = BurnoutSummary {
            tier: RiskTier::from_score(breakdown.total()),
            score: breakdown.total(),
            breakdown,
            high_stress: analyzer.detect_high_stress(),
            mood_decline: analyzer.detect_mood_decline(),
            warnings: analyzer.warnings(),
        };

        Self {
            generated_at: generator.clock().now(),
            period_start,
            period_end,
            mood: level_summary(&logs, MoodLog::mood_level),
            stress: level_summary(&logs, MoodLog::stress_level),
            tasks,
            burnout,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
