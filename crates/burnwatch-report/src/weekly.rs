//! Weekly text report.
//!
//! The layout is fixed: every section header is always emitted, and a
//! section with nothing to show says so on its own line.

use std::sync::Arc;

use chrono::Duration;

use burnwatch_core::burnout::{BurnoutAnalyzer, RiskTier, WINDOW_DAYS};
use burnwatch_core::traits::Clock;
use burnwatch_core::{Journal, MoodLog, MoodTracker, WorkloadManager};

/// Number of cells in a bar chart.
pub const BAR_WIDTH: usize = 10;
/// Upcoming tasks listed before collapsing the rest into a count.
pub const UPCOMING_SHOWN: usize = 5;
/// Default look-ahead for the upcoming list, in days.
pub const DEFAULT_UPCOMING_DAYS: i64 = 7;

const RULE: &str = "═══════════════════════════════════════════════════════════════";

/// A fixed-width bar with `round(value)` of [`BAR_WIDTH`] cells filled.
pub fn bar(value: f64) -> String {
    let filled = value.round().clamp(0.0, BAR_WIDTH as f64) as usize;
    format!(
        "[{}{}]",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled)
    )
}

pub fn mood_descriptor(avg: f64) -> &'static str {
    match avg {
        a if a >= 8.0 => "Great",
        a if a >= 6.0 => "Good",
        a if a >= 4.0 => "Okay",
        a if a >= 2.0 => "Low",
        _ => "Very low",
    }
}

pub fn stress_descriptor(avg: f64) -> &'static str {
    match avg {
        a if a >= 8.0 => "Very High",
        a if a >= 6.0 => "High",
        a if a >= 4.0 => "Moderate",
        a if a >= 2.0 => "Low",
        _ => "Minimal",
    }
}

fn section_header(out: &mut String, title: &str) {
    out.push_str("┌─────────────────────────────────────────────────────────────┐\n");
    out.push_str(&format!("│ {title:^59} │\n"));
    out.push_str("└─────────────────────────────────────────────────────────────┘\n");
}

/// Headline plus bullets shown under RECOMMENDATIONS for a tier.
fn tier_recommendations(tier: RiskTier) -> (&'static str, &'static [&'static str]) {
    match tier {
        RiskTier::High => (
            "URGENT ACTIONS NEEDED:",
            &[
                "Schedule an appointment with a counselor or mental health professional",
                "Consider requesting extensions for assignments",
                "Discuss your workload with your instructors",
                "Practice daily stress-relief activities",
            ],
        ),
        RiskTier::Medium => (
            "PREVENTIVE MEASURES:",
            &[
                "Use stress management techniques",
                "Review and streamline your schedule",
                "Get adequate sleep (7-9 hours)",
                "Stay in touch with your support network",
            ],
        ),
        RiskTier::Low => (
            "MAINTENANCE TIPS:",
            &[
                "Keep up your current positive habits",
                "Maintain a healthy academic-life balance",
                "Stay proactive with task management",
                "Keep monitoring your well-being",
            ],
        ),
    }
}

const WELLBEING_TIPS: &[&str] = &[
    "Take regular breaks during study sessions",
    "Exercise 3-4 times per week",
    "Practice mindfulness or meditation",
    "Maintain social connections",
];

/// Which of the two per-entry levels a summary section reports on.
#[derive(Clone, Copy)]
enum Level {
    Mood,
    Stress,
}

impl Level {
    fn value(self, log: &MoodLog) -> u8 {
        match self {
            Level::Mood => log.mood_level(),
            Level::Stress => log.stress_level(),
        }
    }
}

/// Builds the weekly report from current in-memory state.
pub struct ReportGenerator<'a> {
    moods: &'a MoodTracker,
    workload: Option<&'a WorkloadManager>,
    clock: Arc<dyn Clock>,
    upcoming_days: i64,
}

impl<'a> ReportGenerator<'a> {
    pub fn new(moods: &'a MoodTracker, clock: Arc<dyn Clock>) -> Self {
        Self {
            moods,
            workload: None,
            clock,
            upcoming_days: DEFAULT_UPCOMING_DAYS,
        }
    }

    /// A generator over everything a journal holds.
    pub fn for_journal(journal: &'a Journal) -> Self {
        Self::new(journal.moods(), journal.clock()).with_workload(journal.workload())
    }

    pub fn with_workload(mut self, workload: &'a WorkloadManager) -> Self {
        self.workload = Some(workload);
        self
    }

    pub fn with_upcoming_days(mut self, days: i64) -> Self {
        self.upcoming_days = days;
        self
    }

    pub fn upcoming_days(&self) -> i64 {
        self.upcoming_days
    }

    pub(crate) fn workload(&self) -> Option<&'a WorkloadManager> {
        self.workload
    }

    pub(crate) fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn analyzer(&self) -> BurnoutAnalyzer<'a> {
        let analyzer = BurnoutAnalyzer::new(self.moods, Arc::clone(&self.clock));
        match self.workload {
            Some(w) => analyzer.with_workload(w),
            None => analyzer,
        }
    }

    /// The complete report.
    pub fn generate(&self) -> String {
        let now = self.clock.now();
        let week_ago = now - Duration::days(WINDOW_DAYS);
        let mut out = String::new();

        out.push_str("╔══════════════════════════════════════════════════════════════╗\n");
        out.push_str("║            STUDENT STRESS & MOOD MONITORING REPORT           ║\n");
        out.push_str("║                    Weekly Summary Report                     ║\n");
        out.push_str("╚══════════════════════════════════════════════════════════════╝\n\n");
        out.push_str(&format!("Report Generated: {}\n", now.format("%b %d, %Y %H:%M")));
        out.push_str(&format!(
            "Report Period: {} to {}\n\n",
            week_ago.format("%b %d, %Y"),
            now.format("%b %d, %Y")
        ));

        out.push_str(&self.mood_summary());
        out.push('\n');
        out.push_str(&self.stress_summary());
        out.push('\n');
        out.push_str(&self.task_summary());
        out.push('\n');
        out.push_str(&self.burnout_assessment());
        out.push('\n');
        out.push_str(&self.recommendations());
        out.push('\n');

        out.push_str(RULE);
        out.push('\n');
        out.push_str("Take care of yourself. See you next week.\n");
        out.push_str(RULE);
        out.push('\n');
        out
    }

    pub fn mood_summary(&self) -> String {
        let mut out = String::new();
        section_header(&mut out, "MOOD ANALYSIS");
        let analyzer = self.analyzer();
        let trend = if analyzer.detect_mood_decline() {
            "Declining"
        } else {
            "Stable/Improving"
        };
        self.level_summary(&mut out, Level::Mood, trend);
        out
    }

    pub fn stress_summary(&self) -> String {
        let mut out = String::new();
        section_header(&mut out, "STRESS ANALYSIS");
        let analyzer = self.analyzer();
        let status = if analyzer.detect_high_stress() {
            "Elevated"
        } else {
            "Normal"
        };
        self.level_summary(&mut out, Level::Stress, status);
        out
    }

    fn level_summary(&self, out: &mut String, level: Level, status: &str) {
        let logs = self.analyzer().window_logs();
        let (noun, label) = match level {
            Level::Mood => ("mood", "Mood"),
            Level::Stress => ("stress", "Stress"),
        };
        if logs.is_empty() {
            out.push_str(&format!("  No {noun} entries recorded during this period.\n"));
            return;
        }

        let values: Vec<u8> = logs.iter().map(|l| level.value(l)).collect();
        let avg = values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64;
        let high = values.iter().copied().max().unwrap_or_default();
        let low = values.iter().copied().min().unwrap_or_default();
        let descriptor = match level {
            Level::Mood => mood_descriptor(avg),
            Level::Stress => stress_descriptor(avg),
        };

        out.push_str(&format!("  Total Entries: {}\n", values.len()));
        out.push_str(&format!("  Average {label}: {avg:.1}/10 ({descriptor})\n"));
        out.push_str(&format!("  Highest {label}: {high}/10\n"));
        out.push_str(&format!("  Lowest {label}: {low}/10\n"));
        match level {
            Level::Mood => out.push_str(&format!("  Mood Trend: {status}\n")),
            Level::Stress => out.push_str(&format!("  Stress Status: {status}\n")),
        }
        out.push_str(&format!("  {label} Chart: {}\n", bar(avg)));
    }

    pub fn task_summary(&self) -> String {
        let mut out = String::new();
        section_header(&mut out, "ACADEMIC WORKLOAD SUMMARY");

        let Some(workload) = self.workload.filter(|w| w.total_count() > 0) else {
            out.push_str("  No tasks recorded.\n");
            return out;
        };

        let overdue = workload.overdue().len();
        out.push_str(&format!("  Total Tasks: {}\n", workload.total_count()));
        out.push_str(&format!(
            "  Completed: {} ({:.1}%)\n",
            workload.completed_count(),
            workload.completion_rate()
        ));
        out.push_str(&format!("  Pending: {}\n", workload.pending_count()));
        out.push_str(&format!(
            "  Overdue: {overdue}{}\n",
            if overdue > 0 { " !" } else { "" }
        ));
        if let Some(level) = self.analyzer().workload_level() {
            out.push_str(&format!("  Workload Level: {level}\n"));
        }

        let upcoming = workload.upcoming(self.upcoming_days);
        if !upcoming.is_empty() {
            out.push_str(&format!("\n  Upcoming Tasks (Next {} Days):\n", self.upcoming_days));
            for task in upcoming.iter().take(UPCOMING_SHOWN) {
                let due = task
                    .due_date()
                    .map(|d| d.format("%b %d").to_string())
                    .unwrap_or_default();
                let priority = task
                    .priority()
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "None".into());
                out.push_str(&format!("    • {} - Due: {due} [{priority}]\n", task.task_name()));
            }
            if upcoming.len() > UPCOMING_SHOWN {
                out.push_str(&format!("    ... and {} more\n", upcoming.len() - UPCOMING_SHOWN));
            }
        }
        out
    }

    pub fn burnout_assessment(&self) -> String {
        let mut out = String::new();
        section_header(&mut out, "BURNOUT RISK ASSESSMENT");

        let analyzer = self.analyzer();
        let score = analyzer.score();
        out.push_str(&format!("  Overall Risk Level: {}\n", RiskTier::from_score(score)));
        out.push_str(&format!("  Burnout Score: {score}/10\n"));
        out.push_str(&format!("  Risk Chart: {}\n\n", bar(score as f64)));

        let warnings: Vec<String> = analyzer
            .warnings()
            .into_iter()
            .filter(|w| !w.is_empty() && w != "RECOMMENDATIONS:")
            .collect();
        if !warnings.is_empty() {
            out.push_str("  Warnings & Alerts:\n");
            for warning in warnings {
                out.push_str(&format!("    {warning}\n"));
            }
        }
        out
    }

    pub fn recommendations(&self) -> String {
        let mut out = String::new();
        section_header(&mut out, "RECOMMENDATIONS");

        let (headline, bullets) = tier_recommendations(self.analyzer().risk_tier());
        out.push_str(&format!("  {headline}\n"));
        for bullet in bullets {
            out.push_str(&format!("    • {bullet}\n"));
        }
        out.push_str("\n  General Well-being Tips:\n");
        for tip in WELLBEING_TIPS {
            out.push_str(&format!("    • {tip}\n"));
        }
        out
    }
}
