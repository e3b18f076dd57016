//! Burnout risk scoring over the trailing seven-day window.
//!
//! The score is the sum of four factors, capped at 10:
//!
//! | factor                 | +3        | +2        | +1        |
//! |------------------------|-----------|-----------|-----------|
//! | average stress         | >= 8      | >= 7      | >= 6      |
//! | average mood           | <= 3      | <= 4      | <= 5      |
//! | workload intensity     | >= 25     | >= 15     | >= 10     |
//! | consecutive high stress| -         | last 3    | last 2    |
//!
//! The window is recomputed from the clock on every call.

use std::fmt;
use std::sync::Arc;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::model::MoodLog;
use crate::mood::MoodTracker;
use crate::traits::Clock;
use crate::workload::WorkloadManager;

/// Length of the trailing analysis window in days.
pub const WINDOW_DAYS: i64 = 7;
/// Stress at or above this level counts as high.
pub const HIGH_STRESS_THRESHOLD: f64 = 7.0;
/// Maximum burnout score.
pub const MAX_SCORE: u32 = 10;

const MOOD_DECLINE_SAMPLE: usize = 7;
const MOOD_DECLINE_MIN_ENTRIES: usize = 4;
const MOOD_DECLINE_DROP: f64 = 2.0;

/// Risk tier derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 8 => RiskTier::High,
            s if s >= 5 => RiskTier::Medium,
            _ => RiskTier::Low,
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskTier::Low => write!(f, "LOW"),
            RiskTier::Medium => write!(f, "MEDIUM"),
            RiskTier::High => write!(f, "HIGH"),
        }
    }
}

/// Coarse label for workload intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WorkloadLevel {
    Minimal,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl WorkloadLevel {
    pub fn from_intensity(intensity: u32) -> Self {
        match intensity {
            i if i >= 25 => WorkloadLevel::VeryHigh,
            i if i >= 15 => WorkloadLevel::High,
            i if i >= 10 => WorkloadLevel::Moderate,
            i if i >= 5 => WorkloadLevel::Low,
            _ => WorkloadLevel::Minimal,
        }
    }

    fn is_heavy(self) -> bool {
        matches!(self, WorkloadLevel::High | WorkloadLevel::VeryHigh)
    }
}

impl fmt::Display for WorkloadLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkloadLevel::Minimal => write!(f, "MINIMAL"),
            WorkloadLevel::Low => write!(f, "LOW"),
            WorkloadLevel::Moderate => write!(f, "MODERATE"),
            WorkloadLevel::High => write!(f, "HIGH"),
            WorkloadLevel::VeryHigh => write!(f, "VERY HIGH"),
        }
    }
}

/// Per-factor contributions to the burnout score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub stress: u32,
    pub mood: u32,
    pub workload: u32,
    pub consecutive_stress: u32,
}

impl ScoreBreakdown {
    /// Sum of all factors, capped at [`MAX_SCORE`].
    pub fn total(&self) -> u32 {
        (self.stress + self.mood + self.workload + self.consecutive_stress).min(MAX_SCORE)
    }
}

pub fn stress_factor(avg_stress: f64) -> u32 {
    if avg_stress >= 8.0 {
        3
    } else if avg_stress >= HIGH_STRESS_THRESHOLD {
        2
    } else if avg_stress >= 6.0 {
        1
    } else {
        0
    }
}

pub fn mood_factor(avg_mood: f64) -> u32 {
    if avg_mood <= 3.0 {
        3
    } else if avg_mood <= 4.0 {
        2
    } else if avg_mood <= 5.0 {
        1
    } else {
        0
    }
}

pub fn workload_factor(intensity: u32) -> u32 {
    match intensity {
        i if i >= 25 => 3,
        i if i >= 15 => 2,
        i if i >= 10 => 1,
        _ => 0,
    }
}

/// Derives burnout risk from a mood history and, optionally, a task list.
pub struct BurnoutAnalyzer<'a> {
    moods: &'a MoodTracker,
    workload: Option<&'a WorkloadManager>,
    clock: Arc<dyn Clock>,
}

impl<'a> BurnoutAnalyzer<'a> {
    /// An analyzer over mood data only; the workload factor is always 0.
    pub fn new(moods: &'a MoodTracker, clock: Arc<dyn Clock>) -> Self {
        Self {
            moods,
            workload: None,
            clock,
        }
    }

    /// Wire in a task list for the workload factor and warnings.
    pub fn with_workload(mut self, workload: &'a WorkloadManager) -> Self {
        self.workload = Some(workload);
        self
    }

    /// `(now - 7 days, now)`.
    pub fn window(&self) -> (NaiveDateTime, NaiveDateTime) {
        let now = self.clock.now();
        (now - Duration::days(WINDOW_DAYS), now)
    }

    pub fn window_logs(&self) -> Vec<MoodLog> {
        let (from, to) = self.window();
        self.moods.in_range(from, to)
    }

    pub fn average_stress(&self) -> f64 {
        let (from, to) = self.window();
        self.moods.average_stress(from, to)
    }

    pub fn average_mood(&self) -> f64 {
        let (from, to) = self.window();
        self.moods.average_mood(from, to)
    }

    pub fn workload_intensity(&self) -> Option<u32> {
        self.workload.map(WorkloadManager::workload_intensity)
    }

    /// Individual factor scores.
    pub fn score_breakdown(&self) -> ScoreBreakdown {
        let has_window_data = !self.window_logs().is_empty();

        // 0.0 is the "no data" average and must not read as rock-bottom mood.
        let (stress, mood) = if has_window_data {
            (
                stress_factor(self.average_stress()),
                mood_factor(self.average_mood()),
            )
        } else {
            (0, 0)
        };

        let consecutive_stress = if self.detect_consecutive_high_stress(3) {
            2
        } else if self.detect_consecutive_high_stress(2) {
            1
        } else {
            0
        };

        ScoreBreakdown {
            stress,
            mood,
            workload: self.workload_intensity().map(workload_factor).unwrap_or(0),
            consecutive_stress,
        }
    }

    /// Burnout score in `0..=10`.
    pub fn score(&self) -> u32 {
        self.score_breakdown().total()
    }

    pub fn risk_tier(&self) -> RiskTier {
        RiskTier::from_score(self.score())
    }

    /// Window average stress is at or above 7.
    pub fn detect_high_stress(&self) -> bool {
        self.average_stress() >= HIGH_STRESS_THRESHOLD
    }

    /// Compares the older and newer halves of the last seven entries; a drop
    /// of two points or more is a decline. Needs at least four entries.
    pub fn detect_mood_decline(&self) -> bool {
        let recent = self.moods.recent(MOOD_DECLINE_SAMPLE);
        if recent.len() < MOOD_DECLINE_MIN_ENTRIES {
            return false;
        }
        let mid = recent.len() / 2;
        let avg = |logs: &[MoodLog]| {
            logs.iter().map(|l| l.mood_level() as f64).sum::<f64>() / logs.len() as f64
        };
        avg(&recent[..mid]) - avg(&recent[mid..]) >= MOOD_DECLINE_DROP
    }

    /// The latest `n` entries all have stress at or above 7. Fewer than `n`
    /// entries never qualify.
    pub fn detect_consecutive_high_stress(&self, n: usize) -> bool {
        let recent = self.moods.recent(n);
        n > 0
            && recent.len() == n
            && recent
                .iter()
                .all(|l| l.stress_level() as f64 >= HIGH_STRESS_THRESHOLD)
    }

    /// Workload label, when a task list is wired in.
    pub fn workload_level(&self) -> Option<WorkloadLevel> {
        self.workload_intensity().map(WorkloadLevel::from_intensity)
    }

    pub fn overdue_count(&self) -> usize {
        self.workload.map(|w| w.overdue().len()).unwrap_or(0)
    }

    /// Warning lines followed, if any were raised, by recommendations.
    pub fn warnings(&self) -> Vec<String> {
        let tier = self.risk_tier();
        let mut warnings: Vec<String> = Vec::new();

        match tier {
            RiskTier::High => {
                warnings.push("HIGH BURNOUT RISK DETECTED - immediate action recommended".into())
            }
            RiskTier::Medium => warnings
                .push("MEDIUM BURNOUT RISK - monitor closely and take preventive measures".into()),
            RiskTier::Low => {}
        }

        if self.detect_high_stress() {
            warnings.push("Sustained high stress levels over the past week".into());
        }
        if self.detect_mood_decline() {
            warnings.push("Declining mood trend - consider reaching out for support".into());
        }
        if let Some(level) = self.workload_level().filter(|l| l.is_heavy()) {
            warnings.push(format!(
                "Academic workload is {} - prioritise and drop what you can",
                level.to_string().to_lowercase()
            ));
        }
        let overdue = self.overdue_count();
        if overdue > 0 {
            warnings.push(format!("{overdue} overdue task(s) - address them first"));
        }

        if warnings.is_empty() {
            return warnings;
        }

        warnings.push(String::new());
        warnings.push("RECOMMENDATIONS:".into());
        warnings.extend(tier_advice(tier).iter().map(|s| format!("• {s}")));
        warnings.extend(GENERAL_ADVICE.iter().map(|s| format!("• {s}")));
        warnings
    }

    /// Plain-text breakdown of the current assessment.
    pub fn detailed_analysis(&self) -> String {
        let mut out = String::new();
        let breakdown = self.score_breakdown();
        let tier = RiskTier::from_score(breakdown.total());

        out.push_str("=== BURNOUT RISK ANALYSIS ===\n\n");
        out.push_str(&format!("Analysis period: past {WINDOW_DAYS} days\n"));
        out.push_str(&format!("Burnout risk level: {tier}\n"));
        out.push_str(&format!("Burnout score: {}/{MAX_SCORE}\n\n", breakdown.total()));

        let avg_stress = self.average_stress();
        out.push_str("--- Stress ---\n");
        out.push_str(&format!("Average stress: {avg_stress:.1}/10\n"));
        out.push_str(&format!(
            "Status: {}\n\n",
            if avg_stress >= HIGH_STRESS_THRESHOLD {
                "HIGH"
            } else {
                "Normal"
            }
        ));

        out.push_str("--- Mood ---\n");
        out.push_str(&format!("Average mood: {:.1}/10\n", self.average_mood()));
        out.push_str(&format!(
            "Trend: {}\n\n",
            if self.detect_mood_decline() {
                "Declining"
            } else {
                "Stable"
            }
        ));

        out.push_str("--- Workload ---\n");
        match self.workload {
            Some(w) => {
                out.push_str(&format!(
                    "Workload level: {}\n",
                    WorkloadLevel::from_intensity(w.workload_intensity())
                ));
                out.push_str(&format!("Pending tasks: {}\n", w.pending_count()));
                out.push_str(&format!("Overdue tasks: {}\n\n", w.overdue().len()));
            }
            None => out.push_str("No task data\n\n"),
        }

        out.push_str("--- Score breakdown ---\n");
        out.push_str(&format!("Stress: +{}\n", breakdown.stress));
        out.push_str(&format!("Mood: +{}\n", breakdown.mood));
        out.push_str(&format!("Workload: +{}\n", breakdown.workload));
        out.push_str(&format!(
            "Consecutive high stress: +{}\n",
            breakdown.consecutive_stress
        ));

        let warnings = self.warnings();
        if !warnings.is_empty() {
            out.push_str("\n--- Warnings & recommendations ---\n");
            for line in warnings {
                out.push_str(&line);
                out.push('\n');
            }
        }
        out
    }
}

/// Recommendations specific to a tier (empty for LOW).
pub fn tier_advice(tier: RiskTier) -> &'static [&'static str] {
    match tier {
        RiskTier::High => &[
            "Speak with an academic counselor or mental health professional",
            "Consider reducing your course load if possible",
            "Schedule regular breaks and self-care activities",
        ],
        RiskTier::Medium => &[
            "Practice stress management (meditation, exercise)",
            "Tighten time management and task prioritisation",
            "Keep a regular sleep schedule",
        ],
        RiskTier::Low => &[],
    }
}

/// Recommendations that apply at every tier.
pub const GENERAL_ADVICE: &[&str] = &[
    "Connect with friends and your support network",
    "Review and adjust your study schedule",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Priority, Task, TaskDraft, TaskStatus};
    use crate::traits::FixedClock;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 9, 20)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap()
    }

    fn clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock(now()))
    }

    /// Logs one per hour ending an hour before `now`, in the given order.
    fn tracker(levels: &[(i64, i64)]) -> MoodTracker {
        let mut t = MoodTracker::new();
        let n = levels.len() as i64;
        for (i, &(mood, stress)) in levels.iter().enumerate() {
            let at = now() - Duration::hours(n - i as i64);
            t.add(MoodLog::new(at, mood, stress, "").unwrap());
        }
        t
    }

    #[test]
    fn stress_factor_boundaries() {
        assert_eq!(stress_factor(5.99), 0);
        assert_eq!(stress_factor(6.0), 1);
        assert_eq!(stress_factor(6.99), 1);
        assert_eq!(stress_factor(7.0), 2);
        assert_eq!(stress_factor(7.99), 2);
        assert_eq!(stress_factor(8.0), 3);
    }

    #[test]
    fn mood_and_workload_factor_boundaries() {
        assert_eq!(mood_factor(3.0), 3);
        assert_eq!(mood_factor(4.0), 2);
        assert_eq!(mood_factor(5.0), 1);
        assert_eq!(mood_factor(5.01), 0);
        assert_eq!(workload_factor(9), 0);
        assert_eq!(workload_factor(10), 1);
        assert_eq!(workload_factor(15), 2);
        assert_eq!(workload_factor(25), 3);
    }

    #[test]
    fn tier_thresholds() {
        assert_eq!(RiskTier::from_score(0), RiskTier::Low);
        assert_eq!(RiskTier::from_score(4), RiskTier::Low);
        assert_eq!(RiskTier::from_score(5), RiskTier::Medium);
        assert_eq!(RiskTier::from_score(7), RiskTier::Medium);
        assert_eq!(RiskTier::from_score(8), RiskTier::High);
        assert_eq!(RiskTier::from_score(10), RiskTier::High);
    }

    #[test]
    fn empty_history_scores_zero() {
        let moods = MoodTracker::new();
        let analyzer = BurnoutAnalyzer::new(&moods, clock());
        assert_eq!(analyzer.score(), 0);
        assert_eq!(analyzer.risk_tier(), RiskTier::Low);
        assert!(analyzer.warnings().is_empty());
    }

    #[test]
    fn average_stress_of_seven_adds_two() {
        // mood 6 keeps the mood factor out of it
        let moods = tracker(&[(6, 7), (6, 6), (6, 8)]);
        let analyzer = BurnoutAnalyzer::new(&moods, clock());
        let b = analyzer.score_breakdown();
        assert_eq!(b.stress, 2);
        assert_eq!(b.mood, 0);
    }

    #[test]
    fn three_consecutive_high_stress_adds_two() {
        let moods = tracker(&[(6, 8), (6, 9), (6, 8)]);
        let analyzer = BurnoutAnalyzer::new(&moods, clock());
        assert!(analyzer.detect_consecutive_high_stress(3));
        let b = analyzer.score_breakdown();
        assert_eq!(b.consecutive_stress, 2);
        assert_eq!(b.stress, 3);
        assert_eq!(analyzer.score(), 5);
    }

    #[test]
    fn two_consecutive_high_stress_adds_one() {
        let moods = tracker(&[(6, 2), (6, 7), (6, 9)]);
        let analyzer = BurnoutAnalyzer::new(&moods, clock());
        assert!(!analyzer.detect_consecutive_high_stress(3));
        assert!(analyzer.detect_consecutive_high_stress(2));
        assert_eq!(analyzer.score_breakdown().consecutive_stress, 1);
    }

    #[test]
    fn too_few_entries_never_consecutive() {
        let moods = tracker(&[(5, 10)]);
        let analyzer = BurnoutAnalyzer::new(&moods, clock());
        assert!(!analyzer.detect_consecutive_high_stress(2));
        assert!(!analyzer.detect_consecutive_high_stress(3));
    }

    #[test]
    fn score_clamped_at_ten() {
        let moods = tracker(&[(1, 10), (1, 10), (1, 10)]);
        let mut tasks = WorkloadManager::with_clock(clock());
        for i in 0..5 {
            let draft = TaskDraft::named(format!("t{i}"))
                .priority(Priority::High)
                .due(now().date() - Duration::days(1));
            tasks.add(Task::new(now(), draft).unwrap()).unwrap();
        }
        let analyzer = BurnoutAnalyzer::new(&moods, clock()).with_workload(&tasks);
        let b = analyzer.score_breakdown();
        assert_eq!((b.stress, b.mood, b.workload, b.consecutive_stress), (3, 3, 3, 2));
        assert_eq!(analyzer.score(), MAX_SCORE);
        assert_eq!(analyzer.risk_tier(), RiskTier::High);
    }

    #[test]
    fn entries_outside_window_ignored_for_averages() {
        let mut moods = MoodTracker::new();
        moods.add(MoodLog::new(now() - Duration::days(8), 1, 10, "").unwrap());
        let analyzer = BurnoutAnalyzer::new(&moods, clock());
        assert_eq!(analyzer.average_stress(), 0.0);
        assert_eq!(analyzer.score_breakdown().stress, 0);
        assert_eq!(analyzer.score_breakdown().mood, 0);
    }

    #[test]
    fn mood_decline_needs_four_entries() {
        let moods = tracker(&[(9, 1), (9, 1), (1, 1)]);
        assert!(!BurnoutAnalyzer::new(&moods, clock()).detect_mood_decline());
    }

    #[test]
    fn mood_decline_compares_halves() {
        // halves: [8, 8] vs [5, 5]
        let moods = tracker(&[(8, 3), (8, 3), (5, 3), (5, 3)]);
        assert!(BurnoutAnalyzer::new(&moods, clock()).detect_mood_decline());

        // halves: [7, 7] vs [6, 5] -> 1.5 drop
        let moods = tracker(&[(7, 3), (7, 3), (6, 3), (5, 3)]);
        assert!(!BurnoutAnalyzer::new(&moods, clock()).detect_mood_decline());

        // rising mood is never a decline
        let moods = tracker(&[(2, 3), (2, 3), (9, 3), (9, 3), (9, 3)]);
        assert!(!BurnoutAnalyzer::new(&moods, clock()).detect_mood_decline());
    }

    #[test]
    fn mood_decline_uses_last_seven_only() {
        // two old high-mood entries fall outside the seven-entry sample
        let moods = tracker(&[(10, 3), (10, 3), (5, 3), (5, 3), (5, 3), (5, 3), (5, 3), (5, 3), (5, 3)]);
        assert!(!BurnoutAnalyzer::new(&moods, clock()).detect_mood_decline());
    }

    #[test]
    fn warnings_order_and_recommendations() {
        let moods = tracker(&[(8, 8), (8, 8), (2, 9), (2, 9)]);
        let mut tasks = WorkloadManager::with_clock(clock());
        let draft = TaskDraft::named("late")
            .priority(Priority::Low)
            .status(TaskStatus::Pending)
            .due(now().date() - Duration::days(3));
        tasks.add(Task::new(now(), draft).unwrap()).unwrap();

        let analyzer = BurnoutAnalyzer::new(&moods, clock()).with_workload(&tasks);
        // stress 3 + mood 1 (avg 5.0) + workload 0 + consecutive 2
        assert_eq!(analyzer.score(), 6);

        let w = analyzer.warnings();
        assert!(w[0].starts_with("MEDIUM BURNOUT RISK"));
        assert!(w[1].starts_with("Sustained high stress"));
        assert!(w[2].starts_with("Declining mood"));
        assert!(w[3].starts_with("1 overdue task(s)"));
        assert_eq!(w[4], "");
        assert_eq!(w[5], "RECOMMENDATIONS:");
        assert_eq!(w.len(), 6 + 3 + GENERAL_ADVICE.len());
        assert!(w.last().unwrap().starts_with("• "));
    }

    #[test]
    fn low_tier_with_overdue_gets_only_general_advice() {
        let moods = MoodTracker::new();
        let mut tasks = WorkloadManager::with_clock(clock());
        let draft = TaskDraft::named("late").due(now().date() - Duration::days(1));
        tasks.add(Task::new(now(), draft).unwrap()).unwrap();

        let analyzer = BurnoutAnalyzer::new(&moods, clock()).with_workload(&tasks);
        assert_eq!(analyzer.risk_tier(), RiskTier::Low);
        let w = analyzer.warnings();
        assert_eq!(w.len(), 1 + 2 + GENERAL_ADVICE.len());
        assert!(w[0].contains("overdue"));
    }

    #[test]
    fn heavy_workload_warns() {
        let moods = MoodTracker::new();
        let mut tasks = WorkloadManager::with_clock(clock());
        for i in 0..3 {
            let draft = TaskDraft::named(format!("t{i}"))
                .priority(Priority::High)
                .due(now().date() + Duration::days(1));
            tasks.add(Task::new(now(), draft).unwrap()).unwrap();
        }
        // 3 * (1 + 3 + 4) = 24
        let analyzer = BurnoutAnalyzer::new(&moods, clock()).with_workload(&tasks);
        assert_eq!(analyzer.workload_level(), Some(WorkloadLevel::High));
        assert!(analyzer.warnings()[0].contains("workload is high"));
    }

    #[test]
    fn detailed_analysis_sections() {
        let moods = tracker(&[(4, 7)]);
        let text = BurnoutAnalyzer::new(&moods, clock()).detailed_analysis();
        assert!(text.contains("Burnout risk level: LOW"));
        assert!(text.contains("Average stress: 7.0/10"));
        assert!(text.contains("No task data"));
    }
}
