//! In-memory mood/stress history with range queries and aggregates.

use chrono::NaiveDateTime;

use crate::model::MoodLog;
use crate::traits::Entry;

/// Owns the collection of mood logs.
///
/// Query results are copies; callers cannot reach into the collection.
#[derive(Debug, Clone, Default)]
pub struct MoodTracker {
    logs: Vec<MoodLog>,
}

impl MoodTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a log. Never rejects a log the constructor accepted.
    pub fn add(&mut self, log: MoodLog) {
        self.logs.push(log);
    }

    /// Every log, in insertion order.
    pub fn all(&self) -> Vec<MoodLog> {
        self.logs.clone()
    }

    /// Replace the whole collection (load time).
    pub fn replace_all(&mut self, logs: Vec<MoodLog>) {
        self.logs = logs;
    }

    pub fn len(&self) -> usize {
        self.logs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }

    /// Logs with `from <= timestamp <= to`, oldest first.
    pub fn in_range(&self, from: NaiveDateTime, to: NaiveDateTime) -> Vec<MoodLog> {
        let mut hits: Vec<MoodLog> = self
            .logs
            .iter()
            .filter(|log| log.timestamp() >= from && log.timestamp() <= to)
            .cloned()
            .collect();
        hits.sort_by_key(|log| log.timestamp());
        hits
    }

    /// Mean mood over the range; `0.0` when the range is empty.
    pub fn average_mood(&self, from: NaiveDateTime, to: NaiveDateTime) -> f64 {
        mean(self.in_range(from, to).iter().map(MoodLog::mood_level))
    }

    /// Mean stress over the range; `0.0` when the range is empty.
    pub fn average_stress(&self, from: NaiveDateTime, to: NaiveDateTime) -> f64 {
        mean(self.in_range(from, to).iter().map(MoodLog::stress_level))
    }

    /// Mean mood over every log; `0.0` when empty.
    pub fn average_mood_all(&self) -> f64 {
        mean(self.logs.iter().map(MoodLog::mood_level))
    }

    /// Mean stress over every log; `0.0` when empty.
    pub fn average_stress_all(&self) -> f64 {
        mean(self.logs.iter().map(MoodLog::stress_level))
    }

    /// `(lowest, highest)` mood in the range.
    pub fn mood_extremes(&self, from: NaiveDateTime, to: NaiveDateTime) -> Option<(u8, u8)> {
        extremes(self.in_range(from, to).iter().map(MoodLog::mood_level))
    }

    /// `(lowest, highest)` stress in the range.
    pub fn stress_extremes(&self, from: NaiveDateTime, to: NaiveDateTime) -> Option<(u8, u8)> {
        extremes(self.in_range(from, to).iter().map(MoodLog::stress_level))
    }

    /// The `n` chronologically latest logs, oldest first.
    pub fn recent(&self, n: usize) -> Vec<MoodLog> {
        let mut sorted = self.logs.clone();
        sorted.sort_by_key(|log| log.timestamp());
        let skip = sorted.len().saturating_sub(n);
        sorted.split_off(skip)
    }

    /// The most recently logged entry.
    pub fn latest(&self) -> Option<MoodLog> {
        self.logs.iter().max_by_key(|log| log.timestamp()).cloned()
    }
}

fn mean(values: impl Iterator<Item = u8>) -> f64 {
    let (sum, count) = values.fold((0u64, 0u64), |(s, c), v| (s + v as u64, c + 1));
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

fn extremes(values: impl Iterator<Item = u8>) -> Option<(u8, u8)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn log(day: u32, mood: i64, stress: i64) -> MoodLog {
        MoodLog::new(at(day, 10), mood, stress, "").unwrap()
    }

    fn tracker(logs: Vec<MoodLog>) -> MoodTracker {
        let mut t = MoodTracker::new();
        t.replace_all(logs);
        t
    }

    #[test]
    fn range_is_inclusive_and_chronological() {
        let t = tracker(vec![log(5, 5, 5), log(1, 1, 1), log(3, 3, 3), log(7, 7, 7)]);
        let hits = t.in_range(at(3, 10), at(5, 10));
        let moods: Vec<u8> = hits.iter().map(MoodLog::mood_level).collect();
        assert_eq!(moods, vec![3, 5]);

        assert!(t.in_range(at(3, 11), at(5, 9)).is_empty());
    }

    #[test]
    fn averages_over_range() {
        let t = tracker(vec![log(1, 2, 8), log(2, 4, 6), log(9, 10, 1)]);
        assert!((t.average_mood(at(1, 0), at(2, 23)) - 3.0).abs() < f64::EPSILON);
        assert!((t.average_stress(at(1, 0), at(2, 23)) - 7.0).abs() < f64::EPSILON);
        assert!((t.average_mood_all() - 16.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn empty_range_averages_to_zero() {
        let t = tracker(vec![log(1, 2, 8)]);
        assert_eq!(t.average_mood(at(20, 0), at(21, 0)), 0.0);
        assert_eq!(t.average_stress(at(20, 0), at(21, 0)), 0.0);
        assert_eq!(MoodTracker::new().average_stress_all(), 0.0);
    }

    #[test]
    fn recent_returns_latest_ascending() {
        let t = tracker(vec![log(4, 4, 4), log(1, 1, 1), log(3, 3, 3), log(2, 2, 2)]);
        let moods: Vec<u8> = t.recent(2).iter().map(MoodLog::mood_level).collect();
        assert_eq!(moods, vec![3, 4]);
        assert_eq!(t.recent(10).len(), 4);
        assert!(t.recent(0).is_empty());
    }

    #[test]
    fn extremes_and_latest() {
        let t = tracker(vec![log(1, 6, 2), log(2, 3, 9), log(3, 8, 5)]);
        assert_eq!(t.mood_extremes(at(1, 0), at(3, 23)), Some((3, 8)));
        assert_eq!(t.stress_extremes(at(1, 0), at(3, 23)), Some((2, 9)));
        assert_eq!(t.mood_extremes(at(10, 0), at(11, 0)), None);
        assert_eq!(t.latest().map(|l| l.mood_level()), Some(8));
    }

    #[test]
    fn all_returns_independent_copy() {
        let mut t = tracker(vec![log(1, 5, 5)]);
        let mut copy = t.all();
        copy.clear();
        assert_eq!(t.len(), 1);
        t.add(MoodLog::new(at(1, 10) + Duration::hours(1), 6, 6, "").unwrap());
        assert_eq!(t.len(), 2);
    }
}
