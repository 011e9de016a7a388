use std::time::{Duration, Instant};

use crate::leaderboard::{ScoreRecord, ScoreSink};

/// Default points per food item
pub const DEFAULT_POINTS: u32 = 10;

/// Score and play time of one session
#[derive(Debug, Clone)]
pub struct ScoreTracker {
    score: u32,
    default_points: u32,
    start_time: Instant,
    current_time: Instant,
}

impl ScoreTracker {
    pub fn new(default_points: u32) -> Self {
        let now = Instant::now();
        Self {
            score: 0,
            default_points,
            start_time: now,
            current_time: now,
        }
    }

    /// Reset the score and start the clock now
    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    pub fn start_at(&mut self, now: Instant) {
        self.score = 0;
        self.start_time = now;
        self.current_time = now;
    }

    /// Add `points`, or the default value when `None`, and return the new total
    pub fn add_points(&mut self, points: Option<u32>) -> u32 {
        self.score = self
            .score
            .saturating_add(points.unwrap_or(self.default_points));
        self.score
    }

    /// Sample the clock and return the formatted play time
    pub fn sample_elapsed(&mut self) -> String {
        self.sample_elapsed_at(Instant::now())
    }

    pub fn sample_elapsed_at(&mut self, now: Instant) -> String {
        self.current_time = now;
        self.formatted_elapsed()
    }

    /// Play time as of the last sample
    pub fn elapsed(&self) -> Duration {
        self.current_time.saturating_duration_since(self.start_time)
    }

    pub fn formatted_elapsed(&self) -> String {
        format_elapsed(self.elapsed())
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Hand the session to the leaderboard. Nothing is sent for a zero score.
    pub fn submit(&self, player: &str, sink: &mut dyn ScoreSink) -> bool {
        if self.score == 0 {
            return false;
        }

        sink.submit(ScoreRecord {
            name: player.to_string(),
            time: self.elapsed().as_secs_f64(),
            score: self.score,
        });
        true
    }
}

impl Default for ScoreTracker {
    fn default() -> Self {
        Self::new(DEFAULT_POINTS)
    }
}

/// Whole seconds as `"{m}m {s}s"`, dropping the minutes when there are none
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    if minutes == 0 {
        format!("{}s", seconds)
    } else {
        format!("{}m {}s", minutes, seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        assert_eq!(format_elapsed(Duration::from_secs(0)), "0s");
        assert_eq!(format_elapsed(Duration::from_millis(5999)), "5s");
        assert_eq!(format_elapsed(Duration::from_secs(125)), "2m 5s");
        assert_eq!(format_elapsed(Duration::from_secs(3661)), "61m 1s");
    }

    #[test]
    fn test_points_and_elapsed_scenario() {
        let t0 = Instant::now();
        let mut tracker = ScoreTracker::default();
        tracker.start_at(t0);

        assert_eq!(tracker.add_points(None), 10);
        assert_eq!(tracker.add_points(None), 20);
        assert_eq!(
            tracker.sample_elapsed_at(t0 + Duration::from_millis(5000)),
            "5s"
        );
    }

    #[test]
    fn test_explicit_points_and_custom_default() {
        let mut tracker = ScoreTracker::new(25);
        tracker.start();
        assert_eq!(tracker.add_points(None), 25);
        assert_eq!(tracker.add_points(Some(3)), 28);
    }

    #[test]
    fn test_score_never_decreases_until_restart() {
        let mut tracker = ScoreTracker::default();
        tracker.start();
        let mut last = 0;
        for points in [None, Some(0), Some(5), None] {
            let total = tracker.add_points(points);
            assert!(total >= last);
            last = total;
        }

        tracker.start();
        assert_eq!(tracker.score(), 0);
    }

    #[test]
    fn test_zero_score_not_submitted() {
        let mut sink: Vec<ScoreRecord> = Vec::new();
        let mut tracker = ScoreTracker::default();
        tracker.start();

        assert!(!tracker.submit("nobody", &mut sink));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_positive_score_submitted_once() {
        let t0 = Instant::now();
        let mut sink: Vec<ScoreRecord> = Vec::new();
        let mut tracker = ScoreTracker::default();
        tracker.start_at(t0);
        tracker.add_points(Some(15));
        tracker.sample_elapsed_at(t0 + Duration::from_secs(42));

        assert!(tracker.submit("ana", &mut sink));
        assert_eq!(
            sink,
            vec![ScoreRecord {
                name: "ana".to_string(),
                time: 42.0,
                score: 15,
            }]
        );
    }
}
