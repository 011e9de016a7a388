//! Leaderboard collaborator
//!
//! The simulation only ever calls [`ScoreSink::submit`] and never waits on
//! the outcome. Ranking is by score descending, ties broken by the faster
//! time, and only the best [`MAX_ENTRIES`] records are kept.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Number of records a leaderboard keeps
pub const MAX_ENTRIES: usize = 5;

/// A finished session as submitted to the leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub name: String,
    /// Elapsed play time in seconds
    pub time: f64,
    pub score: u32,
}

impl ScoreRecord {
    fn ranks_above(&self, other: &ScoreRecord) -> bool {
        self.score > other.score || (self.score == other.score && self.time < other.time)
    }
}

/// Fire-and-forget destination for finished sessions
pub trait ScoreSink {
    fn submit(&mut self, record: ScoreRecord);
}

/// Sink that drops every record, for sessions without a leaderboard
#[derive(Debug, Default, Clone, Copy)]
pub struct Discard;

impl ScoreSink for Discard {
    fn submit(&mut self, _record: ScoreRecord) {}
}

impl ScoreSink for Vec<ScoreRecord> {
    fn submit(&mut self, record: ScoreRecord) {
        self.push(record);
    }
}

/// In-memory top-N table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<ScoreRecord>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record at its rank and drop whatever falls past the cap
    ///
    /// A record tied on both score and time goes after the existing one.
    pub fn insert(&mut self, record: ScoreRecord) {
        let index = self
            .entries
            .iter()
            .position(|entry| record.ranks_above(entry))
            .unwrap_or(self.entries.len());
        self.entries.insert(index, record);
        self.entries.truncate(MAX_ENTRIES);
    }

    /// Best records first
    pub fn entries(&self) -> &[ScoreRecord] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ScoreSink for Leaderboard {
    fn submit(&mut self, record: ScoreRecord) {
        self.insert(record);
    }
}

/// Leaderboard mirrored to a JSON file after every submission
#[derive(Debug)]
pub struct FileLeaderboard {
    path: PathBuf,
    board: Leaderboard,
}

impl FileLeaderboard {
    /// Open the leaderboard stored at `path`, starting empty if the file does not exist
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let board = if path.exists() {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read leaderboard from {:?}", path))?;
            serde_json::from_str(&json)
                .with_context(|| format!("Failed to parse leaderboard {:?}", path))?
        } else {
            Leaderboard::new()
        };

        Ok(Self { path, board })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn board(&self) -> &Leaderboard {
        &self.board
    }

    /// Write the current table to disk
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
        }

        let json = serde_json::to_string_pretty(&self.board)
            .context("Failed to serialize leaderboard")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write leaderboard to {:?}", self.path))?;
        Ok(())
    }
}

impl ScoreSink for FileLeaderboard {
    fn submit(&mut self, record: ScoreRecord) {
        self.board.insert(record);
        match self.save() {
            Ok(()) => debug!(path = ?self.path, "leaderboard saved"),
            Err(err) => warn!("leaderboard submission not persisted: {err:#}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(name: &str, time: f64, score: u32) -> ScoreRecord {
        ScoreRecord {
            name: name.to_string(),
            time,
            score,
        }
    }

    fn names(board: &Leaderboard) -> Vec<&str> {
        board.entries().iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_ranked_by_score_then_time() {
        let mut board = Leaderboard::new();
        board.insert(record("slow", 40.0, 30));
        board.insert(record("best", 90.0, 50));
        board.insert(record("fast", 20.0, 30));
        board.insert(record("low", 5.0, 10));

        assert_eq!(names(&board), vec!["best", "fast", "slow", "low"]);
    }

    #[test]
    fn test_capped_at_five() {
        let mut board = Leaderboard::new();
        for score in [10, 60, 20, 50, 30, 40] {
            board.insert(record(&score.to_string(), 1.0, score));
        }

        assert_eq!(board.len(), MAX_ENTRIES);
        assert_eq!(names(&board), vec!["60", "50", "40", "30", "20"]);

        // Too low to enter a full table.
        board.insert(record("late", 1.0, 5));
        assert!(board.entries().iter().all(|r| r.name != "late"));
    }

    #[test]
    fn test_exact_tie_goes_after_existing() {
        let mut board = Leaderboard::new();
        board.insert(record("first", 10.0, 20));
        board.insert(record("second", 10.0, 20));
        assert_eq!(names(&board), vec!["first", "second"]);
    }

    #[test]
    fn test_file_leaderboard_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores").join("board.json");

        let mut board = FileLeaderboard::open(&path).unwrap();
        assert!(board.board().is_empty());
        board.submit(record("ana", 12.5, 40));
        board.submit(record("bo", 8.0, 40));
        assert!(path.exists());

        let reopened = FileLeaderboard::open(&path).unwrap();
        assert_eq!(names(reopened.board()), vec!["bo", "ana"]);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("board.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(FileLeaderboard::open(&path).is_err());
    }

    #[test]
    fn test_vec_sink_collects() {
        let mut sink: Vec<ScoreRecord> = Vec::new();
        sink.submit(record("a", 1.0, 10));
        assert_eq!(sink.len(), 1);
    }
}
