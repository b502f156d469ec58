//! Best times, kept in memory. Serializable so a front-end can persist it wherever it likes.

use serde::{Deserialize, Serialize};

use crate::{error::NameError, game::GameResult};

pub const MAX_ENTRIES: usize = 100;
pub const MIN_NAME_CHARS: usize = 2;
pub const MAX_NAME_CHARS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player_name: String,
    pub time_ms: u64,
    pub moves: u32,
}

/// Entries sorted fastest first, ties going to fewer moves, then to whoever got there first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a won game under `name`. Returns the 0-based rank, or `None` when the board is full
    /// and the result did not make it.
    pub fn record(&mut self, name: &str, result: GameResult) -> Result<Option<usize>, NameError> {
        let player_name = validate_player_name(name)?;
        let entry = LeaderboardEntry {
            player_name,
            time_ms: u64::try_from(result.elapsed.as_millis()).unwrap_or(u64::MAX),
            moves: result.moves,
        };
        // Equal keys land after existing entries
        let rank = self
            .entries
            .partition_point(|e| (e.time_ms, e.moves) <= (entry.time_ms, entry.moves));
        if rank >= MAX_ENTRIES {
            tracing::debug!("[leaderboard] {} did not make the board", entry.player_name);
            return Ok(None);
        }
        tracing::info!(
            "[leaderboard] {} ranked #{} with {} ms in {} moves",
            entry.player_name,
            rank + 1,
            entry.time_ms,
            entry.moves
        );
        self.entries.insert(rank, entry);
        self.entries.truncate(MAX_ENTRIES);
        Ok(Some(rank))
    }

    pub fn top(&self, n: usize) -> &[LeaderboardEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Trim, and collapse inner runs of whitespace into single spaces.
pub fn sanitize_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Sanitize `name` and check it is fit for the board.
pub fn validate_player_name(name: &str) -> Result<String, NameError> {
    let name = sanitize_name(name);
    let chars = name.chars().count();
    if chars == 0 {
        return Err(NameError::Empty);
    }
    if chars < MIN_NAME_CHARS {
        return Err(NameError::TooShort {
            min: MIN_NAME_CHARS,
        });
    }
    if chars > MAX_NAME_CHARS {
        return Err(NameError::TooLong {
            max: MAX_NAME_CHARS,
        });
    }
    if !name.chars().any(char::is_alphanumeric) {
        return Err(NameError::NoAlphanumeric);
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn result(secs: u64, moves: u32) -> GameResult {
        GameResult {
            moves,
            elapsed: Duration::from_secs(secs),
        }
    }

    #[test]
    fn test_validate_player_name() {
        assert_eq!(validate_player_name("  Ada   Lovelace "), Ok("Ada Lovelace".into()));
        assert_eq!(validate_player_name("   "), Err(NameError::Empty));
        assert_eq!(
            validate_player_name("x"),
            Err(NameError::TooShort { min: 2 })
        );
        assert_eq!(
            validate_player_name("abcdefghijklmnopqrstu"),
            Err(NameError::TooLong { max: 20 })
        );
        assert_eq!(validate_player_name("!!"), Err(NameError::NoAlphanumeric));
        // Counted in characters, not bytes
        assert!(validate_player_name("éééééééééééééééééééé").is_ok());
    }

    #[test]
    fn test_record_keeps_order() {
        let mut board = Leaderboard::new();
        assert_eq!(board.record("slow", result(90, 40)), Ok(Some(0)));
        assert_eq!(board.record("fast", result(30, 50)), Ok(Some(0)));
        assert_eq!(board.record("tidy", result(30, 20)), Ok(Some(0)));
        assert_eq!(board.record("late", result(30, 20)), Ok(Some(1)));
        let names = board
            .entries()
            .iter()
            .map(|e| e.player_name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, ["tidy", "late", "fast", "slow"]);
        assert_eq!(board.top(2).len(), 2);
        assert_eq!(board.top(10).len(), 4);
    }

    #[test]
    fn test_bad_name_is_not_recorded() {
        let mut board = Leaderboard::new();
        assert!(board.record("?", result(1, 1)).is_err());
        assert!(board.is_empty());
    }

    #[test]
    fn test_board_is_capped() {
        let mut board = Leaderboard::new();
        for secs in 0..MAX_ENTRIES as u64 {
            board.record("runner", result(secs, 10)).unwrap();
        }
        assert_eq!(board.record("slowpoke", result(1000, 1)), Ok(None));
        assert_eq!(board.record("quick", result(0, 1)), Ok(Some(0)));
        assert_eq!(board.len(), MAX_ENTRIES);
        assert_eq!(board.entries().last().map(|e| e.time_ms), Some(98_000));

        board.clear();
        assert!(board.is_empty());
    }

    #[test]
    fn test_serde_round_trip() {
        let mut board = Leaderboard::new();
        board.record("ada", result(12, 34)).unwrap();
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(
            json,
            r#"{"entries":[{"player_name":"ada","time_ms":12000,"moves":34}]}"#
        );
        let back: Leaderboard = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
    }
}
