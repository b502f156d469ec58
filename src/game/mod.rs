pub mod movement;
pub mod session;
pub mod settings;

use std::time::Duration;

use crate::maze::{Direction, Position};

pub use movement::{MoveOutcome, PlayState, Step, apply_move, evaluate_step};
pub use session::GameSession;
pub use settings::{GameSettings, ThemeKind};

/// Where the player stands and which way they last moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    pub position: Position,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Paused,
    /// Terminal until the session is reset.
    Won,
}

/// What a won game hands to the leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
    pub moves: u32,
    pub elapsed: Duration,
}

/// `M:SS`, minutes unpadded.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::ZERO), "0:00");
        assert_eq!(format_elapsed(Duration::from_millis(59_999)), "0:59");
        assert_eq!(format_elapsed(Duration::from_secs(61)), "1:01");
        assert_eq!(format_elapsed(Duration::from_secs(3600 + 5)), "60:05");
    }
}
