//! Move validation and application.
//!
//! Everything here is a pure function of the maze and the mutable part of a session, so a move
//! is either applied as a whole (position, facing, move count, status, end time) or not at all.

use std::time::Instant;

use crate::{
    game::{GameStatus, Player},
    maze::{CellKind, Direction, Grid, Position},
};

/// What a single step would land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Off the grid or into a wall.
    Blocked,
    Open(Position),
    Finish(Position),
}

/// Classify the cell one step from `from` in `direction`.
pub fn evaluate_step(grid: &Grid, from: Position, direction: Direction) -> Step {
    let Some(target) = from.step(direction, 1) else {
        return Step::Blocked;
    };
    match grid.get(target) {
        Err(_) | Ok(CellKind::Wall) => Step::Blocked,
        Ok(CellKind::Finish) => Step::Finish(target),
        Ok(CellKind::Path | CellKind::Start) => Step::Open(target),
    }
}

/// The part of a session a move can change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayState {
    pub player: Player,
    pub status: GameStatus,
    pub moves: u32,
    /// Set once, on the move that reaches the finish.
    pub finished_at: Option<Instant>,
}

impl PlayState {
    pub fn new(start: Position) -> Self {
        PlayState {
            player: Player {
                position: start,
                direction: Direction::Right,
            },
            status: GameStatus::Playing,
            moves: 0,
            finished_at: None,
        }
    }
}

/// Result of a move attempt, for callers that want more than a before/after diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved(Position),
    /// Moved onto the finish; the game is now won.
    Won(Position),
    /// Wall or grid edge in the way.
    Blocked,
    /// The game is paused or already won.
    Ignored(GameStatus),
}

impl MoveOutcome {
    pub fn is_accepted(self) -> bool {
        matches!(self, MoveOutcome::Moved(_) | MoveOutcome::Won(_))
    }
}

/// Apply a move to `state`, returning the next state and what happened.
/// On anything but an accepted move the returned state equals `state`.
pub fn apply_move(
    grid: &Grid,
    state: PlayState,
    direction: Direction,
    now: Instant,
) -> (PlayState, MoveOutcome) {
    if state.status != GameStatus::Playing {
        return (state, MoveOutcome::Ignored(state.status));
    }

    let (target, reached_finish) = match evaluate_step(grid, state.player.position, direction) {
        Step::Blocked => return (state, MoveOutcome::Blocked),
        Step::Open(target) => (target, false),
        Step::Finish(target) => (target, true),
    };

    let next = PlayState {
        player: Player {
            position: target,
            direction,
        },
        status: if reached_finish {
            GameStatus::Won
        } else {
            GameStatus::Playing
        },
        moves: state.moves + 1,
        finished_at: if reached_finish {
            Some(now)
        } else {
            state.finished_at
        },
    };
    let outcome = if reached_finish {
        MoveOutcome::Won(target)
    } else {
        MoveOutcome::Moved(target)
    };
    (next, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor() -> Grid {
        Grid::from_ascii(&[
            "######", //
            "#S..F#", //
            "#.####", //
            "######",
        ])
    }

    #[test]
    fn test_evaluate_step() {
        let grid = corridor();
        let start = Position::new(1, 1);
        assert_eq!(
            evaluate_step(&grid, start, Direction::Right),
            Step::Open(Position::new(2, 1))
        );
        assert_eq!(
            evaluate_step(&grid, start, Direction::Down),
            Step::Open(Position::new(1, 2))
        );
        assert_eq!(evaluate_step(&grid, start, Direction::Up), Step::Blocked);
        assert_eq!(
            evaluate_step(&grid, Position::new(3, 1), Direction::Right),
            Step::Finish(Position::new(4, 1))
        );
        // Stepping off the top-left corner of the coordinate space
        assert_eq!(
            evaluate_step(&grid, Position::new(0, 0), Direction::Left),
            Step::Blocked
        );
        // Stepping off the far edge of the grid
        assert_eq!(
            evaluate_step(&grid, Position::new(5, 2), Direction::Right),
            Step::Blocked
        );
    }

    #[test]
    fn test_blocked_move_changes_nothing() {
        let grid = corridor();
        let state = PlayState::new(Position::new(1, 1));
        let (next, outcome) = apply_move(&grid, state, Direction::Left, Instant::now());
        assert_eq!(outcome, MoveOutcome::Blocked);
        assert_eq!(next, state);
        assert!(!outcome.is_accepted());
    }

    #[test]
    fn test_accepted_move_updates_everything_together() {
        let grid = corridor();
        let state = PlayState::new(Position::new(1, 1));
        let (next, outcome) = apply_move(&grid, state, Direction::Down, Instant::now());
        assert_eq!(outcome, MoveOutcome::Moved(Position::new(1, 2)));
        assert_eq!(next.player.position, Position::new(1, 2));
        assert_eq!(next.player.direction, Direction::Down);
        assert_eq!(next.moves, 1);
        assert_eq!(next.status, GameStatus::Playing);
        assert_eq!(next.finished_at, None);
    }

    #[test]
    fn test_reaching_finish_wins_once() {
        let grid = corridor();
        let now = Instant::now();
        let mut state = PlayState::new(Position::new(1, 1));
        for _ in 0..2 {
            state = apply_move(&grid, state, Direction::Right, now).0;
        }
        let (won, outcome) = apply_move(&grid, state, Direction::Right, now);
        assert_eq!(outcome, MoveOutcome::Won(Position::new(4, 1)));
        assert_eq!(won.status, GameStatus::Won);
        assert_eq!(won.finished_at, Some(now));
        assert_eq!(won.moves, 3);

        // Won is terminal for moves
        let later = now + std::time::Duration::from_secs(5);
        let (after, outcome) = apply_move(&grid, won, Direction::Left, later);
        assert_eq!(outcome, MoveOutcome::Ignored(GameStatus::Won));
        assert_eq!(after, won);
    }

    #[test]
    fn test_paused_ignores_moves() {
        let grid = corridor();
        let mut state = PlayState::new(Position::new(1, 1));
        state.status = GameStatus::Paused;
        let (next, outcome) = apply_move(&grid, state, Direction::Right, Instant::now());
        assert_eq!(outcome, MoveOutcome::Ignored(GameStatus::Paused));
        assert_eq!(next, state);
    }
}
