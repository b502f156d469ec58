use std::time::{Duration, Instant};

use rand::rngs::StdRng;

use crate::{
    error::ConfigError,
    game::{
        GameResult, GameSettings, GameStatus, Player,
        movement::{MoveOutcome, PlayState, apply_move},
    },
    generators::{generate, get_rng},
    maze::{Direction, Grid, Maze},
};

/// One play-through of one maze.
///
/// Owns its maze and player outright; every change goes through [`attempt_move`],
/// [`toggle_pause`], [`reset`] or [`new_game`].
///
/// [`attempt_move`]: GameSession::attempt_move
/// [`toggle_pause`]: GameSession::toggle_pause
/// [`reset`]: GameSession::reset
/// [`new_game`]: GameSession::new_game
pub struct GameSession {
    settings: GameSettings,
    maze: Maze,
    state: PlayState,
    started_at: Instant,
    /// Kept across resets so a seeded session replays the same sequence of mazes.
    rng: StdRng,
}

impl GameSession {
    /// Generate a maze from `settings` and start playing it.
    pub fn new(settings: GameSettings) -> Result<Self, ConfigError> {
        let mut rng = get_rng(settings.seed);
        let maze = generate(settings.generator, settings.width, settings.height, &mut rng)?;
        tracing::info!(
            "[session] new {}x{} game with {}",
            settings.width,
            settings.height,
            settings.generator
        );
        Ok(GameSession {
            settings,
            state: PlayState::new(maze.start()),
            maze,
            started_at: Instant::now(),
            rng,
        })
    }

    #[cfg(test)]
    pub(crate) fn from_maze(settings: GameSettings, maze: Maze) -> Self {
        GameSession {
            settings,
            state: PlayState::new(maze.start()),
            maze,
            started_at: Instant::now(),
            rng: get_rng(settings.seed),
        }
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn grid(&self) -> &Grid {
        self.maze.grid()
    }

    pub fn player(&self) -> Player {
        self.state.player
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn moves(&self) -> u32 {
        self.state.moves
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<Instant> {
        self.state.finished_at
    }

    /// Snapshot of everything a move can change.
    pub fn state(&self) -> PlayState {
        self.state
    }

    /// Step the player one cell. Walls, the grid edge, a paused game and a won game all leave
    /// the session untouched.
    pub fn attempt_move(&mut self, direction: Direction) -> MoveOutcome {
        let (next, outcome) = apply_move(self.maze.grid(), self.state, direction, Instant::now());
        self.state = next;
        match outcome {
            MoveOutcome::Moved(to) => {
                tracing::debug!("[session] moved {} to {}", direction, to);
            }
            MoveOutcome::Won(to) => {
                tracing::info!(
                    "[session] finish reached at {} in {} moves, {:?}",
                    to,
                    self.state.moves,
                    self.elapsed(Instant::now())
                );
            }
            MoveOutcome::Blocked => {
                tracing::debug!("[session] move {} blocked", direction);
            }
            MoveOutcome::Ignored(status) => {
                tracing::debug!("[session] move {} ignored while {:?}", direction, status);
            }
        }
        outcome
    }

    /// Switch between playing and paused. No effect once won.
    pub fn toggle_pause(&mut self) -> GameStatus {
        self.state.status = match self.state.status {
            GameStatus::Playing => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Playing,
            GameStatus::Won => GameStatus::Won,
        };
        tracing::debug!("[session] status is now {:?}", self.state.status);
        self.state.status
    }

    /// Throw the current game away and start over on a freshly generated maze.
    pub fn reset(&mut self) -> Result<(), ConfigError> {
        let maze = generate(
            self.settings.generator,
            self.settings.width,
            self.settings.height,
            &mut self.rng,
        )?;
        tracing::info!(
            "[session] reset to a new {}x{} maze with {}",
            self.settings.width,
            self.settings.height,
            self.settings.generator
        );
        self.state = PlayState::new(maze.start());
        self.maze = maze;
        self.started_at = Instant::now();
        Ok(())
    }

    /// Like [`reset`](GameSession::reset), with new settings. On error the current game is
    /// kept as it was.
    pub fn new_game(&mut self, settings: GameSettings) -> Result<(), ConfigError> {
        *self = GameSession::new(settings)?;
        Ok(())
    }

    /// Time played: up to the win once won, otherwise up to `now`.
    pub fn elapsed(&self, now: Instant) -> Duration {
        self.state
            .finished_at
            .unwrap_or(now)
            .saturating_duration_since(self.started_at)
    }

    /// Moves and time for the leaderboard. Only available once the game is won.
    pub fn result(&self) -> Option<GameResult> {
        self.state.finished_at.map(|finished_at| GameResult {
            moves: self.state.moves,
            elapsed: finished_at.saturating_duration_since(self.started_at),
        })
    }
}
