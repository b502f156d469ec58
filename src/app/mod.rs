mod renderer;

use std::{
    io::{Stdout, Write},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::{Receiver, RecvTimeoutError, SendError, Sender},
    },
    time::{Duration, Instant},
};

use crossterm::{
    cursor,
    event::{self, KeyCode, KeyEvent},
    queue,
    style::Color,
    terminal::{self, ClearType},
};

use crate::{
    app::renderer::{CELL_WIDTH, InfoRow, NUM_INFO_ROWS, Palette, Tile, UiEvent, render_ui_events},
    game::{GameSession, GameSettings, GameStatus, MoveOutcome, format_elapsed},
    leaderboard::Leaderboard,
    maze::{Direction, Position},
};

const CONTROLS: &str = "←↑↓→/WASD: move   p: pause   r: new maze   q/Esc: quit";

/// A key press, interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Move(Direction),
    TogglePause,
    Reset,
    Quit,
}

fn action_for_key(code: KeyCode) -> Option<Action> {
    let action = match code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => Action::Move(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S') => Action::Move(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A') => Action::Move(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => Action::Move(Direction::Right),
        KeyCode::Char('p' | 'P') => Action::TogglePause,
        KeyCode::Char('r' | 'R') => Action::Reset,
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => Action::Quit,
        _ => return None,
    };
    Some(action)
}

fn status_text(session: &GameSession, now: Instant) -> String {
    let status = match session.status() {
        GameStatus::Playing => "Playing",
        GameStatus::Paused => "Paused",
        GameStatus::Won => "Won",
    };
    let settings = session.settings();
    format!(
        "Moves: {} | Time: {} | {} | {} {}x{} | {}",
        session.moves(),
        format_elapsed(session.elapsed(now)),
        status,
        settings.generator,
        settings.width,
        settings.height,
        settings.theme
    )
}

/// Sending half of the render channel, with the session's palette.
struct Ui {
    tx: Sender<UiEvent>,
    palette: Palette,
}

impl Ui {
    /// Redraw the whole maze with the player on it.
    fn frame(&self, session: &GameSession) -> Result<(), SendError<UiEvent>> {
        let grid = session.grid();
        self.tx.send(UiEvent::GridInit {
            width: grid.width(),
            height: grid.height(),
            palette: self.palette,
        })?;
        for cell in grid.iter() {
            self.tile(cell.position, Tile::Cell(cell.kind))?;
        }
        let player = session.player();
        self.tile(player.position, Tile::Player(player.direction))?;
        self.status(session)?;
        self.message(None, Color::Reset)?;
        self.info(InfoRow::Controls, Some(CONTROLS.to_string()), Color::Cyan)
    }

    fn tile(&self, position: Position, tile: Tile) -> Result<(), SendError<UiEvent>> {
        self.tx.send(UiEvent::TileUpdate { position, tile })
    }

    fn status(&self, session: &GameSession) -> Result<(), SendError<UiEvent>> {
        let color = match session.status() {
            GameStatus::Playing => Color::White,
            GameStatus::Paused => Color::Yellow,
            GameStatus::Won => self.palette.accent,
        };
        self.info(
            InfoRow::Status,
            Some(status_text(session, Instant::now())),
            color,
        )
    }

    fn message(&self, text: Option<String>, color: Color) -> Result<(), SendError<UiEvent>> {
        self.info(InfoRow::Message, text, color)
    }

    fn info(
        &self,
        row: InfoRow,
        text: Option<String>,
        color: Color,
    ) -> Result<(), SendError<UiEvent>> {
        self.tx.send(UiEvent::Info { row, text, color })
    }
}

pub struct App {
    settings: GameSettings,
    player_name: String,
    leaderboard: Leaderboard,
    /// How often the input thread checks the stop flag
    input_poll_timeout: Duration,
    /// How often the status line is refreshed while no key is pressed
    status_tick: Duration,
}

impl App {
    pub fn new(settings: GameSettings, player_name: String) -> Self {
        Self {
            settings,
            player_name,
            leaderboard: Leaderboard::new(),
            input_poll_timeout: Duration::from_millis(100),
            status_tick: Duration::from_millis(250),
        }
    }

    /// Wins recorded while the app ran.
    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    /// Set a panic hook to restore terminal state on panic
    /// This ensures that the terminal is not left in raw mode or alternate screen on panic
    /// even if the panic occurs in a different thread
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = App::restore_terminal(&mut std::io::stdout()); // already failing
            hook(panic_info);
        }));
    }

    /// Setup terminal in raw mode and enter alternate screen
    /// Also sets a panic hook to restore terminal on panic
    pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        App::set_panic_hook();
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Leave alternate screen and disable raw mode
    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
        stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Refuse to start when the maze and its info rows do not fit the terminal.
    fn check_terminal_size(width: u16, height: u16) -> std::io::Result<()> {
        let (term_width, term_height) = terminal::size()?;
        let needed = (
            width.saturating_mul(CELL_WIDTH),
            height.saturating_add(NUM_INFO_ROWS),
        );
        if term_width < needed.0 || term_height < needed.1 {
            return Err(std::io::Error::other(format!(
                "terminal is {}x{} but a {}x{} maze needs {}x{}",
                term_width, term_height, width, height, needed.0, needed.1
            )));
        }
        Ok(())
    }

    /// Play until the user quits. The terminal must already be set up.
    pub fn run(&mut self) -> std::io::Result<()> {
        App::check_terminal_size(self.settings.width, self.settings.height)?;
        let mut session = GameSession::new(self.settings).map_err(std::io::Error::other)?;
        tracing::info!(
            "[app] starting {}x{} game with {} as {}",
            self.settings.width,
            self.settings.height,
            self.settings.generator,
            self.player_name
        );

        // Flag to let threads stop. Set by the main thread only.
        let should_stop = Arc::new(AtomicBool::new(false));

        let (ui_event_tx, ui_event_rx) = std::sync::mpsc::channel::<UiEvent>();
        let should_stop_for_render = should_stop.clone();
        let render_thread_handle = std::thread::spawn(move || -> std::io::Result<()> {
            render_ui_events(ui_event_rx, &should_stop_for_render)
        });

        let (key_event_tx, key_event_rx) = std::sync::mpsc::channel::<KeyEvent>();
        let should_stop_for_input = should_stop.clone();
        let input_poll_timeout = self.input_poll_timeout;
        let input_thread_handle = std::thread::spawn(move || -> std::io::Result<()> {
            listen_to_user_input(key_event_tx, input_poll_timeout, &should_stop_for_input)
        });

        let ui = Ui {
            tx: ui_event_tx,
            palette: Palette::for_theme(self.settings.theme),
        };
        if self.game_loop(&mut session, &key_event_rx, &ui).is_err() {
            tracing::debug!("[app] render thread is gone, leaving game loop");
        }

        should_stop.store(true, Ordering::Release);
        // Closes the channel so the render thread drains and exits
        drop(ui);
        tracing::debug!("[app] waiting for input and render threads to finish");
        input_thread_handle
            .join()
            .map_err(|_| std::io::Error::other("input thread panicked"))??;
        render_thread_handle
            .join()
            .map_err(|_| std::io::Error::other("render thread panicked"))??;
        tracing::info!("[app] exiting");
        Ok(())
    }

    /// Owns every session mutation. Returns when the user quits or the input thread exits.
    fn game_loop(
        &mut self,
        session: &mut GameSession,
        key_event_rx: &Receiver<KeyEvent>,
        ui: &Ui,
    ) -> Result<(), SendError<UiEvent>> {
        ui.frame(session)?;
        loop {
            let key_event = match key_event_rx.recv_timeout(self.status_tick) {
                Ok(key_event) => key_event,
                Err(RecvTimeoutError::Timeout) => {
                    // Keep the clock ticking
                    if session.status() == GameStatus::Playing {
                        ui.status(session)?;
                    }
                    continue;
                }
                Err(RecvTimeoutError::Disconnected) => {
                    tracing::debug!("[app] input thread exited");
                    return Ok(());
                }
            };
            let Some(action) = action_for_key(key_event.code) else {
                continue;
            };
            match action {
                Action::Quit => {
                    tracing::info!("[app] quit requested");
                    return Ok(());
                }
                Action::Move(direction) => {
                    let from = session.player().position;
                    let outcome = session.attempt_move(direction);
                    if let MoveOutcome::Moved(to) | MoveOutcome::Won(to) = outcome {
                        ui.tile(from, Tile::Cell(session.grid()[from]))?;
                        ui.tile(to, Tile::Player(direction))?;
                    }
                    if let MoveOutcome::Won(_) = outcome {
                        self.record_win(session, ui)?;
                    }
                }
                Action::TogglePause => match session.toggle_pause() {
                    GameStatus::Paused => {
                        ui.message(Some("Paused. Press p to resume.".into()), Color::Yellow)?
                    }
                    GameStatus::Playing => ui.message(None, Color::Reset)?,
                    GameStatus::Won => {}
                },
                Action::Reset => match session.reset() {
                    Ok(()) => ui.frame(session)?,
                    Err(e) => {
                        tracing::warn!("[app] reset failed: {}", e);
                        ui.message(Some(e.to_string()), Color::Red)?;
                    }
                },
            }
            ui.status(session)?;
        }
    }

    fn record_win(&mut self, session: &GameSession, ui: &Ui) -> Result<(), SendError<UiEvent>> {
        let Some(result) = session.result() else {
            return Ok(());
        };
        let summary = format!(
            "You win! {} moves in {}.",
            result.moves,
            format_elapsed(result.elapsed)
        );
        let text = match self.leaderboard.record(&self.player_name, result) {
            Ok(Some(rank)) => format!("{} Rank #{}. Press r to play again.", summary, rank + 1),
            Ok(None) => format!("{} Press r to play again.", summary),
            Err(e) => {
                tracing::warn!("[app] win not recorded: {}", e);
                format!("{} Press r to play again.", summary)
            }
        };
        ui.message(Some(text), ui.palette.accent)
    }
}

/// Forward key presses to the main thread.
/// This function runs in a separate thread, and is the only place where user input is read
fn listen_to_user_input(
    key_event_tx: Sender<KeyEvent>,
    event_poll_timeout: Duration,
    should_stop: &AtomicBool,
) -> std::io::Result<()> {
    loop {
        if should_stop.load(Ordering::Acquire) {
            return Ok(());
        }

        if !event::poll(event_poll_timeout)? {
            continue;
        }

        let key_event = match event::read()? {
            event::Event::Key(key_event) if key_event.kind == event::KeyEventKind::Press => {
                key_event
            }
            _ => continue,
        };
        let should_exit = action_for_key(key_event.code) == Some(Action::Quit);

        if key_event_tx.send(key_event).is_err() {
            // Receiver has been dropped, exit the thread
            return Ok(());
        }

        if should_exit {
            tracing::debug!("[input] quit key pressed, exiting");
            return Ok(());
        }
    }
}
