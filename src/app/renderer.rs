use std::{
    io::Write,
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{Receiver, RecvTimeoutError},
    },
    time::Duration,
};

use crossterm::{
    cursor, queue,
    style::{self, Attribute, Color, StyledContent, Stylize},
    terminal::{self, ClearType},
};
use unicode_truncate::UnicodeTruncateStr;

use crate::{
    game::ThemeKind,
    maze::{CellKind, Direction, Position},
};

/// Terminal columns taken by one maze cell.
pub const CELL_WIDTH: u16 = 2;
/// Rows drawn under the maze: status, message and controls.
pub const NUM_INFO_ROWS: u16 = 3;

/// How long the render thread blocks on the channel before checking the stop flag.
const UI_EVENT_RECV_TIMEOUT: Duration = Duration::from_millis(50);

/// Colors for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub wall: Color,
    pub start: Color,
    pub finish: Color,
    pub player: Color,
    pub accent: Color,
}

impl Palette {
    pub fn for_theme(theme: ThemeKind) -> Self {
        match theme {
            ThemeKind::Adventure => Palette {
                wall: Color::DarkGreen,
                start: Color::Green,
                finish: Color::Red,
                player: Color::Yellow,
                accent: Color::Green,
            },
            ThemeKind::Mysterious => Palette {
                wall: Color::DarkMagenta,
                start: Color::Cyan,
                finish: Color::Magenta,
                player: Color::White,
                accent: Color::Magenta,
            },
            ThemeKind::RetroArcade => Palette {
                wall: Color::Blue,
                start: Color::Green,
                finish: Color::Red,
                player: Color::Yellow,
                accent: Color::Cyan,
            },
            ThemeKind::EpicQuest => Palette {
                wall: Color::Grey,
                start: Color::Green,
                finish: Color::DarkYellow,
                player: Color::Yellow,
                accent: Color::Yellow,
            },
            ThemeKind::Chill => Palette {
                wall: Color::DarkCyan,
                start: Color::Green,
                finish: Color::Blue,
                player: Color::White,
                accent: Color::Cyan,
            },
            ThemeKind::SpeedRun => Palette {
                wall: Color::DarkRed,
                start: Color::Green,
                finish: Color::Yellow,
                player: Color::White,
                accent: Color::Red,
            },
            ThemeKind::BossBattle => Palette {
                wall: Color::DarkGrey,
                start: Color::Green,
                finish: Color::Red,
                player: Color::Red,
                accent: Color::DarkRed,
            },
        }
    }
}

/// What occupies a cell on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Cell(CellKind),
    Player(Direction),
}

impl Tile {
    fn symbol(self) -> &'static str {
        match self {
            Tile::Cell(CellKind::Wall) => "██",
            Tile::Cell(CellKind::Path) => "  ",
            Tile::Cell(CellKind::Start) => "S ",
            Tile::Cell(CellKind::Finish) => "F ",
            Tile::Player(Direction::Up) => "▲ ",
            Tile::Player(Direction::Down) => "▼ ",
            Tile::Player(Direction::Left) => "◀ ",
            Tile::Player(Direction::Right) => "▶ ",
        }
    }

    pub fn styled(self, palette: &Palette) -> StyledContent<&'static str> {
        let symbol = self.symbol();

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                symbol.width(),
                CELL_WIDTH as usize,
                "Each cell must occupy exactly two character widths."
            );
        }

        match self {
            Tile::Cell(CellKind::Wall) => symbol.with(palette.wall),
            Tile::Cell(CellKind::Path) => symbol.with(Color::Reset),
            Tile::Cell(CellKind::Start) => symbol.with(palette.start).attribute(Attribute::Bold),
            Tile::Cell(CellKind::Finish) => symbol.with(palette.finish).attribute(Attribute::Bold),
            Tile::Player(_) => symbol.with(palette.player).attribute(Attribute::Bold),
        }
    }
}

/// Which info row a line of text goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoRow {
    Status,
    Message,
    Controls,
}

impl InfoRow {
    fn offset(self) -> u16 {
        match self {
            InfoRow::Status => 0,
            InfoRow::Message => 1,
            InfoRow::Controls => 2,
        }
    }
}

pub enum UiEvent {
    /// Clear the screen for a new grid. Every cell is then sent as a `TileUpdate`.
    GridInit {
        width: u16,
        height: u16,
        palette: Palette,
    },
    TileUpdate {
        position: Position,
        tile: Tile,
    },
    /// Replace an info row. `None` clears it.
    Info {
        row: InfoRow,
        text: Option<String>,
        color: Color,
    },
}

/// Cut `text` to at most `max_width` terminal columns.
pub fn fit_to_width(text: &str, max_width: u16) -> &str {
    text.unicode_truncate(max_width as usize).0
}

/// Screen state the render thread keeps between events.
#[derive(Default)]
struct Screen {
    grid: Option<(u16, u16, Palette)>,
}

impl Screen {
    fn draw<W: Write>(&mut self, out: &mut W, event: UiEvent) -> std::io::Result<()> {
        match event {
            UiEvent::GridInit {
                width,
                height,
                palette,
            } => {
                self.grid = Some((width, height, palette));
                queue!(out, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
            }
            UiEvent::TileUpdate { position, tile } => {
                let Some((width, height, palette)) = self.grid else {
                    return Ok(());
                };
                if position.x >= width || position.y >= height {
                    return Ok(());
                }
                queue!(
                    out,
                    cursor::MoveTo(position.x * CELL_WIDTH, position.y),
                    style::PrintStyledContent(tile.styled(&palette))
                )?;
            }
            UiEvent::Info { row, text, color } => {
                let grid_height = self.grid.map_or(0, |(_, height, _)| height);
                let (term_width, _) = terminal::size()?;
                queue!(
                    out,
                    cursor::MoveTo(0, grid_height + row.offset()),
                    terminal::Clear(ClearType::CurrentLine)
                )?;
                if let Some(text) = text {
                    queue!(
                        out,
                        style::PrintStyledContent(
                            fit_to_width(&text, term_width)
                                .with(color)
                                .attribute(Attribute::Bold)
                        )
                    )?;
                }
            }
        }
        Ok(())
    }
}

/// Draw UI events to stdout until `should_stop` is set or every sender is gone.
pub fn render_ui_events(
    ui_event_rx: Receiver<UiEvent>,
    should_stop: &AtomicBool,
) -> std::io::Result<()> {
    // No other thread writes to stdout while this one runs
    let stdout = std::io::stdout();
    let mut stdout = stdout.lock();
    let mut screen = Screen::default();

    loop {
        if should_stop.load(Ordering::Acquire) {
            while let Ok(event) = ui_event_rx.try_recv() {
                screen.draw(&mut stdout, event)?;
            }
            tracing::debug!("[render] stop flag set, exiting render thread");
            break;
        }
        match ui_event_rx.recv_timeout(UI_EVENT_RECV_TIMEOUT) {
            Ok(event) => {
                screen.draw(&mut stdout, event)?;
                // Batch whatever else is already queued into one flush
                while let Ok(event) = ui_event_rx.try_recv() {
                    screen.draw(&mut stdout, event)?;
                }
            }
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => {
                tracing::debug!("[render] UI event channel closed, exiting render thread");
                break;
            }
        }
        stdout.flush()?;
    }
    stdout.flush()?;
    Ok(())
}
