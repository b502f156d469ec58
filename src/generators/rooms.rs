use rand::Rng;

use crate::{
    error::ConfigError,
    generators::validate_dimensions,
    maze::{CellKind, Grid, Maze, Position},
};

/// One room is placed per this many grid cells.
pub const CELLS_PER_ROOM: u32 = 80;
const MIN_ROOM_SIDE: u16 = 3;
const MAX_ROOM_SIDE: u16 = 6;

/// A rectangle of open floor, `x`/`y` being its top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Room {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Room {
    pub fn center(&self) -> Position {
        Position::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// The cell one step in from the top-left corner.
    pub fn inner_corner(&self) -> Position {
        Position::new(self.x + 1, self.y + 1)
    }

    /// The bottom-right cell.
    pub fn far_corner(&self) -> Position {
        Position::new(self.x + self.width - 1, self.y + self.height - 1)
    }

    fn carve(&self, grid: &mut Grid) {
        (self.y..self.y + self.height).for_each(|y| {
            (self.x..self.x + self.width).for_each(|x| grid.set(Position::new(x, y), CellKind::Path))
        });
    }

    /// Random size and placement fully inside the wall ring. Sides are clamped to what the grid
    /// can hold.
    fn random<R: Rng + ?Sized>(grid_width: u16, grid_height: u16, rng: &mut R) -> Self {
        let width = rng.random_range(MIN_ROOM_SIDE..=MAX_ROOM_SIDE.min(grid_width - 3));
        let height = rng.random_range(MIN_ROOM_SIDE..=MAX_ROOM_SIDE.min(grid_height - 3));
        Room {
            x: 1 + rng.random_range(0..grid_width - width - 2),
            y: 1 + rng.random_range(0..grid_height - height - 2),
            width,
            height,
        }
    }
}

/// Scatter `width * height / 80` rooms and chain them, in placement order, with L-shaped
/// corridors: along the first room's center row, then down the second room's center column.
///
/// Rooms may overlap. Start is one step inside the first room and finish one step inside the
/// last one, or at the last room's far corner when those two coincide.
pub fn rooms_and_corridors<R: Rng + ?Sized>(
    width: u16,
    height: u16,
    rng: &mut R,
) -> Result<Maze, ConfigError> {
    validate_dimensions(width, height)?;
    let room_count = u32::from(width) * u32::from(height) / CELLS_PER_ROOM;
    if width < MIN_ROOM_SIDE + 3 || height < MIN_ROOM_SIDE + 3 || room_count == 0 {
        return Err(ConfigError::TooSmallForRooms { width, height });
    }

    let mut grid = Grid::new(width, height);

    let rooms = (0..room_count)
        .map(|_| Room::random(width, height, &mut *rng))
        .collect::<Vec<_>>();
    rooms.iter().for_each(|room| room.carve(&mut grid));

    rooms.windows(2).for_each(|pair| {
        if let [from, to] = pair {
            carve_corridor(&mut grid, from.center(), to.center());
        }
    });

    let (Some(first), Some(last)) = (rooms.first(), rooms.last()) else {
        return Err(ConfigError::TooSmallForRooms { width, height });
    };
    let start = first.inner_corner();
    let finish = if last.inner_corner() == start {
        last.far_corner()
    } else {
        last.inner_corner()
    };
    tracing::debug!(
        "[generator] {} rooms, start {}, finish {}",
        rooms.len(),
        start,
        finish
    );

    Ok(Maze::new(grid, start, finish))
}

/// Horizontal run on `from`'s row, then a vertical run on `to`'s column. Both runs share
/// the cell `(to.x, from.y)`.
fn carve_corridor(grid: &mut Grid, from: Position, to: Position) {
    (from.x.min(to.x)..=from.x.max(to.x))
        .for_each(|x| grid.set(Position::new(x, from.y), CellKind::Path));
    (from.y.min(to.y)..=from.y.max(to.y))
        .for_each(|y| grid.set(Position::new(to.x, y), CellKind::Path));
}
