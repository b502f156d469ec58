pub mod cell;
pub mod grid;

use std::fmt;

pub use cell::{Cell, CellKind};
pub use grid::Grid;

/// Grid coordinates: `x` is the column, `y` the row, `(0, 0)` the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: u16,
    pub y: u16,
}

impl Position {
    pub const fn new(x: u16, y: u16) -> Self {
        Position { x, y }
    }

    /// The position `distance` cells away in `direction`, or `None` when that would leave the
    /// coordinate space. Whether the result lies inside a particular grid is up to the caller.
    pub fn step(self, direction: Direction, distance: u16) -> Option<Position> {
        let Position { x, y } = self;
        match direction {
            Direction::Up => y.checked_sub(distance).map(|y| Position { x, y }),
            Direction::Down => y.checked_add(distance).map(|y| Position { x, y }),
            Direction::Left => x.checked_sub(distance).map(|x| Position { x, y }),
            Direction::Right => x.checked_add(distance).map(|x| Position { x, y }),
        }
    }

    /// The cell halfway between two positions on the same row or column.
    pub fn midpoint(self, other: Position) -> Position {
        Position {
            x: self.x.min(other.x) + self.x.abs_diff(other.x) / 2,
            y: self.y.min(other.y) + self.y.abs_diff(other.y) / 2,
        }
    }

    pub fn manhattan_distance(self, other: Position) -> u32 {
        u32::from(self.x.abs_diff(other.x)) + u32::from(self.y.abs_diff(other.y))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Cardinal directions in the order neighbors are enumerated.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit vector `(dx, dy)` with `y` growing downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

/// A generated grid together with its designated endpoints.
///
/// Only generators build mazes, so a `Maze` always has exactly one [`CellKind::Start`] and one
/// [`CellKind::Finish`], both inside the wall ring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    grid: Grid,
    start: Position,
    finish: Position,
}

impl Maze {
    /// Stamp the endpoints onto a carved grid.
    pub(crate) fn new(mut grid: Grid, start: Position, finish: Position) -> Self {
        grid.set(start, CellKind::Start);
        grid.set(finish, CellKind::Finish);
        Maze {
            grid,
            start,
            finish,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn finish(&self) -> Position {
        self.finish
    }

    pub fn width(&self) -> u16 {
        self.grid.width()
    }

    pub fn height(&self) -> u16 {
        self.grid.height()
    }

    #[cfg(test)]
    pub(crate) fn from_ascii(rows: &[&str]) -> Self {
        let grid = Grid::from_ascii(rows);
        let start = grid.find_start().expect("fixture has no start");
        let finish = grid.find_finish().expect("fixture has no finish");
        Maze {
            grid,
            start,
            finish,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_is_overflow_safe() {
        let origin = Position::new(0, 0);
        assert_eq!(origin.step(Direction::Up, 1), None);
        assert_eq!(origin.step(Direction::Left, 2), None);
        assert_eq!(origin.step(Direction::Right, 2), Some(Position::new(2, 0)));
        assert_eq!(origin.step(Direction::Down, 1), Some(Position::new(0, 1)));
        assert_eq!(Position::new(3, u16::MAX).step(Direction::Down, 1), None);
    }

    #[test]
    fn test_step_matches_delta() {
        let center = Position::new(5, 5);
        for direction in Direction::ALL {
            let (dx, dy) = direction.delta();
            let stepped = center.step(direction, 1).unwrap();
            assert_eq!(i32::from(stepped.x) - 5, dx);
            assert_eq!(i32::from(stepped.y) - 5, dy);
        }
    }

    #[test]
    fn test_midpoint_and_distance() {
        assert_eq!(
            Position::new(1, 1).midpoint(Position::new(3, 1)),
            Position::new(2, 1)
        );
        assert_eq!(
            Position::new(3, 5).midpoint(Position::new(3, 3)),
            Position::new(3, 4)
        );
        assert_eq!(Position::new(1, 1).manhattan_distance(Position::new(4, 3)), 5);
    }

    #[test]
    fn test_maze_stamps_endpoints() {
        let mut grid = Grid::new(5, 5);
        grid.set(Position::new(2, 2), CellKind::Path);
        let maze = Maze::new(grid, Position::new(1, 1), Position::new(3, 3));
        assert_eq!(maze.grid()[maze.start()], CellKind::Start);
        assert_eq!(maze.grid()[maze.finish()], CellKind::Finish);
        assert_eq!(maze.grid().count(CellKind::Path), 1);
    }
}
