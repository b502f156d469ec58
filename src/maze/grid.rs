use crate::{
    error::BoundsError,
    maze::{
        Direction, Position,
        cell::{Cell, CellKind},
    },
};

/// Rectangular cell storage, addressed by `(x, y)` with `x` the column and `y` the row.
///
/// Dimensions are fixed at creation. A freshly created grid is all walls; generators carve it and
/// hand it over to a [`Maze`](crate::maze::Maze), after which it is only read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    data: Box<[CellKind]>,
    width: u16,
    height: u16,
}

impl Grid {
    pub fn new(width: u16, height: u16) -> Self {
        let data = vec![CellKind::Wall; width as usize * height as usize].into_boxed_slice();
        Grid {
            data,
            width,
            height,
        }
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Whether `pos` lies on the outer ring, which every generator leaves as wall.
    pub fn is_boundary(&self, pos: Position) -> bool {
        pos.x == 0
            || pos.y == 0
            || u32::from(pos.x) + 1 == u32::from(self.width)
            || u32::from(pos.y) + 1 == u32::from(self.height)
    }

    /// In bounds and off the outer ring.
    pub fn is_interior(&self, pos: Position) -> bool {
        self.is_in_bounds(pos) && !self.is_boundary(pos)
    }

    fn ravel_index(&self, pos: Position) -> usize {
        // Overflow-safe since width and height are u16 (assuming usize is at least 32 bits)
        pos.y as usize * self.width as usize + pos.x as usize
    }

    /// Bounds-checked lookup.
    pub fn get(&self, pos: Position) -> Result<CellKind, BoundsError> {
        if self.is_in_bounds(pos) {
            Ok(self.data[self.ravel_index(pos)])
        } else {
            Err(BoundsError {
                x: pos.x,
                y: pos.y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Whether a player could stand at `pos`. Out of bounds counts as blocked.
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.get(pos).is_ok_and(CellKind::is_walkable)
    }

    pub(crate) fn set(&mut self, pos: Position, kind: CellKind) {
        let idx = self.ravel_index(pos);
        self.data[idx] = kind;
    }

    /// Cells `step` cells away from `pos` in each cardinal direction, in the order up, right,
    /// down, left, keeping only those inside the grid.
    pub fn neighbors(&self, pos: Position, step: u16) -> impl Iterator<Item = Position> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| pos.step(direction, step))
            .filter(|&neighbor| self.is_in_bounds(neighbor))
    }

    /// Number of walkable cells directly adjacent to `pos`.
    pub fn open_neighbor_count(&self, pos: Position) -> usize {
        self.neighbors(pos, 1)
            .filter(|&neighbor| self[neighbor].is_walkable())
            .count()
    }

    /// All cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.data.iter().enumerate().map(|(idx, &kind)| Cell {
            kind,
            position: Position::new(
                (idx % self.width as usize) as u16,
                (idx / self.width as usize) as u16,
            ),
        })
    }

    /// The cells of row `y`, left to right.
    ///
    /// # Panics
    /// If `y` is not a row of the grid.
    pub fn row(&self, y: u16) -> &[CellKind] {
        let start = y as usize * self.width as usize;
        &self.data[start..start + self.width as usize]
    }

    pub fn count(&self, kind: CellKind) -> usize {
        self.data.iter().filter(|&&cell| cell == kind).count()
    }

    /// Scan for the first cell of the given kind in row-major order.
    pub fn find(&self, kind: CellKind) -> Option<Position> {
        self.iter()
            .find(|cell| cell.kind == kind)
            .map(|cell| cell.position)
    }

    pub fn find_start(&self) -> Option<Position> {
        self.find(CellKind::Start)
    }

    pub fn find_finish(&self) -> Option<Position> {
        self.find(CellKind::Finish)
    }

    /// Parse a grid from rows of [`CellKind::symbol`] characters.
    #[cfg(test)]
    pub(crate) fn from_ascii(rows: &[&str]) -> Self {
        let height = rows.len() as u16;
        let width = rows.first().map_or(0, |row| row.chars().count()) as u16;
        let mut grid = Grid::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.chars().count(), width as usize, "ragged row {y}");
            for (x, symbol) in row.chars().enumerate() {
                let kind = CellKind::from_symbol(symbol).expect("unknown cell symbol");
                grid.set(Position::new(x as u16, y as u16), kind);
            }
        }
        grid
    }
}

impl std::ops::Index<Position> for Grid {
    type Output = CellKind;

    /// Unchecked-by-contract access for callers that already validated `index`.
    /// Still panics rather than reading a neighboring row when `x` overflows the width.
    fn index(&self, index: Position) -> &Self::Output {
        assert!(
            self.is_in_bounds(index),
            "position ({}, {}) is outside the {}x{} grid",
            index.x,
            index.y,
            self.width,
            self.height
        );
        &self.data[self.ravel_index(index)]
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in 0..self.height {
            for kind in self.row(y) {
                write!(f, "{kind}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
