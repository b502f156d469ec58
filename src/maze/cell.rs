use std::fmt;

use crate::maze::Position;

/// What occupies a grid cell.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    #[default]
    Wall,
    Path,
    /// Where the player spawns. Exactly one per generated grid.
    Start,
    /// The goal. Exactly one per generated grid.
    Finish,
}

impl CellKind {
    pub const ALL: [CellKind; 4] = [
        CellKind::Wall,
        CellKind::Path,
        CellKind::Start,
        CellKind::Finish,
    ];

    /// Whether a player may stand on this cell.
    pub fn is_walkable(self) -> bool {
        !matches!(self, CellKind::Wall)
    }

    /// Single-character form used by debug dumps and test fixtures.
    pub fn symbol(self) -> char {
        match self {
            CellKind::Wall => '#',
            CellKind::Path => '.',
            CellKind::Start => 'S',
            CellKind::Finish => 'F',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '#' => Some(CellKind::Wall),
            '.' => Some(CellKind::Path),
            'S' => Some(CellKind::Start),
            'F' => Some(CellKind::Finish),
            _ => None,
        }
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A cell together with where it sits, as yielded by [`Grid::iter`](crate::maze::Grid::iter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub kind: CellKind,
    pub position: Position,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_wall_blocks() {
        assert!(!CellKind::Wall.is_walkable());
        assert!(CellKind::Path.is_walkable());
        assert!(CellKind::Start.is_walkable());
        assert!(CellKind::Finish.is_walkable());
    }

    #[test]
    fn test_symbols() {
        for kind in [
            CellKind::Wall,
            CellKind::Path,
            CellKind::Start,
            CellKind::Finish,
        ] {
            assert_eq!(CellKind::from_symbol(kind.symbol()), Some(kind));
        }
        assert_eq!(CellKind::from_symbol('x'), None);
    }
}
