use rand::Rng;

use crate::{
    error::ConfigError,
    generators::{conventional_endpoints, validate_dimensions},
    maze::{CellKind, Grid, Maze, Position},
};

/// Chance that an interior cell becomes a wall.
pub const WALL_PROBABILITY: f64 = 0.2;

/// Every interior cell other than the endpoints independently becomes a wall with
/// [`WALL_PROBABILITY`], otherwise a path.
///
/// No connectivity is built, so the finish may be unreachable. Use another generator when a
/// solvable maze is required.
pub fn uniform_random<R: Rng + ?Sized>(
    width: u16,
    height: u16,
    rng: &mut R,
) -> Result<Maze, ConfigError> {
    validate_dimensions(width, height)?;

    let mut grid = Grid::new(width, height);
    let (start, finish) = conventional_endpoints(width, height);

    (1..height - 1).for_each(|y| {
        (1..width - 1).for_each(|x| {
            let pos = Position::new(x, y);
            if pos == start || pos == finish {
                return;
            }
            if !rng.random_bool(WALL_PROBABILITY) {
                grid.set(pos, CellKind::Path);
            }
        })
    });

    Ok(Maze::new(grid, start, finish))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{get_rng, testing::ZeroRng};

    #[test]
    fn test_endpoints_are_conventional() {
        let maze = uniform_random(9, 7, &mut get_rng(Some(3))).unwrap();
        assert_eq!(maze.start(), Position::new(1, 1));
        assert_eq!(maze.finish(), Position::new(7, 5));
    }

    #[test]
    fn test_wall_ratio_is_near_probability() {
        let maze = uniform_random(102, 102, &mut get_rng(Some(11))).unwrap();
        let interior = 100 * 100 - 2;
        let walls = maze
            .grid()
            .iter()
            .filter(|cell| maze.grid().is_interior(cell.position) && cell.kind == CellKind::Wall)
            .count();
        let ratio = walls as f64 / interior as f64;
        assert!((0.17..0.23).contains(&ratio), "wall ratio {ratio}");
    }

    #[test]
    fn test_all_walls_when_every_draw_hits() {
        // A zero draw is below any positive probability
        let maze = uniform_random(6, 6, &mut ZeroRng).unwrap();
        assert_eq!(maze.grid().count(CellKind::Path), 0);
        assert_eq!(maze.grid().count(CellKind::Wall), 34);
    }
}
