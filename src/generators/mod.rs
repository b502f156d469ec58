use rand::{Rng, SeedableRng, rngs::StdRng};

mod prim;
mod recur_backtrack;
mod rooms;
mod uniform;

pub use prim::randomized_prim;
pub use recur_backtrack::recursive_backtrack;
pub use rooms::{CELLS_PER_ROOM, Room, rooms_and_corridors};
pub use uniform::{WALL_PROBABILITY, uniform_random};

use crate::{
    error::{ConfigError, ParseKindError},
    maze::{Maze, Position},
};

/// Smallest accepted width and height. Below this the conventional start and finish would
/// collide or touch.
pub const MIN_SIDE: u16 = 5;

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneratorKind {
    /// Independent random walls. Cheap, and may leave the finish unreachable.
    UniformRandom,
    RecurBacktrack,
    RoomsAndCorridors,
    #[default]
    Prim,
}

impl GeneratorKind {
    pub const ALL: [GeneratorKind; 4] = [
        GeneratorKind::UniformRandom,
        GeneratorKind::RecurBacktrack,
        GeneratorKind::RoomsAndCorridors,
        GeneratorKind::Prim,
    ];

    /// Whether every maze from this generator has a route from start to finish.
    pub fn guarantees_solvable(self) -> bool {
        !matches!(self, GeneratorKind::UniformRandom)
    }

    /// Whether the open cells always form a tree (exactly one route between any two cells).
    pub fn is_perfect(self) -> bool {
        matches!(self, GeneratorKind::RecurBacktrack | GeneratorKind::Prim)
    }

    /// Name accepted by [`str::parse`].
    pub fn slug(self) -> &'static str {
        match self {
            GeneratorKind::UniformRandom => "uniform",
            GeneratorKind::RecurBacktrack => "backtrack",
            GeneratorKind::RoomsAndCorridors => "rooms",
            GeneratorKind::Prim => "prim",
        }
    }
}

impl std::fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeneratorKind::UniformRandom => write!(f, "Uniform Random"),
            GeneratorKind::RecurBacktrack => write!(f, "Recursive Backtracking"),
            GeneratorKind::RoomsAndCorridors => write!(f, "Rooms and Corridors"),
            GeneratorKind::Prim => write!(f, "Prim's Algorithm"),
        }
    }
}

impl std::str::FromStr for GeneratorKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GeneratorKind::ALL
            .into_iter()
            .find(|kind| kind.slug().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseKindError::Generator(s.to_string()))
    }
}

/// Reject dimensions no generator can work with.
pub fn validate_dimensions(width: u16, height: u16) -> Result<(), ConfigError> {
    if width < MIN_SIDE || height < MIN_SIDE {
        return Err(ConfigError::TooSmall {
            width,
            height,
            min: MIN_SIDE,
        });
    }
    Ok(())
}

/// Start in the top-left interior corner, finish in the bottom-right one.
fn conventional_endpoints(width: u16, height: u16) -> (Position, Position) {
    (Position::new(1, 1), Position::new(width - 2, height - 2))
}

/// Generate a maze with the given algorithm, drawing all randomness from `rng`.
pub fn generate<R: Rng + ?Sized>(
    kind: GeneratorKind,
    width: u16,
    height: u16,
    rng: &mut R,
) -> Result<Maze, ConfigError> {
    tracing::debug!("[generator] {} {}x{}", kind, width, height);
    let maze = match kind {
        GeneratorKind::UniformRandom => uniform_random(width, height, rng),
        GeneratorKind::RecurBacktrack => recursive_backtrack(width, height, rng),
        GeneratorKind::RoomsAndCorridors => rooms_and_corridors(width, height, rng),
        GeneratorKind::Prim => randomized_prim(width, height, rng),
    };
    if let Err(e) = &maze {
        tracing::warn!("[generator] {} rejected: {}", kind, e);
    }
    maze
}

/// [`generate`] with a fresh generator, seeded when `seed` is given.
pub fn generate_seeded(
    kind: GeneratorKind,
    width: u16,
    height: u16,
    seed: Option<u64>,
) -> Result<Maze, ConfigError> {
    generate(kind, width, height, &mut get_rng(seed))
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::{HashSet, VecDeque};

    use rand::RngCore;

    use crate::maze::{CellKind, Grid, Position};

    /// Always yields zero, so every `random_range(0..n)` picks index 0.
    pub(crate) struct ZeroRng;

    impl RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0);
        }
    }

    /// Walkable cells reachable from `from`.
    pub(crate) fn reachable(grid: &Grid, from: Position) -> HashSet<Position> {
        let mut seen = HashSet::from([from]);
        let mut queue = VecDeque::from([from]);
        while let Some(current) = queue.pop_front() {
            for next in grid.neighbors(current, 1) {
                if grid[next].is_walkable() && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    pub(crate) fn is_solvable(grid: &Grid) -> bool {
        match (grid.find_start(), grid.find_finish()) {
            (Some(start), Some(finish)) => reachable(grid, start).contains(&finish),
            _ => false,
        }
    }

    pub(crate) fn open_cells(grid: &Grid) -> usize {
        grid.iter().filter(|cell| cell.kind.is_walkable()).count()
    }

    /// Pairs of horizontally or vertically adjacent walkable cells.
    pub(crate) fn open_edges(grid: &Grid) -> usize {
        grid.iter()
            .filter(|cell| cell.kind.is_walkable())
            .map(|cell| {
                [
                    cell.position.step(crate::maze::Direction::Right, 1),
                    cell.position.step(crate::maze::Direction::Down, 1),
                ]
                .into_iter()
                .flatten()
                .filter(|&next| grid.is_walkable(next))
                .count()
            })
            .sum()
    }

    /// Connected and acyclic over the walkable cells.
    pub(crate) fn is_tree(grid: &Grid) -> bool {
        let Some(start) = grid.find_start() else {
            return false;
        };
        let open = open_cells(grid);
        reachable(grid, start).len() == open && open_edges(grid) + 1 == open
    }

    pub(crate) fn border_is_walled(grid: &Grid) -> bool {
        grid.iter()
            .filter(|cell| grid.is_boundary(cell.position))
            .all(|cell| cell.kind == CellKind::Wall)
    }
}
