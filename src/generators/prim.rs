use std::cmp::Reverse;

use rand::Rng;

use crate::{
    error::ConfigError,
    generators::{conventional_endpoints, validate_dimensions},
    maze::{CellKind, Grid, Maze, Position},
};

/// Randomized Prim's algorithm over single cells.
///
/// Grows one tree from `(1, 1)`. Frontier cells are interior walls next to the tree; a random
/// one is taken each round and carved only if exactly one of its neighbors is already open,
/// so no loop or double-thick corridor can form.
///
/// The finish corner is carved as soon as the tree first touches it. If the tree never gets
/// there, the finish moves to the open cell closest to the corner.
pub fn randomized_prim<R: Rng + ?Sized>(
    width: u16,
    height: u16,
    rng: &mut R,
) -> Result<Maze, ConfigError> {
    validate_dimensions(width, height)?;

    let mut grid = Grid::new(width, height);
    let (start, corner) = conventional_endpoints(width, height);

    grid.set(start, CellKind::Path);
    let mut frontiers = Vec::new();
    extend_frontiers(&grid, start, &mut frontiers);

    while !frontiers.is_empty() {
        // Randomly select a cell from the frontiers
        let idx = rng.random_range(0..frontiers.len());
        let frontier = frontiers.swap_remove(idx);

        if grid[frontier] != CellKind::Wall || grid.open_neighbor_count(frontier) != 1 {
            continue;
        }
        grid.set(frontier, CellKind::Path);
        extend_frontiers(&grid, frontier, &mut frontiers);
        reach_corner(&mut grid, frontier, corner, &mut frontiers);
    }

    let finish = if grid[corner].is_walkable() {
        corner
    } else {
        // The first frontier pop always carves a neighbor of the start, so an open cell other
        // than the start exists for every accepted size.
        let fallback = nearest_open(&grid, corner, start).unwrap_or(corner);
        tracing::debug!(
            "[generator] finish corner {} left walled, using {}",
            corner,
            fallback
        );
        fallback
    };

    Ok(Maze::new(grid, start, finish))
}

/// Once the tree comes within two steps of the finish corner, open a link cell and then the
/// corner, each touching exactly one open cell, before other branches can seal the corner off.
fn reach_corner(
    grid: &mut Grid,
    carved: Position,
    corner: Position,
    frontiers: &mut Vec<Position>,
) {
    if grid[corner] != CellKind::Wall {
        return;
    }
    match carved.manhattan_distance(corner) {
        1 => {}
        2 => {
            let link = grid.neighbors(carved, 1).find(|&c| {
                c.manhattan_distance(corner) == 1
                    && grid.is_interior(c)
                    && grid[c] == CellKind::Wall
                    && grid.open_neighbor_count(c) == 1
            });
            let Some(link) = link else {
                return;
            };
            grid.set(link, CellKind::Path);
            extend_frontiers(grid, link, frontiers);
        }
        _ => return,
    }
    if grid.open_neighbor_count(corner) == 1 {
        grid.set(corner, CellKind::Path);
        extend_frontiers(grid, corner, frontiers);
    }
}

/// Queue the interior walls around `pos`.
fn extend_frontiers(grid: &Grid, pos: Position, frontiers: &mut Vec<Position>) {
    frontiers.extend(
        grid.neighbors(pos, 1)
            .filter(|&c| grid.is_interior(c) && grid[c] == CellKind::Wall),
    );
}

/// Closest open cell to `target` other than `exclude`, ties going to the lowest, then
/// rightmost, cell.
fn nearest_open(grid: &Grid, target: Position, exclude: Position) -> Option<Position> {
    grid.iter()
        .filter(|cell| cell.kind.is_walkable() && cell.position != exclude)
        .map(|cell| cell.position)
        .min_by_key(|&pos| {
            (
                pos.manhattan_distance(target),
                Reverse(pos.y),
                Reverse(pos.x),
            )
        })
}
