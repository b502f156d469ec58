use std::collections::HashSet;

use rand::Rng;

use crate::{
    error::ConfigError,
    generators::{conventional_endpoints, validate_dimensions},
    maze::{CellKind, Grid, Maze, Position},
};

/// Randomized depth-first carving over the odd-coordinate lattice, starting from `(1, 1)`.
///
/// Carved cells sit two apart with the wall cell between them opened on each step, so the
/// open cells form a spanning tree: exactly one route between any two of them.
pub fn recursive_backtrack<R: Rng + ?Sized>(
    width: u16,
    height: u16,
    rng: &mut R,
) -> Result<Maze, ConfigError> {
    validate_dimensions(width, height)?;

    let mut grid = Grid::new(width, height);
    let (start, finish) = conventional_endpoints(width, height);

    let mut visited = HashSet::from([start]);
    grid.set(start, CellKind::Path);

    // The stack will keep only path cells
    let mut stack = vec![start];

    while let Some(&cell) = stack.last() {
        let neighbors = grid
            .neighbors(cell, 2)
            .filter(|&c| grid.is_interior(c) && !visited.contains(&c))
            .collect::<Vec<_>>();

        if neighbors.is_empty() {
            stack.pop();
            continue;
        }

        let neighbor = neighbors[rng.random_range(0..neighbors.len())];
        grid.set(cell.midpoint(neighbor), CellKind::Path);
        grid.set(neighbor, CellKind::Path);
        visited.insert(neighbor);
        stack.push(neighbor);
    }

    link_off_lattice_finish(&mut grid, finish);

    Ok(Maze::new(grid, start, finish))
}

/// With an even width and height the finish corner is on neither lattice axis, and nothing
/// next to it gets carved. Open the cell to its left, which touches exactly one lattice cell
/// above it, so the finish joins the tree as a leaf.
fn link_off_lattice_finish(grid: &mut Grid, finish: Position) {
    if grid.open_neighbor_count(finish) > 0 || grid[finish].is_walkable() {
        return;
    }
    let link = Position::new(finish.x - 1, finish.y);
    tracing::debug!("[generator] linking finish {} through {}", finish, link);
    grid.set(link, CellKind::Path);
}
