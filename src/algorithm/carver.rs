//! Randomized recursive-backtracking carving over an all-wall grid
//!
//! The recursion is kept on an explicit stack of frames. Each frame owns its
//! own shuffled direction order and a cursor into it, which reproduces the
//! call-per-cell structure of the recursive formulation without native
//! recursion depth.

use crate::algorithm::cancellation::CancellationToken;
use crate::algorithm::random::RandomSelector;
use crate::spatial::grid::{CellState, Coordinate, Direction, Grid};

/// Distance between two carvable cells; the cell halfway is their wall
pub const CARVE_STEP: usize = 2;

/// How a carve run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarveOutcome {
    /// Every reachable interior cell was carved
    Completed {
        /// Starting cell, `None` when the grid has no interior
        seed: Option<Coordinate>,
        /// Number of cells turned from wall to path
        opened: usize,
    },
    /// The token was cancelled; the grid was left as it stood
    Cancelled,
}

struct CarveFrame {
    cell: Coordinate,
    directions: [Direction; 4],
    next: usize,
}

impl CarveFrame {
    fn new(cell: Coordinate, selector: &mut RandomSelector) -> Self {
        Self {
            cell,
            directions: selector.shuffled_directions(),
            next: 0,
        }
    }
}

/// Check the carving eligibility rule: strictly inside the border and still a wall
pub fn is_carvable(grid: &Grid, coord: Coordinate) -> bool {
    coord.row > 0
        && coord.col > 0
        && coord.row < grid.height().saturating_sub(1)
        && coord.col < grid.width().saturating_sub(1)
        && grid.get(coord) == Some(CellState::Wall)
}

/// Carve a perfect maze into `grid`
///
/// Picks a random odd interior seed, then walks depth-first, opening the
/// wall between the current cell and each eligible neighbor two steps away.
/// `on_step` runs after every carved pair, before the walk continues from
/// the new cell. The token is checked before any work and before each step.
pub fn carve<F>(
    grid: &mut Grid,
    selector: &mut RandomSelector,
    token: &CancellationToken,
    mut on_step: F,
) -> CarveOutcome
where
    F: FnMut(&Grid),
{
    if token.is_cancelled() {
        return CarveOutcome::Cancelled;
    }

    let (Some(col), Some(row)) = (
        selector.odd_interior_index(grid.width()),
        selector.odd_interior_index(grid.height()),
    ) else {
        return CarveOutcome::Completed {
            seed: None,
            opened: 0,
        };
    };

    let seed = Coordinate::new(row, col);
    grid.set(seed, CellState::Path);
    let mut opened = 1;

    let mut stack = vec![CarveFrame::new(seed, selector)];

    while let Some(frame) = stack.last_mut() {
        if token.is_cancelled() {
            return CarveOutcome::Cancelled;
        }

        let Some(direction) = frame.directions.get(frame.next).copied() else {
            stack.pop();
            continue;
        };
        frame.next += 1;
        let current = frame.cell;

        let Some(neighbor) = current.step(direction, CARVE_STEP) else {
            continue;
        };
        if !is_carvable(grid, neighbor) {
            continue;
        }

        grid.set(current.midpoint(neighbor), CellState::Path);
        grid.set(neighbor, CellState::Path);
        opened += 2;
        on_step(grid);

        stack.push(CarveFrame::new(neighbor, selector));
    }

    CarveOutcome::Completed {
        seed: Some(seed),
        opened,
    }
}
