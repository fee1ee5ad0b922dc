//! Depth-first backtracking search from entry to exit
//!
//! The solution overlay doubles as the visited set: a cell is entered only
//! while it is open and unmarked, and a dead end clears its own mark on the
//! way back out.

use crate::algorithm::cancellation::CancellationToken;
use crate::spatial::grid::{CellState, Coordinate, Direction, Grid};
use crate::spatial::placement::Placement;
use std::iter;

/// Fixed neighbor order; unlike carving this never varies
pub const SOLVE_ORDER: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

/// How a solve run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    /// Route found and marked
    Found {
        /// Cells from entry to exit inclusive, without repeats
        path: Vec<Coordinate>,
    },
    /// Search exhausted without reaching the exit; no marks remain
    NoPath,
    /// Placement opened no endpoints so no search was attempted
    Skipped,
    /// The token was cancelled; marks made so far were left in place
    Cancelled,
}

struct SearchFrame {
    cell: Coordinate,
    next: usize,
}

fn can_enter(grid: &Grid, coord: Coordinate) -> bool {
    grid.get(coord) == Some(CellState::Path)
}

/// Search for a simple path from `entry` to `exit` through open cells
///
/// Marks every cell on the route as `Solution`. `on_step` runs after each
/// newly marked cell.
pub fn explore<F>(
    grid: &mut Grid,
    entry: Coordinate,
    exit: Coordinate,
    token: &CancellationToken,
    mut on_step: F,
) -> SolveOutcome
where
    F: FnMut(&Grid),
{
    if token.is_cancelled() {
        return SolveOutcome::Cancelled;
    }
    if !can_enter(grid, entry) {
        return SolveOutcome::NoPath;
    }

    grid.set(entry, CellState::Solution);
    on_step(grid);
    if entry == exit {
        return SolveOutcome::Found { path: vec![entry] };
    }

    let mut stack = vec![SearchFrame {
        cell: entry,
        next: 0,
    }];

    while let Some(frame) = stack.last_mut() {
        if token.is_cancelled() {
            return SolveOutcome::Cancelled;
        }

        let Some(direction) = SOLVE_ORDER.get(frame.next).copied() else {
            // Dead end
            let cell = frame.cell;
            grid.set(cell, CellState::Path);
            stack.pop();
            continue;
        };
        frame.next += 1;

        let Some(neighbor) = frame.cell.step(direction, 1) else {
            continue;
        };
        if !can_enter(grid, neighbor) {
            continue;
        }

        grid.set(neighbor, CellState::Solution);
        on_step(grid);

        if neighbor == exit {
            let path = stack
                .iter()
                .map(|visited| visited.cell)
                .chain(iter::once(neighbor))
                .collect();
            return SolveOutcome::Found { path };
        }

        stack.push(SearchFrame {
            cell: neighbor,
            next: 0,
        });
    }

    SolveOutcome::NoPath
}

/// Solve between the endpoints of a placement
///
/// Skips the search entirely when the placement opened nothing. On success
/// the exit is stamped `Solution` explicitly.
pub fn solve<F>(
    grid: &mut Grid,
    placement: &Placement,
    token: &CancellationToken,
    on_step: F,
) -> SolveOutcome
where
    F: FnMut(&Grid),
{
    let Some((entry, exit)) = placement.endpoints() else {
        return SolveOutcome::Skipped;
    };

    let outcome = explore(grid, entry, exit, token, on_step);
    if matches!(outcome, SolveOutcome::Found { .. }) {
        grid.set(exit, CellState::Solution);
    }
    outcome
}
