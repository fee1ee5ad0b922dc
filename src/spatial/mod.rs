//! Spatial data structures for the maze lattice
//!
//! This module contains spatial-related functionality including:
//! - The cell buffer with its solution overlay
//! - Read-only snapshots handed to observers
//! - Entry and exit placement on the border

/// Cell buffer, coordinates and snapshots
pub mod grid;
/// Entry and exit placement policy
pub mod placement;

pub use grid::{CellState, Coordinate, Grid, GridSnapshot};
pub use placement::StartingPointMode;
