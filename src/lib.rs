//! Maze generation by randomized recursive backtracking, with a backtracking solver
//!
//! A generation session carves a perfect maze into an odd-sized grid, opens an
//! entry and exit on the border according to a starting-point mode, and marks
//! the route between them. Sessions are cancellable and report their progress
//! to an observer as grid snapshots.

#![forbid(unsafe_code)]

/// Carving, solving and session orchestration
pub mod algorithm;
/// Configuration, errors, CLI and text output
pub mod io;
/// Grid storage, coordinates and entry/exit placement
pub mod spatial;

pub use algorithm::session::{
    GenerationSession, MazeReport, MazeSlot, SessionHandle, SessionOutcome, StepObserver, cancel,
    start_generation,
};
pub use io::configuration::GenerationConfig;
pub use io::error::{MazeError, Result};
