//! Plain-text rendering of grid snapshots for terminal and file output

use crate::io::configuration::{
    ENTRY_GLYPH, EXIT_GLYPH, PATH_GLYPH, SOLUTION_GLYPH, WALL_GLYPH,
};
use crate::spatial::grid::{CellState, Coordinate, GridSnapshot};
use crate::spatial::placement::StartingPointMode;

/// Display toggles for text output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextOptions {
    /// Draw solution cells with their own glyph instead of as plain path
    pub show_solution: bool,
    /// Draw the entry and exit with their own glyphs
    pub show_entry_exit: bool,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            show_solution: true,
            show_entry_exit: true,
        }
    }
}

impl TextOptions {
    /// Options for a maze generated with `requested` mode
    ///
    /// Entry and exit are only highlighted for modes that name fixed border
    /// positions, so `Random` and `None` never highlight them.
    pub const fn for_mode(
        show_solution: bool,
        show_entry_exit: bool,
        requested: StartingPointMode,
    ) -> Self {
        Self {
            show_solution,
            show_entry_exit: show_entry_exit
                && !matches!(
                    requested,
                    StartingPointMode::None | StartingPointMode::Random
                ),
        }
    }
}

fn glyph(snapshot: &GridSnapshot, coord: Coordinate, options: TextOptions) -> char {
    if options.show_entry_exit {
        if snapshot.entry == Some(coord) {
            return ENTRY_GLYPH;
        }
        if snapshot.exit == Some(coord) {
            return EXIT_GLYPH;
        }
    }

    match snapshot.get(coord) {
        Some(CellState::Solution) if options.show_solution => SOLUTION_GLYPH,
        Some(CellState::Path | CellState::Solution) => PATH_GLYPH,
        Some(CellState::Wall) | None => WALL_GLYPH,
    }
}

/// Render a snapshot as newline-terminated rows of glyphs
pub fn render_text(snapshot: &GridSnapshot, options: TextOptions) -> String {
    let mut text = String::with_capacity((snapshot.width() + 1) * snapshot.height());

    for row in 0..snapshot.height() {
        for col in 0..snapshot.width() {
            text.push(glyph(snapshot, Coordinate::new(row, col), options));
        }
        text.push('\n');
    }

    text
}
