//! Generation constants and validated runtime configuration

use crate::io::error::{Result, invalid_parameter};
use crate::spatial::placement::StartingPointMode;
use std::time::Duration;

/// Default requested width
pub const DEFAULT_WIDTH: usize = 20;
/// Default requested height
pub const DEFAULT_HEIGHT: usize = 20;

// Below 5 the lattice holds at most one carvable cell per axis
/// Smallest accepted width or height
pub const MIN_DIMENSION: usize = 5;
/// Largest accepted width or height
pub const MAX_DIMENSION: usize = 1_001;

/// Default pause after each animated step
pub const DEFAULT_ANIMATION_DELAY_MS: u64 = 10;

/// Spinner redraw interval
pub const PROGRESS_TICK_MS: u64 = 100;

// Text output glyphs
/// Wall cell
pub const WALL_GLYPH: char = '#';
/// Open cell
pub const PATH_GLYPH: char = ' ';
/// Cell on the solution route
pub const SOLUTION_GLYPH: char = '.';
/// Entry cell
pub const ENTRY_GLYPH: char = 'S';
/// Exit cell
pub const EXIT_GLYPH: char = 'E';

/// Validated parameters for one generation session
///
/// Only constructible through the validating constructors, so the engine
/// never sees dimensions outside `MIN_DIMENSION..=MAX_DIMENSION`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationConfig {
    width: usize,
    height: usize,
    mode: StartingPointMode,
    seed: Option<u64>,
    animation: Option<Duration>,
}

impl GenerationConfig {
    /// Validate a requested grid size
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension lies outside
    /// `MIN_DIMENSION..=MAX_DIMENSION`
    pub fn new(width: usize, height: usize, mode: StartingPointMode) -> Result<Self> {
        validate_dimension("width", width)?;
        validate_dimension("height", height)?;

        Ok(Self {
            width,
            height,
            mode,
            seed: None,
            animation: None,
        })
    }

    /// Validate a size given in carvable cells, each taking two grid cells plus a border
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting grid dimensions are out of range
    pub fn from_cells(cols: usize, rows: usize, mode: StartingPointMode) -> Result<Self> {
        let width = cols.saturating_mul(2).saturating_add(1);
        let height = rows.saturating_mul(2).saturating_add(1);
        Self::new(width, height, mode)
    }

    /// Fix the random seed
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Request per-step snapshots, pausing `delay` after each
    #[must_use]
    pub const fn with_animation(mut self, delay: Duration) -> Self {
        self.animation = Some(delay);
        self
    }

    /// Requested width, before odd normalization
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Requested height, before odd normalization
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Requested starting-point mode
    pub const fn mode(&self) -> StartingPointMode {
        self.mode
    }

    /// Fixed seed, if any
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Step delay when animation was requested
    pub const fn animation(&self) -> Option<Duration> {
        self.animation
    }
}

fn validate_dimension(parameter: &'static str, value: usize) -> Result<()> {
    if (MIN_DIMENSION..=MAX_DIMENSION).contains(&value) {
        Ok(())
    } else {
        Err(invalid_parameter(
            parameter,
            &value,
            &format!("must be between {MIN_DIMENSION} and {MAX_DIMENSION}"),
        ))
    }
}
