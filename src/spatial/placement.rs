//! Entry and exit placement on the outer border of a carved maze

use crate::io::error::{MazeError, invalid_parameter};
use crate::spatial::grid::{CellState, Coordinate, Grid, normalize_odd};
use rand::Rng;
use rand::seq::IndexedRandom;
use std::fmt;
use std::str::FromStr;

/// Policy deciding where the entry and exit are opened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StartingPointMode {
    /// Middle of the top edge to middle of the bottom edge
    #[default]
    Top,
    /// Middle of the left edge to middle of the right edge
    Side,
    /// Top edge next to the top-left corner to bottom edge next to the bottom-right corner
    TopLeft,
    /// Left edge next to the top-left corner to right edge next to the bottom-right corner
    LeftTop,
    /// One of the other modes, including `None`, drawn once per placement
    Random,
    /// No entry or exit; the maze is not solved
    None,
}

impl StartingPointMode {
    /// Modes `Random` can resolve to
    pub const CONCRETE: [Self; 5] = [
        Self::Top,
        Self::Side,
        Self::TopLeft,
        Self::LeftTop,
        Self::None,
    ];

    /// Resolve `Random` to a uniformly drawn concrete mode
    ///
    /// Concrete modes resolve to themselves without consuming randomness.
    pub fn resolve<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        match self {
            Self::Random => Self::CONCRETE.choose(rng).copied().unwrap_or(Self::None),
            concrete => concrete,
        }
    }

    /// Canonical lowercase name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Side => "side",
            Self::TopLeft => "topleft",
            Self::LeftTop => "lefttop",
            Self::Random => "random",
            Self::None => "none",
        }
    }
}

impl fmt::Display for StartingPointMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StartingPointMode {
    type Err = MazeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized: String = value
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "top" => Ok(Self::Top),
            "side" => Ok(Self::Side),
            "topleft" => Ok(Self::TopLeft),
            "lefttop" => Ok(Self::LeftTop),
            "random" => Ok(Self::Random),
            "none" => Ok(Self::None),
            _ => Err(invalid_parameter(
                "mode",
                &value,
                &"expected one of top, side, topleft, lefttop, random, none",
            )),
        }
    }
}

/// Result of placing the entry and exit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Mode actually applied, never `Random`
    pub mode: StartingPointMode,
    /// Opened entry cell
    pub entry: Option<Coordinate>,
    /// Opened exit cell
    pub exit: Option<Coordinate>,
}

impl Placement {
    /// Entry and exit together, when both were placed
    pub const fn endpoints(&self) -> Option<(Coordinate, Coordinate)> {
        match (self.entry, self.exit) {
            (Some(entry), Some(exit)) => Some((entry, exit)),
            _ => None,
        }
    }
}

/// Border coordinates a concrete mode opens on a `width x height` grid
///
/// `None` for `StartingPointMode::None`, and for `Random`, which has to be
/// resolved first.
pub const fn boundary_points(
    mode: StartingPointMode,
    width: usize,
    height: usize,
) -> Option<(Coordinate, Coordinate)> {
    let middle_col = normalize_odd(width / 2);
    let middle_row = normalize_odd(height / 2);
    let last_row = height.saturating_sub(1);
    let last_col = width.saturating_sub(1);

    match mode {
        StartingPointMode::Top => Some((
            Coordinate::new(0, middle_col),
            Coordinate::new(last_row, middle_col),
        )),
        StartingPointMode::Side => Some((
            Coordinate::new(middle_row, 0),
            Coordinate::new(middle_row, last_col),
        )),
        StartingPointMode::TopLeft => Some((
            Coordinate::new(0, 1),
            Coordinate::new(last_row, width.saturating_sub(2)),
        )),
        StartingPointMode::LeftTop => Some((
            Coordinate::new(1, 0),
            Coordinate::new(height.saturating_sub(2), last_col),
        )),
        StartingPointMode::Random | StartingPointMode::None => None,
    }
}

/// Resolve `mode`, open its two border cells and record them
///
/// Both cells are forced to `Path` whatever they held before.
pub fn place_entry_exit<R: Rng + ?Sized>(
    grid: &mut Grid,
    mode: StartingPointMode,
    rng: &mut R,
) -> Placement {
    let mode = mode.resolve(rng);

    let Some((entry, exit)) = boundary_points(mode, grid.width(), grid.height()) else {
        return Placement {
            mode,
            entry: None,
            exit: None,
        };
    };

    grid.set(entry, CellState::Path);
    grid.set(exit, CellState::Path);

    Placement {
        mode,
        entry: Some(entry),
        exit: Some(exit),
    }
}
