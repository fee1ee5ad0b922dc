//! Cell buffer for the maze lattice with a separate solution overlay
//!
//! The buffer only stores the wall/path axis. Solution marks live in a
//! bit overlay so the solver can mark and unmark its route without ever
//! changing which cells are traversable.

use bitvec::prelude::*;
use ndarray::Array2;
use std::fmt;

/// Zero-based grid position, rows grow downward and columns rightward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Coordinate {
    /// Row index
    pub row: usize,
    /// Column index
    pub col: usize,
}

impl Coordinate {
    /// Create a coordinate from a row and column
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Move `distance` cells towards `direction`
    ///
    /// Returns `None` when the move would leave the non-negative quadrant.
    /// Upper bounds are the grid's business.
    pub const fn step(self, direction: Direction, distance: usize) -> Option<Self> {
        let row = match direction {
            Direction::Up => self.row.checked_sub(distance),
            Direction::Down => self.row.checked_add(distance),
            Direction::Left | Direction::Right => Some(self.row),
        };
        let col = match direction {
            Direction::Left => self.col.checked_sub(distance),
            Direction::Right => self.col.checked_add(distance),
            Direction::Up | Direction::Down => Some(self.col),
        };
        match (row, col) {
            (Some(row), Some(col)) => Some(Self { row, col }),
            _ => None,
        }
    }

    /// Cell halfway between two coordinates on the same row or column
    pub const fn midpoint(self, other: Self) -> Self {
        Self {
            row: self.row.midpoint(other.row),
            col: self.col.midpoint(other.col),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Cardinal movement on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards row 0
    Up,
    /// Towards the last row
    Down,
    /// Towards column 0
    Left,
    /// Towards the last column
    Right,
}

impl Direction {
    /// Every direction, in up, down, left, right order
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];
}

/// Observable state of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    /// Impassable cell
    #[default]
    Wall,
    /// Open cell
    Path,
    /// Open cell that lies on the discovered route
    Solution,
}

impl CellState {
    /// Whether the cell can be walked through
    pub const fn is_open(self) -> bool {
        !matches!(self, Self::Wall)
    }
}

/// Force a dimension to be odd by rounding even values up
///
/// Carving advances two cells at a time, so only odd dimensions give the
/// cell-wall-cell lattice that lets every interior cell be reached.
pub const fn normalize_odd(value: usize) -> usize {
    if value % 2 == 0 { value + 1 } else { value }
}

/// Rectangular maze buffer exclusively owned by one generation session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Wall/path axis, indexed by (`row`, `col`); never holds `Solution`
    cells: Array2<CellState>,
    /// Solution overlay, row-major
    solution: BitVec,
    width: usize,
    height: usize,
}

impl Grid {
    /// Create an all-wall grid, rounding both dimensions up to odd values
    pub fn new(width: usize, height: usize) -> Self {
        let width = normalize_odd(width);
        let height = normalize_odd(height);

        Self {
            cells: Array2::from_elem((height, width), CellState::Wall),
            solution: bitvec![0; width * height],
            width,
            height,
        }
    }

    /// Create a grid holding `cols x rows` carvable cells plus their walls
    pub fn with_cells(cols: usize, rows: usize) -> Self {
        Self::new(
            cols.saturating_mul(2).saturating_add(1),
            rows.saturating_mul(2).saturating_add(1),
        )
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Check if a coordinate lies inside the grid
    pub const fn contains(&self, coord: Coordinate) -> bool {
        coord.row < self.height && coord.col < self.width
    }

    fn overlay_index(&self, coord: Coordinate) -> Option<usize> {
        self.contains(coord)
            .then(|| coord.row * self.width + coord.col)
    }

    fn on_overlay(&self, coord: Coordinate) -> bool {
        self.overlay_index(coord)
            .is_some_and(|index| self.solution.get(index).as_deref() == Some(&true))
    }

    /// Read a cell, `None` when out of bounds
    pub fn get(&self, coord: Coordinate) -> Option<CellState> {
        let state = self.cells.get((coord.row, coord.col)).copied()?;
        if state == CellState::Path && self.on_overlay(coord) {
            Some(CellState::Solution)
        } else {
            Some(state)
        }
    }

    /// Write a cell, returning `false` when the coordinate is out of bounds
    ///
    /// `Solution` opens the cell and sets its overlay bit; `Wall` and `Path`
    /// clear it.
    pub fn set(&mut self, coord: Coordinate, state: CellState) -> bool {
        let Some(index) = self.overlay_index(coord) else {
            return false;
        };
        let Some(cell) = self.cells.get_mut((coord.row, coord.col)) else {
            return false;
        };

        *cell = if state.is_open() {
            CellState::Path
        } else {
            CellState::Wall
        };
        self.solution.set(index, state == CellState::Solution);
        true
    }

    /// Whether the cell is in bounds and open
    pub fn is_open(&self, coord: Coordinate) -> bool {
        self.get(coord).is_some_and(CellState::is_open)
    }

    /// Whether the cell is currently marked as part of the route
    pub fn is_solution(&self, coord: Coordinate) -> bool {
        self.get(coord) == Some(CellState::Solution)
    }

    /// Drop every solution mark, leaving the carved structure untouched
    pub fn clear_solution(&mut self) {
        self.solution.fill(false);
    }

    /// Iterate all coordinates in row-major order
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + use<> {
        let width = self.width;
        (0..self.height).flat_map(move |row| (0..width).map(move |col| Coordinate::new(row, col)))
    }

    /// Count cells currently reporting `state`
    pub fn count(&self, state: CellState) -> usize {
        self.coordinates()
            .filter(|&coord| self.get(coord) == Some(state))
            .count()
    }

    /// Copy the grid into a read-only snapshot for observers
    pub fn snapshot(
        &self,
        phase: StepPhase,
        entry: Option<Coordinate>,
        exit: Option<Coordinate>,
    ) -> GridSnapshot {
        let rows = (0..self.height)
            .map(|row| {
                (0..self.width)
                    .map(|col| self.get(Coordinate::new(row, col)).unwrap_or_default())
                    .collect()
            })
            .collect();

        GridSnapshot {
            rows,
            entry,
            exit,
            phase,
        }
    }
}

/// Which part of a session produced a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepPhase {
    /// A cell pair was just carved
    Carve,
    /// A cell was just marked as part of the route
    Solve,
    /// The session finished
    Final,
}

impl fmt::Display for StepPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Carve => "carving",
            Self::Solve => "solving",
            Self::Final => "done",
        };
        f.write_str(name)
    }
}

/// Read-only copy of the grid handed to the external renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSnapshot {
    /// Cell states, one vector per row
    pub rows: Vec<Vec<CellState>>,
    /// Entry cell once placed
    pub entry: Option<Coordinate>,
    /// Exit cell once placed
    pub exit: Option<Coordinate>,
    /// Session phase that emitted the snapshot
    pub phase: StepPhase,
}

impl GridSnapshot {
    /// Number of rows
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Read a cell, `None` when out of bounds
    pub fn get(&self, coord: Coordinate) -> Option<CellState> {
        self.rows
            .get(coord.row)
            .and_then(|row| row.get(coord.col))
            .copied()
    }
}
