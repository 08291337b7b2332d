//! A rectangular grid addressed by [`Cell`], with four-way [`Direction`] movement.
//!
//! Rows grow southward and columns grow eastward, so [`Cell::ORIGIN`] is the top left corner.

use std::fmt;
use std::ops::{Add, Index, IndexMut, Mul, Sub};

use nalgebra::{DMatrix, Scalar};

/// A `(row, column)` coordinate. Ordered by row, then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const ORIGIN: Self = Self { row: 0, col: 0 };

    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The neighboring cell in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        self + direction.offset()
    }

    /// The cell `size` steps away in `direction`.
    #[must_use]
    pub fn step_by(self, direction: Direction, size: i32) -> Self {
        self + direction.offset() * size
    }

    /// Wrap the cell into `0..rows` and `0..cols`, for grids that tile infinitely.
    ///
    /// # Panics
    ///
    /// Panics if `rows` or `cols` is zero.
    #[must_use]
    pub fn wrap(self, rows: i32, cols: i32) -> Self {
        Self {
            row: self.row.rem_euclid(rows),
            col: self.col.rem_euclid(cols),
        }
    }

    #[must_use]
    pub fn manhattan_distance(self, other: Self) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl Add for Cell {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Cell {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}

impl Mul<i32> for Cell {
    type Output = Self;

    fn mul(self, factor: i32) -> Self {
        Self::new(self.row * factor, self.col * factor)
    }
}

/// A quarter turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

/// A cardinal direction of movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All directions, clockwise from north.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// The unit `(Δrow, Δcol)` of a step in this direction.
    #[must_use]
    pub const fn offset(self) -> Cell {
        match self {
            Self::North => Cell::new(-1, 0),
            Self::East => Cell::new(0, 1),
            Self::South => Cell::new(1, 0),
            Self::West => Cell::new(0, -1),
        }
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    #[must_use]
    pub const fn rotate(self, rotation: Rotation) -> Self {
        match (self, rotation) {
            (Self::North, Rotation::Clockwise) | (Self::South, Rotation::CounterClockwise) => {
                Self::East
            }
            (Self::East, Rotation::Clockwise) | (Self::West, Rotation::CounterClockwise) => {
                Self::South
            }
            (Self::South, Rotation::Clockwise) | (Self::North, Rotation::CounterClockwise) => {
                Self::West
            }
            (Self::West, Rotation::Clockwise) | (Self::East, Rotation::CounterClockwise) => {
                Self::North
            }
        }
    }

    /// Get the direction when turning left.
    #[must_use]
    pub const fn to_left(self) -> Self {
        self.rotate(Rotation::CounterClockwise)
    }

    /// Get the direction when turning right.
    #[must_use]
    pub const fn to_right(self) -> Self {
        self.rotate(Rotation::Clockwise)
    }

    /// Whether movement in this direction changes the row.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::North | Self::South)
    }
}

/// A grid could not be built or addressed.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid has no cells")]
    Empty,

    #[error("expected grid width to be {expected} across rows, but row {row} has width {found}")]
    UnequalRowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("grid of {rows} rows and {cols} columns is too large to address by cell")]
    TooLarge { rows: usize, cols: usize },

    #[error("cell {cell} is outside the grid of {rows} rows and {cols} columns")]
    OutOfBounds { cell: Cell, rows: usize, cols: usize },
}

/// A rectangular, fixed size grid of `T`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T: Scalar> {
    matrix: DMatrix<T>,
}

impl<T: Scalar> Grid<T> {
    /// Build a grid from rows listed top to bottom.
    ///
    /// # Errors
    ///
    /// Returns a [`GridError`] if there are no cells, the rows are not all the same width, or the
    /// size can't be addressed by `i32` coordinates.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, GridError> {
        let row_count = rows.len();
        let col_count = rows.first().map_or(0, Vec::len);
        if col_count == 0 {
            return Err(GridError::Empty);
        }
        if i32::try_from(row_count).is_err() || i32::try_from(col_count).is_err() {
            return Err(GridError::TooLarge {
                rows: row_count,
                cols: col_count,
            });
        }
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, width)| width != col_count)
        {
            return Err(GridError::UnequalRowWidth {
                row,
                expected: col_count,
                found,
            });
        }

        Ok(Self {
            matrix: DMatrix::from_row_iterator(row_count, col_count, rows.into_iter().flatten()),
        })
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.matrix.ncols()
    }

    #[must_use]
    pub fn top_left(&self) -> Cell {
        Cell::ORIGIN
    }

    #[must_use]
    pub fn bottom_right(&self) -> Cell {
        // dimensions are checked to fit i32 on construction
        Cell::new(self.rows() as i32 - 1, self.cols() as i32 - 1)
    }

    /// Convert a cell to a matrix index, or `None` when it lies outside the grid.
    fn to_index(&self, cell: Cell) -> Option<(usize, usize)> {
        let row = usize::try_from(cell.row).ok()?;
        let col = usize::try_from(cell.col).ok()?;
        (row < self.rows() && col < self.cols()).then_some((row, col))
    }

    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        self.to_index(cell).is_some()
    }

    /// Check that `cell` lies within the grid.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] otherwise.
    pub fn ensure_contains(&self, cell: Cell) -> Result<(), GridError> {
        if self.contains(cell) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                cell,
                rows: self.rows(),
                cols: self.cols(),
            })
        }
    }

    #[must_use]
    pub fn get(&self, cell: Cell) -> Option<&T> {
        self.to_index(cell).map(|index| &self.matrix[index])
    }

    pub fn get_mut(&mut self, cell: Cell) -> Option<&mut T> {
        self.to_index(cell).map(|index| &mut self.matrix[index])
    }

    /// The value at `cell`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if the cell lies outside the grid.
    pub fn value_at(&self, cell: Cell) -> Result<&T, GridError> {
        self.ensure_contains(cell)?;
        Ok(&self[cell])
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + use<T> {
        let cols = self.cols() as i32;
        (0..self.rows() as i32).flat_map(move |row| (0..cols).map(move |col| Cell::new(row, col)))
    }

    /// All cells with their values in row-major order.
    pub fn entries(&self) -> impl Iterator<Item = (Cell, &T)> {
        self.cells().map(|cell| (cell, &self[cell]))
    }
}

impl<T: Scalar> Index<Cell> for Grid<T> {
    type Output = T;

    fn index(&self, cell: Cell) -> &T {
        match self.get(cell) {
            Some(value) => value,
            None => panic!(
                "cell {cell} out of bounds for grid of {} rows and {} columns",
                self.rows(),
                self.cols()
            ),
        }
    }
}

impl<T: Scalar> IndexMut<Cell> for Grid<T> {
    fn index_mut(&mut self, cell: Cell) -> &mut T {
        let (rows, cols) = (self.rows(), self.cols());
        match self.get_mut(cell) {
            Some(value) => value,
            None => panic!("cell {cell} out of bounds for grid of {rows} rows and {cols} columns"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits() -> Result<Grid<u8>, GridError> {
        Grid::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]])
    }

    #[test]
    fn grid_addresses_row_major() -> Result<(), GridError> {
        let grid = digits()?;
        assert_eq!((grid.rows(), grid.cols()), (2, 3));
        assert_eq!(grid.value_at(Cell::new(0, 2))?, &3);
        assert_eq!(grid[Cell::new(1, 0)], 4);
        assert_eq!(grid.bottom_right(), Cell::new(1, 2));
        let values: Vec<u8> = grid.entries().map(|(_, &value)| value).collect();
        assert_eq!(values, vec![1, 2, 3, 4, 5, 6]);
        Ok(())
    }

    #[test]
    fn grid_rejects_cells_outside() -> Result<(), GridError> {
        let grid = digits()?;
        for cell in [Cell::new(-1, 0), Cell::new(0, -1), Cell::new(2, 0), Cell::new(0, 3)] {
            assert!(!grid.contains(cell));
            assert_eq!(grid.get(cell), None);
            assert_eq!(
                grid.value_at(cell),
                Err(GridError::OutOfBounds { cell, rows: 2, cols: 3 })
            );
        }
        Ok(())
    }

    #[test]
    fn grid_rejects_ragged_rows() {
        assert_eq!(
            Grid::from_rows(vec![vec![1, 2], vec![3], vec![4, 5]]),
            Err(GridError::UnequalRowWidth {
                row: 1,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn grid_rejects_empty() {
        assert_eq!(Grid::<u8>::from_rows(vec![]), Err(GridError::Empty));
        assert_eq!(Grid::<u8>::from_rows(vec![vec![]]), Err(GridError::Empty));
    }

    #[test]
    fn grid_values_are_mutable() -> Result<(), GridError> {
        let mut grid = digits()?;
        grid[Cell::new(1, 1)] = 9;
        if let Some(value) = grid.get_mut(Cell::new(0, 0)) {
            *value = 7;
        }
        assert_eq!(grid, Grid::from_rows(vec![vec![7, 2, 3], vec![4, 9, 6]])?);
        Ok(())
    }

    #[test]
    fn directions_turn_and_reverse() {
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
            assert_eq!(direction.to_left().to_right(), direction);
            assert_eq!(direction.to_right().to_right(), direction.opposite());
            assert_eq!(
                Cell::ORIGIN.step(direction).step(direction.opposite()),
                Cell::ORIGIN
            );
            assert_ne!(direction.is_vertical(), direction.to_left().is_vertical());
        }
        assert_eq!(Direction::North.to_right(), Direction::East);
        assert_eq!(Direction::North.to_left(), Direction::West);
    }

    #[test]
    fn cells_move_scale_and_wrap() {
        let cell = Cell::new(2, 3);
        assert_eq!(cell.step(Direction::North), Cell::new(1, 3));
        assert_eq!(cell.step_by(Direction::West, 3), Cell::new(2, 0));
        assert_eq!(cell * 2, Cell::new(4, 6));
        assert_eq!(cell - Cell::new(1, 1), Cell::new(1, 2));
        assert_eq!(Cell::new(-1, 7).wrap(5, 5), Cell::new(4, 2));
        assert_eq!(cell.manhattan_distance(Cell::new(-1, 5)), 5);
        assert!(Cell::new(0, 9) < Cell::new(1, 0));
        assert_eq!(cell.to_string(), "(2, 3)");
    }
}
