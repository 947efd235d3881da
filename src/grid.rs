use std::ops::Index;

use thiserror::Error;

use crate::cell::Cell;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("Grid must have a side of at least 1")]
    Empty,

    #[error("Grid is not square: {rows} rows of {cols} cells")]
    NotSquare { rows: usize, cols: usize },

    #[error("Row {row} has {got} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("Expected {expected} cells, got {got}")]
    CellCount { expected: usize, got: usize },

    #[error("Coordinate ({row}, {col}) is outside a grid of side {side}")]
    OutOfRange { row: usize, col: usize, side: usize },

    #[error("Grid side mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Line {line}: '{glyph}' is not a cell glyph")]
    InvalidGlyph { line: usize, glyph: char },

    #[error("A grid of side {side} has more cells than can be stored")]
    TooLarge { side: usize },
}

/// Number of cells on a grid of the given side, or why there can't be such a grid.
pub fn cell_count(side: usize) -> Result<usize, GridError> {
    if side == 0 {
        return Err(GridError::Empty);
    }

    // A `Vec` holds at most `isize::MAX` bytes
    match side.checked_mul(side) {
        Some(count) if count <= isize::MAX as usize => Ok(count),
        _ => Err(GridError::TooLarge { side }),
    }
}

/// A square, toroidal board of [`Cell`]s.
///
/// Cells are stored row-major in a single buffer, so `(row, col)` lives at `row * side + col`.
/// The side is carried by the grid itself and is at least 1; nothing else in the crate keeps a
/// notion of "the" board size.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    side: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an all-dead grid
    pub fn new(side: usize) -> Result<Self, GridError> {
        let count = cell_count(side)?;

        Ok(Self {
            side,
            cells: vec![Cell::Dead; count],
        })
    }

    /// Build a grid from a row-major buffer of `side * side` cells.
    pub fn from_cells(side: usize, cells: Vec<Cell>) -> Result<Self, GridError> {
        let expected = cell_count(side)?;
        if cells.len() != expected {
            return Err(GridError::CellCount {
                expected,
                got: cells.len(),
            });
        }

        Ok(Self { side, cells })
    }

    /// Build a grid from nested rows. Every row must be as long as the first one, and there must
    /// be exactly as many rows as columns. Nothing is padded or truncated.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        let Some(first) = rows.first() else {
            return Err(GridError::Empty);
        };

        let cols = first.len();

        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(GridError::Ragged {
                row,
                expected: cols,
                got: r.len(),
            });
        }

        if cols != rows.len() {
            return Err(GridError::NotSquare {
                rows: rows.len(),
                cols,
            });
        }

        let side = rows.len();
        let cells = rows.into_iter().flatten().collect();

        Self::from_cells(side, cells)
    }

    /// Parse plaintext rows such as
    ///
    /// ```notrust
    /// .O.
    /// ..O
    /// OOO
    /// ```
    ///
    /// Blank lines and `!` comment lines are skipped. See [`Cell::from_glyph`] for the accepted
    /// glyphs.
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let mut rows = Vec::new();

        for (i, line) in text.lines().enumerate() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('!') {
                continue;
            }

            let row = line
                .chars()
                .map(|glyph| {
                    Cell::from_glyph(glyph).ok_or(GridError::InvalidGlyph { line: i + 1, glyph })
                })
                .collect::<Result<Vec<_>, _>>()?;

            rows.push(row);
        }

        Self::from_rows(rows)
    }

    /// An otherwise dead grid with the given cells alive.
    pub fn with_alive<I>(side: usize, alive: I) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut grid = Self::new(side)?;

        for (row, col) in alive {
            grid.set(row, col, Cell::Alive)?;
        }

        Ok(grid)
    }

    /// An all-dead grid with the same side as `self`
    pub fn dead_like(&self) -> Self {
        Self {
            side: self.side,
            cells: vec![Cell::Dead; self.cells.len()],
        }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    /// Fails if `(row, col)` is not on the grid. Coordinates are never wrapped here, only the
    /// offsets used to reach neighbors are.
    pub fn check(&self, row: usize, col: usize) -> Result<(), GridError> {
        if row >= self.side || col >= self.side {
            return Err(GridError::OutOfRange {
                row,
                col,
                side: self.side,
            });
        }

        Ok(())
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Cell, GridError> {
        self.check(row, col)?;

        Ok(self.cells[self.xy_from(row, col)])
    }

    /// Look up a cell with both coordinates taken modulo the side.
    pub fn wrapped(&self, row: isize, col: isize) -> Cell {
        // `side` fits in an isize since it came from a `Vec` length
        let n = self.side as isize;
        let (row, col) = (row.rem_euclid(n) as usize, col.rem_euclid(n) as usize);

        self.cells[self.xy_from(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<(), GridError> {
        self.check(row, col)?;

        let i = self.xy_from(row, col);
        self.cells[i] = cell;

        Ok(())
    }

    /// The row-major cell buffer
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.side)
    }

    /// Every cell along with its `(row, col)`
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(n, &cell)| (n / self.side, n % self.side, cell))
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Fails unless `other` has the same side as `self`.
    pub fn expect_side(&self, other: &Grid) -> Result<(), GridError> {
        if self.side != other.side {
            return Err(GridError::DimensionMismatch {
                expected: self.side,
                got: other.side,
            });
        }

        Ok(())
    }

    fn xy_from(&self, row: usize, col: usize) -> usize {
        row * self.side + col
    }
}

impl Index<(usize, usize)> for Grid {
    type Output = Cell;

    /// Panics if the coordinate is not on the grid. Use [`Grid::get`] for a checked lookup.
    fn index(&self, (row, col): (usize, usize)) -> &Cell {
        assert!(row < self.side, "row is out of bounds");
        assert!(col < self.side, "col is out of bounds");

        &self.cells[self.xy_from(row, col)]
    }
}
