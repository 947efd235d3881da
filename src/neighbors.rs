use crate::grid::Grid;
use crate::grid::GridError;

/// Row/column offsets of the Moore neighborhood, center excluded.
///
///   (-1, -1) (-1, 0) (-1, 1)
///   ( 0, -1)         ( 0, 1)
///   ( 1, -1) ( 1, 0) ( 1, 1)
///
pub const OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Count the live cells among the 8 neighbors of `(row, col)`.
///
/// Offsets wrap around the edges, so `(0, 0)` sees `(N - 1, N - 1)` as its top left neighbor.
/// The coordinate itself must be on the grid: it is not wrapped. On a grid of side 1 or 2 the
/// same cell is reached through several offsets and is counted once per offset.
pub fn count_live_neighbors(grid: &Grid, row: usize, col: usize) -> Result<u8, GridError> {
    grid.check(row, col)?;

    Ok(count_unchecked(grid, row, col))
}

/// [`count_live_neighbors`] for coordinates already known to be on the grid.
pub(crate) fn count_unchecked(grid: &Grid, row: usize, col: usize) -> u8 {
    let (row, col) = (row as isize, col as isize);

    OFFSETS
        .iter()
        .map(|&(dr, dc)| grid.wrapped(row + dr, col + dc).as_u8())
        .sum()
}
