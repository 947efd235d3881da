use rayon::prelude::*;

use crate::cell::Cell;
use crate::grid::Grid;
use crate::grid::GridError;
use crate::neighbors;
use crate::rule_set::RuleSet;

/// Conway's transition table.
///
/// | current | live neighbors | next  |
/// |---------|----------------|-------|
/// | alive   | < 2            | dead  |
/// | alive   | 2 or 3         | alive |
/// | alive   | > 3            | dead  |
/// | dead    | 3              | alive |
/// | dead    | otherwise      | dead  |
pub const fn conway(cell: Cell, n: u8) -> Cell {
    match (cell, n) {
        (Cell::Alive, 2 | 3) => Cell::Alive,
        (Cell::Dead, 3) => Cell::Alive,
        _ => Cell::Dead,
    }
}

/// Compute the next generation of `grid` under Conway's rules.
///
/// The input is only ever read: every neighbor count sees the same snapshot, and the result is
/// written to a freshly allocated grid of the same side.
pub fn next_generation(grid: &Grid) -> Grid {
    let mut next = grid.dead_like();
    fill(grid, &conway, next.cells_mut());

    next
}

/// [`next_generation`] for an arbitrary life-like rule.
pub fn next_generation_with(grid: &Grid, rules: &RuleSet) -> Grid {
    let mut next = grid.dead_like();
    fill(grid, &|cell, n| rules.next_state(cell, n), next.cells_mut());

    next
}

/// Write the successor of `grid` into `out`, reusing its buffer.
///
/// `out` must have the same side as `grid`. Since `grid` is borrowed shared and `out` mutably,
/// the two can never be the same buffer.
pub fn next_generation_into(
    grid: &Grid,
    rules: &RuleSet,
    out: &mut Grid,
) -> Result<(), GridError> {
    grid.expect_side(out)?;
    advance(grid, rules, out, false);

    Ok(())
}

/// Like [`next_generation`], but rows of the result are computed on the rayon thread pool.
pub fn next_generation_par(grid: &Grid) -> Grid {
    let mut next = grid.dead_like();
    fill_par(grid, &conway, next.cells_mut());

    next
}

/// Parallel version of [`next_generation_into`].
pub fn next_generation_par_into(
    grid: &Grid,
    rules: &RuleSet,
    out: &mut Grid,
) -> Result<(), GridError> {
    grid.expect_side(out)?;
    advance(grid, rules, out, true);

    Ok(())
}

/// Successor of `grid` into `out`, which the caller guarantees has the same side.
pub(crate) fn advance(grid: &Grid, rules: &RuleSet, out: &mut Grid, parallel: bool) {
    debug_assert_eq!(grid.side(), out.side());

    let rule = |cell: Cell, n: u8| rules.next_state(cell, n);

    if parallel {
        fill_par(grid, &rule, out.cells_mut());
    } else {
        fill(grid, &rule, out.cells_mut());
    }
}

/// Compute one row of the successor into `out`, which is exactly `side` cells long.
fn fill_row<R>(grid: &Grid, rule: &R, row: usize, out: &mut [Cell])
where
    R: Fn(Cell, u8) -> Cell,
{
    for (col, slot) in out.iter_mut().enumerate() {
        let n = neighbors::count_unchecked(grid, row, col);
        *slot = rule(grid[(row, col)], n);
    }
}

fn fill<R>(grid: &Grid, rule: &R, out: &mut [Cell])
where
    R: Fn(Cell, u8) -> Cell,
{
    for (row, out) in out.chunks_mut(grid.side()).enumerate() {
        fill_row(grid, rule, row, out);
    }
}

fn fill_par<R>(grid: &Grid, rule: &R, out: &mut [Cell])
where
    R: Fn(Cell, u8) -> Cell + Sync,
{
    out.par_chunks_mut(grid.side())
        .enumerate()
        .for_each(|(row, out)| fill_row(grid, rule, row, out));
}

#[cfg(test)]
mod test {
    use super::next_generation;
    use super::next_generation_into;
    use super::next_generation_par;
    use super::next_generation_par_into;
    use super::next_generation_with;
    use crate::cell::Cell;
    use crate::grid::Grid;
    use crate::grid::GridError;
    use crate::rule_set::B3S23;
    use crate::rule_set::RuleSet;

    fn ring(side: usize, row: usize, col: usize) -> Vec<(usize, usize)> {
        let mut cells = Vec::new();

        for dr in [-1isize, 0, 1] {
            for dc in [-1isize, 0, 1] {
                if (dr, dc) != (0, 0) {
                    let r = (row as isize + dr).rem_euclid(side as isize) as usize;
                    let c = (col as isize + dc).rem_euclid(side as isize) as usize;
                    cells.push((r, c));
                }
            }
        }

        cells
    }

    #[test]
    fn block_is_still() {
        let block = Grid::with_alive(4, [(1, 1), (1, 2), (2, 1), (2, 2)]).unwrap();

        assert_eq!(next_generation(&block), block);
    }

    #[test]
    fn blinker_oscillates() {
        let horizontal = Grid::with_alive(5, [(2, 1), (2, 2), (2, 3)]).unwrap();
        let vertical = Grid::with_alive(5, [(1, 2), (2, 2), (3, 2)]).unwrap();

        let next = next_generation(&horizontal);
        assert_eq!(next, vertical);
        assert_eq!(next_generation(&next), horizontal);
    }

    #[test]
    fn lonely_cell_dies() {
        let grid = Grid::with_alive(5, [(2, 2)]).unwrap();

        assert_eq!(next_generation(&grid).population(), 0);
    }

    #[test]
    fn crowded_cell_dies() {
        let mut alive = ring(5, 2, 2);
        alive.push((2, 2));
        let grid = Grid::with_alive(5, alive).unwrap();

        assert_eq!(next_generation(&grid)[(2, 2)], Cell::Dead);
    }

    #[test]
    fn reproduction_needs_exactly_three() {
        let three = Grid::with_alive(6, [(1, 1), (1, 2), (1, 3)]).unwrap();
        assert_eq!(next_generation(&three)[(2, 2)], Cell::Alive);

        let two = Grid::with_alive(6, [(1, 1), (1, 3)]).unwrap();
        assert_eq!(next_generation(&two)[(2, 2)], Cell::Dead);

        let four = Grid::with_alive(6, [(1, 1), (1, 2), (1, 3), (3, 2)]).unwrap();
        assert_eq!(next_generation(&four)[(2, 2)], Cell::Dead);
    }

    #[test]
    fn input_is_untouched() {
        let grid = Grid::with_alive(5, [(2, 1), (2, 2), (2, 3)]).unwrap();
        let copy = grid.clone();

        let _ = next_generation(&grid);

        assert_eq!(grid, copy);
    }

    #[test]
    fn glider_wraps_around() {
        let glider = Grid::parse(
            "
            .O...
            ..O..
            OOO..
            .....
            .....
            ",
        )
        .unwrap();

        // A glider moves one cell diagonally every 4 generations, so on a 5x5 torus it is back
        // where it started after 20.
        let mut grid = glider.clone();
        for _ in 0..20 {
            grid = next_generation(&grid);
            assert_eq!(grid.population(), 5);
        }

        assert_eq!(grid, glider);
    }

    #[test]
    fn rule_set_matches_fixed_table() {
        let grid = Grid::parse(
            "
            .O..O.
            OO.O..
            ..OO.O
            O....O
            .OO...
            ...O.O
            ",
        )
        .unwrap();

        assert_eq!(next_generation_with(&grid, &B3S23), next_generation(&grid));
    }

    #[test]
    fn other_rules_apply() {
        // B1/S: every dead cell touching a live one is born, live cells die
        let rule: RuleSet = "B1/S".parse().unwrap();
        let grid = Grid::with_alive(5, [(2, 2)]).unwrap();
        let next = next_generation_with(&grid, &rule);

        assert_eq!(next.population(), 8);
        assert_eq!(next[(2, 2)], Cell::Dead);
    }

    #[test]
    fn into_checks_side() {
        let grid = Grid::new(4).unwrap();
        let mut out = Grid::new(5).unwrap();

        assert_eq!(
            next_generation_into(&grid, &B3S23, &mut out),
            Err(GridError::DimensionMismatch {
                expected: 4,
                got: 5
            })
        );
    }

    #[test]
    fn into_overwrites_stale_buffer() {
        let grid = Grid::with_alive(5, [(2, 1), (2, 2), (2, 3)]).unwrap();
        let mut out = Grid::with_alive(5, [(0, 0), (4, 4)]).unwrap();

        next_generation_into(&grid, &B3S23, &mut out).unwrap();

        assert_eq!(out, next_generation(&grid));
    }

    #[test]
    fn par_into_checks_side() {
        let grid = Grid::new(6).unwrap();
        let mut out = Grid::new(3).unwrap();

        assert_eq!(
            next_generation_par_into(&grid, &B3S23, &mut out),
            Err(GridError::DimensionMismatch {
                expected: 6,
                got: 3
            })
        );
    }

    #[test]
    fn par_into_overwrites_stale_buffer() {
        let grid = Grid::with_alive(6, [(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)]).unwrap();
        let mut out = Grid::with_alive(6, [(5, 5), (3, 3), (0, 0)]).unwrap();

        next_generation_par_into(&grid, &B3S23, &mut out).unwrap();

        assert_eq!(out, next_generation(&grid));
    }

    #[test]
    fn parallel_matches_sequential() {
        let grid = Grid::parse(
            "
            O..O.OO.
            .OO..O..
            O.O.O..O
            ...OO...
            .O....OO
            OO.O.O..
            ..O..O.O
            O...OO..
            ",
        )
        .unwrap();

        let mut seq = grid.clone();
        let mut par = grid;

        for _ in 0..8 {
            seq = next_generation(&seq);
            par = next_generation_par(&par);
            assert_eq!(seq, par);
        }
    }
}
