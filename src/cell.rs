/// The state of a single position on the grid.
///
/// Numeric `0`/`1` only shows up at the edges of the crate (rendering, parsing). Inside the
/// engine a cell is always one of these two variants, so nothing can ever sum a stray `2`.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}

impl Cell {
    pub const fn is_alive(self) -> bool {
        matches!(self, Cell::Alive)
    }

    /// `1` for a live cell, `0` otherwise
    pub const fn as_u8(self) -> u8 {
        match self {
            Cell::Dead => 0,
            Cell::Alive => 1,
        }
    }

    /// Any non-zero value is treated as alive.
    pub const fn from_u8(n: u8) -> Self {
        if n == 0 { Cell::Dead } else { Cell::Alive }
    }

    /// Map a plaintext glyph to a cell. Accepts the usual `.`/`O` pair as well as `_` for dead
    /// and `#`/`*` for alive.
    pub const fn from_glyph(c: char) -> Option<Self> {
        match c {
            '.' | '_' => Some(Cell::Dead),
            'O' | 'o' | '#' | '*' => Some(Cell::Alive),
            _ => None,
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive { Cell::Alive } else { Cell::Dead }
    }
}

impl From<Cell> for bool {
    fn from(cell: Cell) -> Self {
        cell.is_alive()
    }
}
