use crate::grid::Grid;

/// Hex values of braille dots
///
/// ```text
///  1   8
///  2  10
///  4  20
/// 40  80
/// ```
///
/// Where the base blank pattern is codepoint `0x2800` (or U+2800)
///
/// To get other configurations, just add the numbers above.
const BRAILLE_EMPTY: u32 = 0x2800;

/// How a grid is turned into text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// One character per cell
    Glyphs { alive: char, dead: char },

    /// `1` and `0` separated by spaces, one row per line
    Digits,

    /// Braille characters, each covering 2 columns and 4 rows of cells
    Braille,
}

impl Default for Style {
    fn default() -> Self {
        Style::Glyphs {
            alive: 'O',
            dead: '.',
        }
    }
}

/// Renders grids into a frame buffer that is reused from one generation to the next.
#[derive(Debug, Default)]
pub struct Renderer {
    style: Style,

    /// The frame buffer
    fb: String,

    /// Braille codepoints, only used by [`Style::Braille`]
    cp: Vec<u32>,
}

impl Renderer {
    pub fn new(style: Style) -> Self {
        Self {
            style,
            fb: String::new(),
            cp: Vec::new(),
        }
    }

    /// Render `grid`, one line of text per line of the frame, each ending in `\n`.
    pub fn render(&mut self, grid: &Grid) -> &str {
        self.fb.clear();

        match self.style {
            Style::Glyphs { alive, dead } => {
                for row in grid.rows() {
                    self.fb
                        .extend(row.iter().map(|c| if c.is_alive() { alive } else { dead }));
                    self.fb.push('\n');
                }
            }

            Style::Digits => {
                for row in grid.rows() {
                    for (i, cell) in row.iter().enumerate() {
                        if i > 0 {
                            self.fb.push(' ');
                        }

                        self.fb.push(char::from(b'0' + cell.as_u8()));
                    }
                    self.fb.push('\n');
                }
            }

            Style::Braille => self.render_braille(grid),
        }

        &self.fb
    }

    fn render_braille(&mut self, grid: &Grid) {
        let side = grid.side();
        let bw = side.div_ceil(2);
        let bh = side.div_ceil(4);

        // compute new codepoints
        self.cp.clear();
        self.cp.resize(bw * bh, BRAILLE_EMPTY);

        for (row, col, cell) in grid.iter() {
            if cell.is_alive() {
                self.cp[(row / 4) * bw + (col / 2)] += dot_value(col, row);
            }
        }

        for (i, &c) in self.cp.iter().enumerate() {
            if i > 0 && i % bw == 0 {
                self.fb.push('\n');
            }

            // Every sum of dot values stays within U+2800..=U+28FF
            self.fb.push(char::from_u32(c).unwrap_or(' '));
        }
        self.fb.push('\n');
    }
}

/// Render `grid` once, without keeping a frame buffer around.
pub fn render(grid: &Grid, style: Style) -> String {
    let mut renderer = Renderer::new(style);
    renderer.render(grid).to_string()
}

fn dot_value(x: usize, y: usize) -> u32 {
    match (x % 2, y % 4) {
        (0, 0) => 0x1,
        (1, 0) => 0x8,
        (0, 1) => 0x2,
        (1, 1) => 0x10,
        (0, 2) => 0x4,
        (1, 2) => 0x20,
        (0, 3) => 0x40,
        (1, 3) => 0x80,
        _ => unreachable!(),
    }
}
