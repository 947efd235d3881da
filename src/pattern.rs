use thiserror::Error;
use tracing::warn;

use crate::cell::Cell;
use crate::grid::Grid;
use crate::grid::GridError;
use crate::rule_set::RuleError;
use crate::rule_set::RuleSet;

/// A finite pattern, as read from an RLE or plaintext file, not yet placed on a grid.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub name: Option<String>,
    pub author: Option<String>,
    pub comments: Vec<String>,

    /// Rule the pattern was designed for, if the file names one
    pub rule: Option<RuleSet>,

    pub width: usize,
    pub height: usize,

    /// Live cells as `(row, col)`, relative to the top left of the bounding box
    pub alive: Vec<(usize, usize)>,
}

#[derive(Debug, Error, PartialEq)]
pub enum PatternError {
    #[error("Missing header line \"x = <width>, y = <height>\"")]
    MissingHeader,

    #[error("Header line error: {0}")]
    Header(#[from] HeaderError),

    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("Invalid rule: {0}")]
    Rule(#[from] RuleError),

    #[error("A {width}x{height} pattern does not fit on a grid of side {side}")]
    TooLarge {
        width: usize,
        height: usize,
        side: usize,
    },

    #[error(transparent)]
    Grid(#[from] GridError),
}

#[derive(Debug, Error, PartialEq)]
pub enum HeaderError {
    #[error("Missing \"{field}\" field")]
    MissingField { field: &'static str },

    #[error("Expected \"key = value\", found \"{got}\"")]
    Malformed { got: String },

    #[error("Failed to parse {field} = \"{got}\"")]
    InvalidNumber { field: &'static str, got: String },

    #[error("Invalid rule: {0}")]
    Rule(#[from] RuleError),
}

#[derive(Debug, Error, PartialEq)]
pub enum EncodingError {
    #[error("Unexpected end of input, expected '!'")]
    UnexpectedEof,

    #[error("Unrecognized tag '{got}'")]
    UnrecognizedTag { got: char },

    #[error("Run count {count} is not followed by a tag")]
    DanglingCount { count: usize },

    #[error("Run count of 0 before '{tag}'")]
    ZeroCount { tag: char },

    #[error("Cell ({row}, {col}) lies outside the declared {width}x{height} box")]
    OutOfBounds {
        row: usize,
        col: usize,
        width: usize,
        height: usize,
    },
}

impl Pattern {
    /// Stamp the pattern onto an otherwise dead grid of side `side`, with its top left corner at
    /// `origin`. Placement wraps around the edges.
    pub fn place(&self, side: usize, origin: (usize, usize)) -> Result<Grid, PatternError> {
        self.check_fits(side)?;

        let mut grid = Grid::new(side)?;
        let (dr, dc) = (origin.0 % side, origin.1 % side);

        for &(row, col) in &self.alive {
            grid.set((row + dr) % side, (col + dc) % side, Cell::Alive)?;
        }

        Ok(grid)
    }

    /// Like [`Pattern::place`], with the pattern in the middle of the grid.
    pub fn centered(&self, side: usize) -> Result<Grid, PatternError> {
        self.check_fits(side)?;

        let origin = ((side - self.height) / 2, (side - self.width) / 2);
        self.place(side, origin)
    }

    fn check_fits(&self, side: usize) -> Result<(), PatternError> {
        if side == 0 {
            return Err(GridError::Empty.into());
        }

        if self.width > side || self.height > side {
            return Err(PatternError::TooLarge {
                width: self.width,
                height: self.height,
                side,
            });
        }

        Ok(())
    }
}

/// Parse the RLE file format.
///
/// ```notrust
/// #N Glider
/// #O Richard K. Guy
/// x = 3, y = 3, rule = B3/S23
/// bob$2bo$3o!
/// ```
///
/// See: https://conwaylife.com/wiki/Run_Length_Encoded
pub fn read_rle(text: &str) -> Result<Pattern, PatternError> {
    let mut pattern = Pattern::default();
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());

    // Comment lines, up to the header
    let header = loop {
        let Some(line) = lines.next() else {
            return Err(PatternError::MissingHeader);
        };

        let Some(comment) = line.strip_prefix('#') else {
            break line;
        };

        read_line_comment(comment, &mut pattern)?;
    };

    let Header {
        width,
        height,
        rule,
    } = read_line_header(header)?;

    if rule.is_some() {
        if pattern.rule.is_some() && pattern.rule != rule {
            warn!("RLE rule already defined by a comment line. Using the header's");
        }

        pattern.rule = rule;
    }

    pattern.width = width;
    pattern.height = height;
    pattern.alive = read_encoding(lines, width, height)?;

    Ok(pattern)
}

fn read_line_comment(line: &str, pattern: &mut Pattern) -> Result<(), PatternError> {
    let mut chars = line.chars();
    let kind = chars.next();
    let rest = chars.as_str().trim();

    match kind {
        Some('N') => {
            if pattern.name.is_some() {
                warn!("RLE file name already defined. Using latest");
            }

            pattern.name = Some(rest.to_string());
        }

        Some('O') => {
            if pattern.author.is_some() {
                warn!("RLE author already defined. Using latest");
            }

            pattern.author = Some(rest.to_string());
        }

        Some('C' | 'c') => pattern.comments.push(rest.to_string()),

        // Survivals/births, e.g. `#r 23/3`
        Some('r') => pattern.rule = Some(rest.parse()?),

        Some(kind) => warn!("Ignoring RLE comment line of type '#{kind}'"),

        None => {}
    }

    Ok(())
}

struct Header {
    width: usize,
    height: usize,
    rule: Option<RuleSet>,
}

/// `x = 3, y = 3, rule = B3/S23`, where the rule is optional. The rule comes last and may carry
/// a bounded grid suffix such as `:T20,20`, so it is split off before the other fields.
fn read_line_header(line: &str) -> Result<Header, HeaderError> {
    let (mut width, mut height, mut rule) = (None, None, None);

    let (dims, rule_field) = match line.find("rule") {
        Some(i) => (&line[..i], Some(&line[i..])),
        None => (line, None),
    };

    if let Some(field) = rule_field {
        let Some((_, value)) = field.split_once('=') else {
            return Err(HeaderError::Malformed {
                got: field.trim().to_string(),
            });
        };

        let value = match value.split_once(':') {
            Some((value, topology)) => {
                warn!("Ignoring RLE grid topology \":{}\"", topology.trim());
                value
            }
            None => value,
        };

        rule = Some(value.trim().parse::<RuleSet>()?);
    }

    for field in dims.split(',').filter(|f| !f.trim().is_empty()) {
        let Some((key, value)) = field.split_once('=') else {
            return Err(HeaderError::Malformed {
                got: field.trim().to_string(),
            });
        };

        let value = value.trim();

        let number = |field: &'static str| {
            value.parse::<usize>().map_err(|_| HeaderError::InvalidNumber {
                field,
                got: value.to_string(),
            })
        };

        match key.trim() {
            "x" => width = Some(number("x")?),
            "y" => height = Some(number("y")?),
            key => warn!("Ignoring unknown RLE header field \"{key}\""),
        }
    }

    let width = width.ok_or(HeaderError::MissingField { field: "x" })?;
    let height = height.ok_or(HeaderError::MissingField { field: "y" })?;

    Ok(Header {
        width,
        height,
        rule,
    })
}

fn read_encoding<'a, I>(
    lines: I,
    width: usize,
    height: usize,
) -> Result<Vec<(usize, usize)>, EncodingError>
where
    I: Iterator<Item = &'a str>,
{
    let mut alive = Vec::new();
    let (mut row, mut col): (usize, usize) = (0, 0);

    // `None` means no count was written, which stands for 1
    let mut count: Option<usize> = None;

    for c in lines.flat_map(str::chars) {
        match c {
            d if d.is_ascii_digit() => {
                // Saturates, and so does every position below. A saturated position is never
                // inside the box, so the bounds check on live cells rejects it.
                let d = d as usize - '0' as usize;
                count = Some(count.unwrap_or(0).saturating_mul(10).saturating_add(d));
            }

            c if c.is_whitespace() => {}

            // Dead cells
            'b' | '.' => {
                col = col.saturating_add(run(count.take(), c)?);
            }

            // Live cells
            'o' | 'A' => {
                let n = run(count.take(), c)?;
                let end = col.saturating_add(n);

                if row >= height || end > width {
                    return Err(EncodingError::OutOfBounds {
                        row,
                        // First cell of the run outside the box
                        col: if row >= height { col } else { col.max(width) },
                        width,
                        height,
                    });
                }

                alive.extend((col..end).map(|c| (row, c)));
                col = end;
            }

            // End of line
            '$' => {
                row = row.saturating_add(run(count.take(), c)?);
                col = 0;
            }

            '!' => {
                if let Some(count) = count {
                    return Err(EncodingError::DanglingCount { count });
                }

                return Ok(alive);
            }

            got => return Err(EncodingError::UnrecognizedTag { got }),
        }
    }

    Err(EncodingError::UnexpectedEof)
}

/// Length of a run given its optional count
fn run(count: Option<usize>, tag: char) -> Result<usize, EncodingError> {
    match count {
        None => Ok(1),
        Some(0) => Err(EncodingError::ZeroCount { tag }),
        Some(n) => Ok(n),
    }
}

/// Parse the plaintext (`.cells`) format: `!` comment lines followed by rows of `.` and `O`.
/// Rows shorter than the widest one are padded with dead cells.
///
/// See: https://conwaylife.com/wiki/Plaintext
pub fn read_plaintext(text: &str) -> Result<Pattern, PatternError> {
    let mut pattern = Pattern::default();
    let mut row = 0;

    for line in text.lines().map(str::trim_end) {
        if let Some(comment) = line.strip_prefix('!') {
            let comment = comment.trim();

            if let Some(name) = comment.strip_prefix("Name:") {
                pattern.name = Some(name.trim().to_string());
            } else if let Some(author) = comment.strip_prefix("Author:") {
                pattern.author = Some(author.trim().to_string());
            } else {
                pattern.comments.push(comment.to_string());
            }

            continue;
        }

        for (col, glyph) in line.chars().enumerate() {
            match Cell::from_glyph(glyph) {
                Some(Cell::Alive) => pattern.alive.push((row, col)),
                Some(Cell::Dead) => {}
                None => return Err(EncodingError::UnrecognizedTag { got: glyph }.into()),
            }
        }

        pattern.width = pattern.width.max(line.chars().count());
        row += 1;
    }

    pattern.height = row;

    Ok(pattern)
}

#[cfg(test)]
mod test {
    use super::EncodingError;
    use super::HeaderError;
    use super::PatternError;
    use super::read_plaintext;
    use super::read_rle;
    use crate::grid::Grid;
    use crate::rule_set::B3S23;

    const GLIDER: &str = "#N Glider
#O Richard K. Guy
#C The smallest, most common, and first discovered spaceship.
x = 3, y = 3, rule = B3/S23
bob$2bo$3o!
";

    #[test]
    fn read_glider() {
        let pattern = read_rle(GLIDER).unwrap();

        assert_eq!(pattern.name.as_deref(), Some("Glider"));
        assert_eq!(pattern.author.as_deref(), Some("Richard K. Guy"));
        assert_eq!(pattern.comments.len(), 1);
        assert_eq!(pattern.rule, Some(B3S23));
        assert_eq!((pattern.width, pattern.height), (3, 3));
        assert_eq!(
            pattern.alive,
            vec![(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)]
        );
    }

    #[test]
    fn read_multiline_body() {
        let pattern = read_rle("x = 4, y = 3\n2o\n$\n$4o!\n").unwrap();

        assert_eq!(pattern.rule, None);
        assert_eq!(
            pattern.alive,
            vec![(0, 0), (0, 1), (2, 0), (2, 1), (2, 2), (2, 3)]
        );
    }

    #[test]
    fn counted_line_ends() {
        let pattern = read_rle("x = 1, y = 3\no2$o!").unwrap();

        assert_eq!(pattern.alive, vec![(0, 0), (2, 0)]);
    }

    #[test]
    fn nameless_rule_comment() {
        let pattern = read_rle("#r 23/3\nx = 1, y = 1\no!").unwrap();

        assert_eq!(pattern.rule, Some(B3S23));
    }

    #[test]
    fn missing_header() {
        assert_eq!(read_rle("#N nothing\n"), Err(PatternError::MissingHeader));
    }

    #[test]
    fn header_errors() {
        assert_eq!(
            read_rle("x = 3\n3o!"),
            Err(HeaderError::MissingField { field: "y" }.into())
        );
        assert_eq!(
            read_rle("x = three, y = 1\n3o!"),
            Err(HeaderError::InvalidNumber {
                field: "x",
                got: "three".to_string()
            }
            .into())
        );
    }

    #[test]
    fn encoding_errors() {
        assert_eq!(
            read_rle("x = 3, y = 1\n3o"),
            Err(EncodingError::UnexpectedEof.into())
        );
        assert_eq!(
            read_rle("x = 3, y = 1\n3q!"),
            Err(EncodingError::UnrecognizedTag { got: 'q' }.into())
        );
        assert_eq!(
            read_rle("x = 3, y = 1\n3o2!"),
            Err(EncodingError::DanglingCount { count: 2 }.into())
        );
        assert_eq!(
            read_rle("x = 2, y = 1\n3o!"),
            Err(EncodingError::OutOfBounds {
                row: 0,
                col: 2,
                width: 2,
                height: 1
            }
            .into())
        );
    }

    #[test]
    fn zero_run_rejected() {
        assert_eq!(
            read_rle("x = 1, y = 1\n$0o!"),
            Err(EncodingError::ZeroCount { tag: 'o' }.into())
        );
        assert_eq!(
            read_rle("x = 1, y = 1\n0bo!"),
            Err(EncodingError::ZeroCount { tag: 'b' }.into())
        );
    }

    #[test]
    fn huge_dead_runs_are_out_of_bounds() {
        let max = usize::MAX;
        let text = format!("x = 2, y = 1\n{max}b{max}bo!");

        assert_eq!(
            read_rle(&text),
            Err(EncodingError::OutOfBounds {
                row: 0,
                col: max,
                width: 2,
                height: 1
            }
            .into())
        );
    }

    #[test]
    fn huge_line_ends_are_out_of_bounds() {
        let max = usize::MAX;
        let text = format!("x = 1, y = 2\n{max}$$o!");

        assert_eq!(
            read_rle(&text),
            Err(EncodingError::OutOfBounds {
                row: max,
                col: 0,
                width: 1,
                height: 2
            }
            .into())
        );
    }

    #[test]
    fn overlong_count_saturates() {
        let text = "x = 2, y = 1\n99999999999999999999999999o!";

        assert!(matches!(
            read_rle(text),
            Err(PatternError::Encoding(EncodingError::OutOfBounds { .. }))
        ));
    }

    #[test]
    fn trailing_dead_cells_and_line_ends_are_fine() {
        let pattern = read_rle("x = 2, y = 1\no5b3$!").unwrap();

        assert_eq!(pattern.alive, vec![(0, 0)]);
    }

    #[test]
    fn bounded_grid_rule() {
        let pattern = read_rle("x = 3, y = 1, rule = B3/S23:T20,20\n3o!").unwrap();

        assert_eq!(pattern.rule, Some(B3S23));
        assert_eq!((pattern.width, pattern.height), (3, 1));

        let torus = read_rle("x = 1, y = 1, rule = 23/3:T8,8\no!").unwrap();
        assert_eq!(torus.rule, Some(B3S23));
    }

    #[test]
    fn bad_rule_in_header() {
        assert!(matches!(
            read_rle("x = 1, y = 1, rule = B9/S23\no!"),
            Err(PatternError::Header(HeaderError::Rule(_)))
        ));
        assert!(matches!(
            read_rle("x = 1, y = 1, rule B3/S23\no!"),
            Err(PatternError::Header(HeaderError::Malformed { .. }))
        ));
    }

    #[test]
    fn place_and_center() {
        let pattern = read_rle(GLIDER).unwrap();

        let placed = pattern.place(5, (0, 0)).unwrap();
        let expected = Grid::parse(
            "
            .O...
            ..O..
            OOO..
            .....
            .....
            ",
        )
        .unwrap();
        assert_eq!(placed, expected);

        let centered = pattern.centered(5).unwrap();
        assert_eq!(centered[(1, 2)], crate::cell::Cell::Alive);
        assert_eq!(centered.population(), 5);
    }

    #[test]
    fn place_wraps() {
        let pattern = read_rle("x = 2, y = 1\n2o!").unwrap();
        let grid = pattern.place(4, (3, 3)).unwrap();

        assert_eq!(grid[(3, 3)], crate::cell::Cell::Alive);
        assert_eq!(grid[(3, 0)], crate::cell::Cell::Alive);
    }

    #[test]
    fn place_with_huge_origin() {
        let pattern = read_rle("x = 2, y = 1\n2o!").unwrap();
        let max = usize::MAX;

        // usize::MAX % 4 == 3
        let grid = pattern.place(4, (max, max)).unwrap();

        assert_eq!(grid, pattern.place(4, (3, 3)).unwrap());
    }

    #[test]
    fn too_large() {
        let pattern = read_rle(GLIDER).unwrap();

        assert_eq!(
            pattern.place(2, (0, 0)),
            Err(PatternError::TooLarge {
                width: 3,
                height: 3,
                side: 2
            })
        );
    }

    #[test]
    fn plaintext() {
        let pattern = read_plaintext("!Name: Blinker\n!\nOOO\n").unwrap();

        assert_eq!(pattern.name.as_deref(), Some("Blinker"));
        assert_eq!((pattern.width, pattern.height), (3, 1));
        assert_eq!(pattern.alive, vec![(0, 0), (0, 1), (0, 2)]);

        let ragged = read_plaintext(".O\nO..\n").unwrap();
        assert_eq!((ragged.width, ragged.height), (3, 2));

        assert_eq!(
            read_plaintext("O?O"),
            Err(EncodingError::UnrecognizedTag { got: '?' }.into())
        );
    }
}
