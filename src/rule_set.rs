use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::cell::Cell;

/// Rules of Conway's Game of Life.
pub const B3S23: RuleSet = RuleSet::new(0b1000, 0b1100);

/// A life-like rule: which neighbor counts bring a dead cell to life, and which keep a live
/// cell alive.
///
/// # Representation
/// Life rules are represented as
/// ```notrust
/// |------birth------|
/// 0000_0000_0000_0000_0000_0000_0000_0000
///                     |----survival-----|
/// ```
///
/// # Examples
/// ```notrust
/// b3s23:                0000_0000_0000_1000_0000_0000_0000_1100
///
/// b0s0:                 0000_0000_0000_0000_0000_0000_0000_0000
/// b012345678s012345678: 0000_0001_1111_1111_0000_0001_1111_1111
/// ```
///
/// See: https://conwaylife.com/wiki/Rulestring
#[repr(transparent)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct RuleSet {
    rule: u32,
}

impl Default for RuleSet {
    fn default() -> Self {
        B3S23
    }
}

impl RuleSet {
    /// Create a new `RuleSet` for the given births and survivals. For both `b` and `s`, bit `i`
    /// being on means a count of `i` is included. Any bit past the 8th is ignored.
    pub const fn new(b: u16, s: u16) -> Self {
        let b = b & 0x1FF;
        let s = s & 0x1FF;

        Self {
            rule: (b as u32) << 16 | s as u32,
        }
    }

    pub const fn births(&self) -> u16 {
        ((self.rule & 0x1FF0000) >> 0x10) as u16
    }

    pub const fn survivals(&self) -> u16 {
        (self.rule & 0x1FF) as u16
    }

    /// State of a cell in the next generation, given its current state and `n` live neighbors.
    pub const fn next_state(&self, cell: Cell, n: u8) -> Cell {
        // Counts past 8 can't happen on a Moore neighborhood
        if n > 8 {
            return Cell::Dead;
        }

        let bit = 1u16 << n;

        let set = match cell {
            Cell::Dead => self.births(),
            Cell::Alive => self.survivals(),
        };

        if set & bit == bit {
            Cell::Alive
        } else {
            Cell::Dead
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("Rulestring is empty")]
    Empty,

    #[error("Expected '/' between births and survivals in \"{rule}\"")]
    MissingSlash { rule: String },

    #[error("Expected a 'B' section, found \"{got}\"")]
    MissingBirth { got: String },

    #[error("Expected an 'S' section, found \"{got}\"")]
    MissingSurvival { got: String },

    #[error("Invalid neighbor count '{got}', expected a digit 0-8")]
    InvalidDigit { got: char },
}

/// Convert the human readable neighbor counts to a packed bit representation
fn digits_to_bits(digits: &str) -> Result<u16, RuleError> {
    let mut n = 0;

    for c in digits.chars() {
        match c.to_digit(10) {
            Some(d) if d <= 8 => n |= 1 << d,
            _ => return Err(RuleError::InvalidDigit { got: c }),
        }
    }

    Ok(n)
}

/// # Format
///
/// Either `B[0-8]*/S[0-8]*` (case insensitive, the slash is optional), or the older nameless
/// `[0-8]*/[0-8]*` which lists survivals first, as found in RLE `#r` lines.
impl FromStr for RuleSet {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.is_empty() {
            return Err(RuleError::Empty);
        }

        let Some(rest) = s.strip_prefix(['b', 'B']) else {
            // survivals/births
            let Some((survivals, births)) = s.split_once('/') else {
                return Err(RuleError::MissingSlash {
                    rule: s.to_string(),
                });
            };

            if !survivals.starts_with(|c: char| c.is_ascii_digit()) && !survivals.is_empty() {
                return Err(RuleError::MissingBirth { got: s.to_string() });
            }

            let b = digits_to_bits(births)?;
            let s = digits_to_bits(survivals)?;

            return Ok(RuleSet::new(b, s));
        };

        let Some(split) = rest.find(['s', 'S']) else {
            return Err(RuleError::MissingSurvival {
                got: rest.to_string(),
            });
        };

        let (births, survivals) = rest.split_at(split);
        let births = births.strip_suffix('/').unwrap_or(births);
        let survivals = &survivals[1..];

        let b = digits_to_bits(births)?;
        let s = digits_to_bits(survivals)?;

        Ok(RuleSet::new(b, s))
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_counts(f: &mut fmt::Formatter<'_>, bits: u16) -> fmt::Result {
            for n in 0..=8 {
                if bits & (1 << n) != 0 {
                    write!(f, "{n}")?;
                }
            }

            Ok(())
        }

        write!(f, "B")?;
        write_counts(f, self.births())?;
        write!(f, "/S")?;
        write_counts(f, self.survivals())
    }
}
