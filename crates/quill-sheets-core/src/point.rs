//! Cell coordinate type
//!
//! Coordinates are 1-based throughout: row 1, column 1 is the top-left cell
//! ("A1"). A [`Point`] can never hold a row or column of 0.

use crate::error::{Error, Result};
use crate::range::Range;
use std::fmt;
use std::str::FromStr;

/// Which components of an address render as absolute (`$`) references.
///
/// The strategy only affects address rendering; coordinate arithmetic ignores
/// it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbsoluteStrategy {
    /// Fully relative reference (e.g. "B4")
    #[default]
    None,
    /// Absolute row (e.g. "B$4")
    Row,
    /// Absolute column (e.g. "$B4")
    Column,
    /// Absolute row and column (e.g. "$B$4")
    Both,
}

impl AbsoluteStrategy {
    fn row_absolute(self) -> bool {
        matches!(self, AbsoluteStrategy::Row | AbsoluteStrategy::Both)
    }

    fn column_absolute(self) -> bool {
        matches!(self, AbsoluteStrategy::Column | AbsoluteStrategy::Both)
    }
}

/// A 1-based cell coordinate (e.g. "B4", "$B$4")
///
/// Rows and columns are always at least 1; construction that would violate
/// this fails, and [`Point::offset`] saturates rather than leaving the valid
/// domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    row: u32,
    column: u32,
    absolute: AbsoluteStrategy,
}

impl Default for Point {
    fn default() -> Self {
        Self {
            row: 1,
            column: 1,
            absolute: AbsoluteStrategy::None,
        }
    }
}

impl Point {
    /// Create a new point with relative references
    ///
    /// # Examples
    /// ```
    /// use quill_sheets_core::Point;
    ///
    /// let p = Point::new(4, 2).unwrap();
    /// assert_eq!(p.row(), 4);
    /// assert_eq!(p.column(), 2);
    /// assert!(Point::new(0, 1).is_err());
    /// ```
    pub fn new(row: u32, column: u32) -> Result<Self> {
        if row == 0 || column == 0 {
            return Err(Error::InvalidCoordinate(format!(
                "row and column are 1-based, got ({}, {})",
                row, column
            )));
        }
        Ok(Self {
            row,
            column,
            absolute: AbsoluteStrategy::None,
        })
    }

    /// Create a point with the given absolute-reference strategy
    pub fn with_absolute(row: u32, column: u32, absolute: AbsoluteStrategy) -> Result<Self> {
        let mut point = Self::new(row, column)?;
        point.absolute = absolute;
        Ok(point)
    }

    /// Get the 1-based row
    pub fn row(&self) -> u32 {
        self.row
    }

    /// Get the 1-based column
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Get the absolute-reference strategy
    pub fn absolute(&self) -> AbsoluteStrategy {
        self.absolute
    }

    /// Set the absolute-reference strategy, consuming self
    pub fn as_absolute(mut self, absolute: AbsoluteStrategy) -> Self {
        self.absolute = absolute;
        self
    }

    /// Move the point by the given row/column deltas.
    ///
    /// Arithmetic saturates at the edges of the 1-based domain: an offset can
    /// never produce a row or column of 0, and overflow clamps instead of
    /// wrapping.
    pub fn offset(&mut self, rows: i64, columns: i64) {
        self.row = saturate(i64::from(self.row) + rows);
        self.column = saturate(i64::from(self.column) + columns);
    }

    /// Return a copy moved by the given deltas, leaving self untouched
    pub fn offsetted(&self, rows: i64, columns: i64) -> Self {
        let mut point = *self;
        point.offset(rows, columns);
        point
    }

    /// Expand this point into a range spanning `rows` x `columns` cells.
    ///
    /// The point stays the top-left corner; a size of 1 in an axis means no
    /// expansion in that axis. A size of 0 is rejected.
    pub fn expand(&self, rows: u32, columns: u32) -> Result<Range> {
        if rows == 0 || columns == 0 {
            return Err(Error::InvalidSize(format!(
                "expansion must cover at least one cell, got {}x{}",
                rows, columns
            )));
        }
        let end = Point::new(
            self.row.saturating_add(rows - 1),
            self.column.saturating_add(columns - 1),
        )?;
        Ok(Range::new(*self, end))
    }

    /// Parse a point from A1-style notation
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidAddress("empty address".into()));
        }

        let bytes = s.as_bytes();
        let mut pos = 0;

        let column_absolute = if bytes.get(pos) == Some(&b'$') {
            pos += 1;
            true
        } else {
            false
        };

        let column_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
            pos += 1;
        }
        if pos == column_start {
            return Err(Error::InvalidAddress(format!(
                "no column letters in '{}'",
                s
            )));
        }
        let column = Self::letters_to_column(&s[column_start..pos])?;

        let row_absolute = if bytes.get(pos) == Some(&b'$') {
            pos += 1;
            true
        } else {
            false
        };

        let row_str = &s[pos..];
        if row_str.is_empty() {
            return Err(Error::InvalidAddress(format!("no row number in '{}'", s)));
        }
        let row: u32 = row_str
            .parse()
            .map_err(|_| Error::InvalidAddress(format!("invalid row number in '{}'", s)))?;
        if row == 0 {
            return Err(Error::InvalidAddress(format!(
                "row number must be >= 1 in '{}'",
                s
            )));
        }

        let absolute = match (row_absolute, column_absolute) {
            (true, true) => AbsoluteStrategy::Both,
            (true, false) => AbsoluteStrategy::Row,
            (false, true) => AbsoluteStrategy::Column,
            (false, false) => AbsoluteStrategy::None,
        };

        Self::with_absolute(row, column, absolute)
    }

    /// Convert a 1-based column number to letters (1 = A, 26 = Z, 27 = AA)
    pub fn column_to_letters(column: u32) -> String {
        let mut result = String::new();
        let mut n = column;

        while n > 0 {
            n -= 1;
            let c = ((n % 26) as u8 + b'A') as char;
            result.insert(0, c);
            n /= 26;
        }

        result
    }

    /// Convert column letters to a 1-based column number (A = 1, AA = 27)
    pub fn letters_to_column(letters: &str) -> Result<u32> {
        if letters.is_empty() {
            return Err(Error::InvalidAddress("empty column letters".into()));
        }

        let mut column: u32 = 0;
        for c in letters.chars() {
            if !c.is_ascii_alphabetic() {
                return Err(Error::InvalidAddress(format!(
                    "invalid column letter '{}'",
                    c
                )));
            }
            column = column * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
        }

        Ok(column)
    }

    /// Format as an A1-style address, honoring the absolute strategy
    pub fn address(&self) -> String {
        let mut result = String::new();

        if self.absolute.column_absolute() {
            result.push('$');
        }
        result.push_str(&Self::column_to_letters(self.column));

        if self.absolute.row_absolute() {
            result.push('$');
        }
        result.push_str(&self.row.to_string());

        result
    }
}

fn saturate(v: i64) -> u32 {
    v.clamp(1, i64::from(u32::MAX)) as u32
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address())
    }
}

impl FromStr for Point {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
