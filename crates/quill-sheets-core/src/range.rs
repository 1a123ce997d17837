//! Rectangular cell ranges

use crate::error::{Error, Result};
use crate::point::Point;
use std::fmt;
use std::str::FromStr;

/// An inclusive rectangle of cells (e.g. "B4:C6")
///
/// Ranges are normalized on construction: `start` is always the top-left
/// corner and `end` the bottom-right, so `end.row >= start.row` and
/// `end.column >= start.column` hold for every constructed range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    start: Point,
    end: Point,
}

impl Range {
    /// Create a range from two arbitrary corners, normalizing their order
    pub fn new(a: Point, b: Point) -> Self {
        let (start_row, end_row) = if a.row() <= b.row() {
            (a.row(), b.row())
        } else {
            (b.row(), a.row())
        };
        let (start_column, end_column) = if a.column() <= b.column() {
            (a.column(), b.column())
        } else {
            (b.column(), a.column())
        };

        // Coordinates come from valid points, so reconstruction cannot fail.
        let start = Point::with_absolute(start_row, start_column, a.absolute())
            .expect("normalized corner is valid");
        let end = Point::with_absolute(end_row, end_column, b.absolute())
            .expect("normalized corner is valid");

        Self { start, end }
    }

    /// Create a single-cell range
    pub fn single(point: Point) -> Self {
        Self {
            start: point,
            end: point,
        }
    }

    /// Create a range from 1-based row/column numbers
    pub fn from_coordinates(
        start_row: u32,
        start_column: u32,
        end_row: u32,
        end_column: u32,
    ) -> Result<Self> {
        Ok(Self::new(
            Point::new(start_row, start_column)?,
            Point::new(end_row, end_column)?,
        ))
    }

    /// Parse a range from "A1:B10" notation (a bare "C3" is a single cell)
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if let Some(colon) = s.find(':') {
            let start = Point::parse(&s[..colon])?;
            let end = Point::parse(&s[colon + 1..])?;
            Ok(Self::new(start, end))
        } else if s.is_empty() {
            Err(Error::InvalidRange("empty range".into()))
        } else {
            Ok(Self::single(Point::parse(s)?))
        }
    }

    /// Top-left corner
    pub fn start(&self) -> Point {
        self.start
    }

    /// Bottom-right corner
    pub fn end(&self) -> Point {
        self.end
    }

    /// Number of rows spanned
    pub fn row_count(&self) -> u32 {
        self.end.row() - self.start.row() + 1
    }

    /// Number of columns spanned
    pub fn column_count(&self) -> u32 {
        self.end.column() - self.start.column() + 1
    }

    /// Total cell count
    pub fn cell_count(&self) -> u64 {
        u64::from(self.row_count()) * u64::from(self.column_count())
    }

    /// True for a range covering exactly one cell
    pub fn is_single_cell(&self) -> bool {
        self.start.row() == self.end.row() && self.start.column() == self.end.column()
    }

    /// Check whether a point lies inside this range
    pub fn contains(&self, point: &Point) -> bool {
        point.row() >= self.start.row()
            && point.row() <= self.end.row()
            && point.column() >= self.start.column()
            && point.column() <= self.end.column()
    }

    /// Check whether two ranges overlap
    pub fn overlaps(&self, other: &Range) -> bool {
        self.start.row() <= other.end.row()
            && self.end.row() >= other.start.row()
            && self.start.column() <= other.end.column()
            && self.end.column() >= other.start.column()
    }

    /// Iterate over all cells in row-major order
    pub fn cells(&self) -> RangeIterator {
        RangeIterator {
            range: *self,
            current_row: self.start.row(),
            current_column: self.start.column(),
            done: false,
        }
    }

    /// Format as an address string; single-cell ranges render as one address
    pub fn address(&self) -> String {
        if self.is_single_cell() {
            self.start.address()
        } else {
            format!("{}:{}", self.start.address(), self.end.address())
        }
    }
}

impl From<Point> for Range {
    fn from(point: Point) -> Self {
        Range::single(point)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address())
    }
}

impl FromStr for Range {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Iterator over the cells of a range, row by row
pub struct RangeIterator {
    range: Range,
    current_row: u32,
    current_column: u32,
    done: bool,
}

impl Iterator for RangeIterator {
    type Item = Point;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let point =
            Point::new(self.current_row, self.current_column).expect("iterator stays in domain");

        if self.current_column < self.range.end.column() {
            self.current_column += 1;
        } else if self.current_row < self.range.end.row() {
            self.current_column = self.range.start.column();
            self.current_row += 1;
        } else {
            self.done = true;
        }

        Some(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn point(row: u32, column: u32) -> Point {
        Point::new(row, column).unwrap()
    }

    #[test]
    fn test_normalization() {
        let range = Range::new(point(6, 3), point(4, 2));
        assert_eq!(range.start().row(), 4);
        assert_eq!(range.start().column(), 2);
        assert_eq!(range.end().row(), 6);
        assert_eq!(range.end().column(), 3);
    }

    #[test]
    fn test_parse_and_address() {
        let range = Range::parse("B4:C6").unwrap();
        assert_eq!(range.address(), "B4:C6");
        assert_eq!(range.row_count(), 3);
        assert_eq!(range.column_count(), 2);

        let single = Range::parse("C3").unwrap();
        assert!(single.is_single_cell());
        assert_eq!(single.address(), "C3");

        assert!(Range::parse("").is_err());
        assert!(Range::parse("B4:").is_err());
    }

    #[test]
    fn test_contains() {
        let range = Range::parse("B2:D4").unwrap();
        assert!(range.contains(&point(2, 2)));
        assert!(range.contains(&point(4, 4)));
        assert!(range.contains(&point(3, 3)));
        assert!(!range.contains(&point(1, 1)));
        assert!(!range.contains(&point(5, 2)));
    }

    #[test]
    fn test_overlaps() {
        let a = Range::parse("A1:C3").unwrap();
        assert!(a.overlaps(&Range::parse("B2:D4").unwrap()));
        assert!(!a.overlaps(&Range::parse("D4:E5").unwrap()));
    }

    #[test]
    fn test_cells_iteration_row_major() {
        let range = Range::parse("A1:B2").unwrap();
        let cells: Vec<_> = range.cells().collect();

        assert_eq!(cells.len(), 4);
        assert_eq!(cells[0], point(1, 1)); // A1
        assert_eq!(cells[1], point(1, 2)); // B1
        assert_eq!(cells[2], point(2, 1)); // A2
        assert_eq!(cells[3], point(2, 2)); // B2
    }

    proptest! {
        #[test]
        fn prop_normalized(r1 in 1u32..1000, c1 in 1u32..1000, r2 in 1u32..1000, c2 in 1u32..1000) {
            let range = Range::new(point(r1, c1), point(r2, c2));
            prop_assert!(range.end().row() >= range.start().row());
            prop_assert!(range.end().column() >= range.start().column());
            prop_assert_eq!(range.cell_count(), u64::from(range.row_count()) * u64::from(range.column_count()));
        }

        #[test]
        fn prop_iteration_matches_cell_count(r1 in 1u32..40, c1 in 1u32..40, r2 in 1u32..40, c2 in 1u32..40) {
            let range = Range::new(point(r1, c1), point(r2, c2));
            prop_assert_eq!(range.cells().count() as u64, range.cell_count());
        }
    }
}
