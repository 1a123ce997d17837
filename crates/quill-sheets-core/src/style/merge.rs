//! Merge descriptors
//!
//! A merge descriptor says how many adjacent cells a styled value spans and
//! in which direction. Expanding an anchor point into the merged range is a
//! pure function; the operation applying the style performs the actual merge
//! through the engine.

use crate::point::Point;
use crate::range::Range;

/// Direction a merged value extends in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MergeOrientation {
    /// Extend across columns
    #[default]
    Horizontal,
    /// Extend down rows
    Vertical,
}

/// How many cells a styled value spans, and in which direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MergeSpec {
    /// Total cell count including the anchor; 1 means no merge
    pub cells: u32,
    /// Merge direction
    pub orientation: MergeOrientation,
}

impl MergeSpec {
    /// Create a horizontal merge spanning `cells` columns
    pub fn horizontal(cells: u32) -> Self {
        Self {
            cells: cells.max(1),
            orientation: MergeOrientation::Horizontal,
        }
    }

    /// Create a vertical merge spanning `cells` rows
    pub fn vertical(cells: u32) -> Self {
        Self {
            cells: cells.max(1),
            orientation: MergeOrientation::Vertical,
        }
    }

    /// True when this spec merges nothing (a single cell)
    pub fn is_single(&self) -> bool {
        self.cells <= 1
    }

    /// Expand an anchor point into the range the merged value occupies.
    ///
    /// Horizontal merges extend columns by `cells - 1`, vertical merges
    /// extend rows; `cells = 1` yields the anchor cell alone.
    pub fn range_from(&self, anchor: &Point) -> Range {
        if self.is_single() {
            return Range::single(*anchor);
        }
        let extra = i64::from(self.cells - 1);
        let end = match self.orientation {
            MergeOrientation::Horizontal => anchor.offsetted(0, extra),
            MergeOrientation::Vertical => anchor.offsetted(extra, 0),
        };
        Range::new(*anchor, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor() -> Point {
        Point::new(4, 2).unwrap()
    }

    #[test]
    fn test_horizontal_merge_extends_columns() {
        let range = MergeSpec::horizontal(3).range_from(&anchor());
        assert_eq!(range.address(), "B4:D4");
        assert_eq!(range.column_count(), 3);
        assert_eq!(range.row_count(), 1);
    }

    #[test]
    fn test_vertical_merge_extends_rows() {
        let range = MergeSpec::vertical(3).range_from(&anchor());
        assert_eq!(range.address(), "B4:B6");
        assert_eq!(range.row_count(), 3);
        assert_eq!(range.column_count(), 1);
    }

    #[test]
    fn test_single_cell_merge_is_anchor_only() {
        let range = MergeSpec::horizontal(1).range_from(&anchor());
        assert!(range.is_single_cell());
        assert_eq!(range.address(), "B4");
    }

    #[test]
    fn test_zero_cells_clamps_to_one() {
        assert!(MergeSpec::horizontal(0).is_single());
    }
}
