//! Border settings

use super::Color;

/// Borders for all four edges of a styled cell
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Borders {
    /// Left border
    pub left: Option<BorderEdge>,
    /// Right border
    pub right: Option<BorderEdge>,
    /// Top border
    pub top: Option<BorderEdge>,
    /// Bottom border
    pub bottom: Option<BorderEdge>,
}

impl Borders {
    /// Create borders with no edges
    pub fn new() -> Self {
        Self::default()
    }

    /// Set all four edges to the same style
    pub fn outline(line: BorderLine, color: Color) -> Self {
        let edge = Some(BorderEdge::new(line, color));
        Self {
            left: edge.clone(),
            right: edge.clone(),
            top: edge.clone(),
            bottom: edge,
        }
    }

    /// Set the left edge
    pub fn with_left(mut self, line: BorderLine, color: Color) -> Self {
        self.left = Some(BorderEdge::new(line, color));
        self
    }

    /// Set the right edge
    pub fn with_right(mut self, line: BorderLine, color: Color) -> Self {
        self.right = Some(BorderEdge::new(line, color));
        self
    }

    /// Set the top edge
    pub fn with_top(mut self, line: BorderLine, color: Color) -> Self {
        self.top = Some(BorderEdge::new(line, color));
        self
    }

    /// Set the bottom edge
    pub fn with_bottom(mut self, line: BorderLine, color: Color) -> Self {
        self.bottom = Some(BorderEdge::new(line, color));
        self
    }

    /// Check whether no edge is set
    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.right.is_none() && self.top.is_none() && self.bottom.is_none()
    }
}

/// A single border edge
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BorderEdge {
    /// Line style (carries the weight)
    pub line: BorderLine,
    /// Line color
    pub color: Color,
}

impl BorderEdge {
    /// Create a new border edge
    pub fn new(line: BorderLine, color: Color) -> Self {
        Self { line, color }
    }

    /// Create a thin black edge
    pub fn thin() -> Self {
        Self::new(BorderLine::Thin, Color::BLACK)
    }
}

/// Border line styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BorderLine {
    /// No border
    #[default]
    None,
    /// Hair line (very thin)
    Hair,
    /// Thin line
    Thin,
    /// Medium line
    Medium,
    /// Thick line
    Thick,
    /// Dashed line
    Dashed,
    /// Dotted line
    Dotted,
    /// Double line
    Double,
}

impl BorderLine {
    /// The SpreadsheetML style name for this line
    pub fn xlsx_name(&self) -> &'static str {
        match self {
            BorderLine::None => "none",
            BorderLine::Hair => "hair",
            BorderLine::Thin => "thin",
            BorderLine::Medium => "medium",
            BorderLine::Thick => "thick",
            BorderLine::Dashed => "dashed",
            BorderLine::Dotted => "dotted",
            BorderLine::Double => "double",
        }
    }
}
