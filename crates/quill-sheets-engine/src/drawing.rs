//! Drawing model objects
//!
//! Pictures, shapes, sparkline groups and embedded charts are kept as model
//! state on their worksheet. The physical drawing encoding is outside this
//! engine's scope; the assembly layer only needs the objects to be
//! addressable by name and anchored to a range.

use quill_sheets_chart::{Chart, Sparkline};
use quill_sheets_core::{Color, Range};

/// Image format of a picture's data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PictureFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
}

impl PictureFormat {
    /// Detect the format from the data's magic bytes
    pub fn sniff(data: &[u8]) -> Option<Self> {
        if data.starts_with(&[0x89, b'P', b'N', b'G']) {
            Some(PictureFormat::Png)
        } else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(PictureFormat::Jpeg)
        } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            Some(PictureFormat::Gif)
        } else if data.starts_with(b"BM") {
            Some(PictureFormat::Bmp)
        } else {
            None
        }
    }

    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            PictureFormat::Png => "png",
            PictureFormat::Jpeg => "jpeg",
            PictureFormat::Gif => "gif",
            PictureFormat::Bmp => "bmp",
        }
    }
}

/// Border/outline applied to a drawing element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawingBorder {
    /// Line color
    pub color: Color,
    /// Line weight in points
    pub weight: f64,
}

impl DrawingBorder {
    /// Create a border with the given color and weight
    pub fn new(color: Color, weight: f64) -> Self {
        Self { color, weight }
    }
}

/// An embedded picture
#[derive(Debug, Clone)]
pub struct Picture {
    /// Element name, unique per sheet
    pub name: String,
    /// Raw image data
    pub data: Vec<u8>,
    /// Image format
    pub format: PictureFormat,
    /// Cell range the picture is anchored to
    pub anchor: Range,
    /// Optional outline
    pub border: Option<DrawingBorder>,
}

/// Shape kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Rectangle,
    RoundedRectangle,
    Ellipse,
    TextBox,
}

/// A drawn shape
#[derive(Debug, Clone)]
pub struct Shape {
    /// Element name, unique per sheet
    pub name: String,
    /// Shape kind
    pub kind: ShapeKind,
    /// Cell range the shape is anchored to
    pub anchor: Range,
    /// Text content, if any
    pub text: Option<String>,
    /// Fill color
    pub fill: Option<Color>,
    /// Outline
    pub line: Option<DrawingBorder>,
    /// Drop shadow
    pub shadow: bool,
}

/// A sparkline group: one mini-chart rendered over a location range
#[derive(Debug, Clone)]
pub struct SparklineGroup {
    /// Element name, unique per sheet
    pub name: String,
    /// Sparkline definition (kind, data range, color)
    pub sparkline: Sparkline,
    /// Cell range the sparkline is rendered in
    pub location: Range,
}

/// An embedded chart
#[derive(Debug, Clone)]
pub struct ChartObject {
    /// Element name, unique per sheet
    pub name: String,
    /// Chart definition
    pub chart: Chart,
    /// Cell range the chart is anchored to
    pub anchor: Range,
}
