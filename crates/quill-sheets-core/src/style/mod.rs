//! Style descriptors
//!
//! A [`StyleDescriptor`] is a named bundle of formatting configuration the
//! caller builds up front. Descriptors are plain data: nothing happens until
//! an operation hands one to the style resolver, which flattens the
//! inheritance chain into concrete [`StyleAttributes`] and registers those on
//! the workbook.

mod alignment;
mod border;
mod color;
mod font;
mod format;
mod merge;

pub use alignment::{Alignment, HorizontalAlignment, VerticalAlignment};
pub use border::{BorderEdge, BorderLine, Borders};
pub use color::Color;
pub use font::{FontSpec, Underline};
pub use format::{DateTimeFormatSpec, NumberFormatSpec, NumberLocale, ValueFormat};
pub use merge::{MergeOrientation, MergeSpec};

/// Fill configuration: a base color plus an optional alternate used for
/// odd/even row banding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FillSpec {
    /// Base fill color
    pub color: Color,
    /// Fill color used for the derived "{name}_Alternate" style
    pub alternate_color: Option<Color>,
}

impl FillSpec {
    /// Solid fill with no banding
    pub fn solid(color: Color) -> Self {
        Self {
            color,
            alternate_color: None,
        }
    }

    /// Fill with an alternate banding color
    pub fn banded(color: Color, alternate: Color) -> Self {
        Self {
            color,
            alternate_color: Some(alternate),
        }
    }
}

/// A named style definition with optional inheritance.
///
/// Every field other than `name` is optional; at resolution time the
/// inherited style's fields (if any) are merged in as defaults beneath the
/// explicit overrides set here.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyleDescriptor {
    /// Unique style name within one resolution scope
    pub name: String,
    /// Name of the style whose fields serve as defaults
    pub inherits: Option<String>,
    /// Font settings
    pub font: Option<FontSpec>,
    /// Fill settings (base + optional banding alternate)
    pub fill: Option<FillSpec>,
    /// Border settings
    pub borders: Option<Borders>,
    /// Alignment settings
    pub alignment: Option<Alignment>,
    /// Data-type/format settings
    pub format: Option<ValueFormat>,
    /// Merge descriptor for values written with this style
    pub merge: Option<MergeSpec>,
    /// Write the value into the cell (styling is applied regardless);
    /// unset means true
    pub show_content: Option<bool>,
}

impl StyleDescriptor {
    /// Create an empty descriptor with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Inherit defaults from another named style
    pub fn inherits<S: Into<String>>(mut self, parent: S) -> Self {
        self.inherits = Some(parent.into());
        self
    }

    /// Set font settings
    pub fn with_font(mut self, font: FontSpec) -> Self {
        self.font = Some(font);
        self
    }

    /// Set a solid fill color
    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill = Some(FillSpec::solid(color));
        self
    }

    /// Set a fill color with an alternate banding color
    pub fn with_banded_fill(mut self, color: Color, alternate: Color) -> Self {
        self.fill = Some(FillSpec::banded(color, alternate));
        self
    }

    /// Set border settings
    pub fn with_borders(mut self, borders: Borders) -> Self {
        self.borders = Some(borders);
        self
    }

    /// Set alignment settings
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    /// Set the data-type/format
    pub fn with_format(mut self, format: ValueFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Set the merge descriptor
    pub fn with_merge(mut self, merge: MergeSpec) -> Self {
        self.merge = Some(merge);
        self
    }

    /// Control whether the value is written (styling always applies)
    pub fn with_show_content(mut self, show: bool) -> Self {
        self.show_content = Some(show);
        self
    }

    /// Layer this descriptor's explicit fields over a parent's.
    ///
    /// The child's name and `inherits` link are kept; every unset field is
    /// filled from the parent.
    pub fn layer_over(&self, parent: &StyleDescriptor) -> StyleDescriptor {
        StyleDescriptor {
            name: self.name.clone(),
            inherits: self.inherits.clone(),
            font: self.font.clone().or_else(|| parent.font.clone()),
            fill: self.fill.or(parent.fill),
            borders: self.borders.clone().or_else(|| parent.borders.clone()),
            alignment: self.alignment.or(parent.alignment),
            format: self.format.clone().or_else(|| parent.format.clone()),
            merge: self.merge.or(parent.merge),
            show_content: self.show_content.or(parent.show_content),
        }
    }

    /// Flatten into the concrete attributes registered with the engine,
    /// substituting defaults for unset fields.
    pub fn attributes(&self) -> StyleAttributes {
        StyleAttributes {
            font: self.font.clone().unwrap_or_default(),
            fill: self.fill.map(|f| f.color),
            borders: self.borders.clone().unwrap_or_default(),
            alignment: self.alignment.unwrap_or_default(),
            format: self.format.clone().unwrap_or_default(),
        }
    }
}

/// Concrete, fully-defaulted style attributes as registered on a workbook.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyleAttributes {
    /// Font settings
    pub font: FontSpec,
    /// Solid fill color, if any
    pub fill: Option<Color>,
    /// Border settings
    pub borders: Borders,
    /// Alignment settings
    pub alignment: Alignment,
    /// Data-type/format settings
    pub format: ValueFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_over_child_wins() {
        let parent = StyleDescriptor::new("base")
            .with_fill(Color::RED)
            .with_format(ValueFormat::number(2));
        let child = StyleDescriptor::new("child")
            .inherits("base")
            .with_fill(Color::BLUE);

        let flat = child.layer_over(&parent);
        assert_eq!(flat.name, "child");
        assert_eq!(flat.fill, Some(FillSpec::solid(Color::BLUE)));
        // Unset fields come from the parent
        assert_eq!(flat.format, Some(ValueFormat::number(2)));
    }

    #[test]
    fn test_attributes_defaults() {
        let attrs = StyleDescriptor::new("plain").attributes();
        assert_eq!(attrs.font, FontSpec::default());
        assert_eq!(attrs.fill, None);
        assert_eq!(attrs.format, ValueFormat::Text);
    }
}
