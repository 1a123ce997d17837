//! Named-style resolution
//!
//! The resolver owns the style configuration (an explicit registry, never a
//! process-wide table) and a per-document cache of resolved handles.
//! Resolution is idempotent: the first use of a style name flattens its
//! inheritance chain, registers the concrete style (and its banding
//! alternate, when one is declared) on the workbook, and every later use
//! returns the cached handle.

use ahash::AHashMap;
use once_cell::sync::Lazy;

use crate::error::OpError;
use quill_sheets_core::{MergeSpec, Point, Range, StyleDescriptor, ValueFormat};
use quill_sheets_engine::{NamedStyle, Workbook};

/// Style name applied when an operation carries no style at all
pub const DEFAULT_STYLE_NAME: &str = "Default";

/// Suffix of the odd-row banding variant of a style
const ALTERNATE_SUFFIX: &str = "_Alternate";

static DEFAULT_STYLE: Lazy<StyleDescriptor> =
    Lazy::new(|| StyleDescriptor::new(DEFAULT_STYLE_NAME));

/// Derive the banding variant name of a style
pub fn alternate_name(name: &str) -> String {
    format!("{}{}", name, ALTERNATE_SUFFIX)
}

/// A resolved, workbook-registered style
///
/// Carries everything an operation needs at write time: the registered name
/// (and its alternate, when one exists), the merge descriptor, the value
/// format, and the content-visibility flag.
#[derive(Debug, Clone)]
pub struct StyleHandle {
    name: String,
    alternate: Option<String>,
    merge: Option<MergeSpec>,
    format: ValueFormat,
    show_content: bool,
}

impl StyleHandle {
    /// The registered style name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The banding variant name; falls back to the base name when no
    /// alternate was registered, so a cell is never left unstyled
    pub fn alternate_name(&self) -> &str {
        self.alternate.as_deref().unwrap_or(&self.name)
    }

    /// The style name for a given target row: odd rows take the alternate
    /// (when registered), even rows the base name
    pub fn name_for_row(&self, row: u32) -> &str {
        if row % 2 == 1 {
            self.alternate_name()
        } else {
            &self.name
        }
    }

    /// The merge descriptor, if the style declares one
    pub fn merge(&self) -> Option<MergeSpec> {
        self.merge
    }

    /// The value format written through this style
    pub fn format(&self) -> &ValueFormat {
        &self.format
    }

    /// Whether values are written (styling applies regardless)
    pub fn show_content(&self) -> bool {
        self.show_content
    }

    /// Expand an anchor into the range a value written with this style
    /// occupies (the anchor cell alone without a merge descriptor)
    pub fn merged_range(&self, anchor: &Point) -> Range {
        match self.merge {
            Some(merge) => merge.range_from(anchor),
            None => Range::single(*anchor),
        }
    }
}

/// Rollback point for the resolver cache
pub struct ResolverMark(AHashMap<String, StyleHandle>);

/// Resolves style descriptors into registered workbook styles
#[derive(Debug, Clone, Default)]
pub struct StyleResolver {
    registry: AHashMap<String, StyleDescriptor>,
    cache: AHashMap<String, StyleHandle>,
}

impl StyleResolver {
    /// Create a resolver with an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver seeded with a style configuration
    pub fn with_styles(styles: Vec<StyleDescriptor>) -> Self {
        let mut resolver = Self::new();
        for style in styles {
            resolver.register(style);
        }
        resolver
    }

    /// Add a descriptor to the registry (inheritance targets are looked up
    /// here). A repeated name replaces the earlier descriptor.
    pub fn register(&mut self, descriptor: StyleDescriptor) {
        if self
            .registry
            .insert(descriptor.name.clone(), descriptor)
            .is_some()
        {
            log::warn!("style registry replaced an existing descriptor");
        }
    }

    /// Resolve a descriptor against a workbook.
    ///
    /// Idempotent per name: a cached handle is returned without touching the
    /// workbook again. A cycle in the inheritance chain (including a style
    /// inheriting from itself) fails with a configuration error and
    /// registers nothing.
    pub fn resolve(
        &mut self,
        workbook: &mut Workbook,
        descriptor: &StyleDescriptor,
    ) -> Result<StyleHandle, OpError> {
        if descriptor.name.trim().is_empty() {
            return Err(OpError::Validation("style name must not be blank".into()));
        }
        if let Some(handle) = self.cache.get(&descriptor.name) {
            return Ok(handle.clone());
        }

        let flat = self.flatten(descriptor)?;
        let attributes = flat.attributes();

        if !workbook.has_named_style(&flat.name) {
            workbook.add_named_style(NamedStyle::new(flat.name.clone(), attributes.clone()))?;
        }

        let alternate = match flat.fill.and_then(|fill| fill.alternate_color) {
            Some(color) => {
                let alt_name = alternate_name(&flat.name);
                if !workbook.has_named_style(&alt_name) {
                    let mut alt_attributes = attributes;
                    alt_attributes.fill = Some(color);
                    workbook.add_named_style(NamedStyle::new(alt_name.clone(), alt_attributes))?;
                }
                Some(alt_name)
            }
            None => None,
        };

        let handle = StyleHandle {
            name: flat.name.clone(),
            alternate,
            merge: flat.merge,
            format: flat.format.clone().unwrap_or_default(),
            show_content: flat.show_content.unwrap_or(true),
        };
        self.cache.insert(flat.name, handle.clone());
        Ok(handle)
    }

    /// Resolve a registered descriptor by name
    pub fn resolve_named(
        &mut self,
        workbook: &mut Workbook,
        name: &str,
    ) -> Result<StyleHandle, OpError> {
        let descriptor = self
            .registry
            .get(name)
            .cloned()
            .ok_or_else(|| OpError::Configuration(format!("unknown style '{}'", name)))?;
        self.resolve(workbook, &descriptor)
    }

    /// Resolve the given descriptor, or the built-in default style when the
    /// operation carries none
    pub fn resolve_or_default(
        &mut self,
        workbook: &mut Workbook,
        descriptor: Option<&StyleDescriptor>,
    ) -> Result<StyleHandle, OpError> {
        match descriptor {
            Some(descriptor) => self.resolve(workbook, descriptor),
            None => self.resolve(workbook, &DEFAULT_STYLE),
        }
    }

    /// Capture the cache state for rollback after a failed operation
    pub fn mark(&self) -> ResolverMark {
        ResolverMark(self.cache.clone())
    }

    /// Restore the cache captured by [`StyleResolver::mark`]
    pub fn rollback(&mut self, mark: ResolverMark) {
        self.cache = mark.0;
    }

    /// Flatten a descriptor's inheritance chain, child fields winning.
    /// Cycles are detected by tracking the names already visited.
    fn flatten(&self, descriptor: &StyleDescriptor) -> Result<StyleDescriptor, OpError> {
        let mut visited = vec![descriptor.name.clone()];
        let mut flat = descriptor.clone();
        let mut next_parent = descriptor.inherits.clone();

        while let Some(parent_name) = next_parent {
            if visited.iter().any(|name| *name == parent_name) {
                return Err(OpError::Configuration(format!(
                    "style inheritance cycle involving '{}'",
                    parent_name
                )));
            }
            let parent = self.registry.get(&parent_name).ok_or_else(|| {
                OpError::Configuration(format!(
                    "style '{}' inherits unknown style '{}'",
                    descriptor.name, parent_name
                ))
            })?;
            flat = flat.layer_over(parent);
            visited.push(parent_name);
            next_parent = parent.inherits.clone();
        }

        Ok(flat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quill_sheets_core::{Color, MergeOrientation};

    fn banded(name: &str) -> StyleDescriptor {
        StyleDescriptor::new(name).with_banded_fill(Color::WHITE, Color::GRAY)
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let mut workbook = Workbook::new();
        let mut resolver = StyleResolver::new();
        let descriptor = StyleDescriptor::new("Header").with_fill(Color::BLUE);

        let first = resolver.resolve(&mut workbook, &descriptor).unwrap();
        let second = resolver.resolve(&mut workbook, &descriptor).unwrap();

        assert_eq!(first.name(), second.name());
        assert_eq!(workbook.named_styles().len(), 1);
    }

    #[test]
    fn test_alternate_is_registered_for_banded_fill() {
        let mut workbook = Workbook::new();
        let mut resolver = StyleResolver::new();

        let handle = resolver.resolve(&mut workbook, &banded("Rows")).unwrap();
        assert_eq!(handle.alternate_name(), "Rows_Alternate");
        assert!(workbook.has_named_style("Rows"));
        assert!(workbook.has_named_style("Rows_Alternate"));

        let alt = workbook.named_style("Rows_Alternate").unwrap();
        assert_eq!(alt.attributes.fill, Some(Color::GRAY));
    }

    #[test]
    fn test_name_for_row_parity() {
        let mut workbook = Workbook::new();
        let mut resolver = StyleResolver::new();

        let handle = resolver.resolve(&mut workbook, &banded("Rows")).unwrap();
        assert_eq!(handle.name_for_row(1), "Rows_Alternate");
        assert_eq!(handle.name_for_row(2), "Rows");
        assert_eq!(handle.name_for_row(3), "Rows_Alternate");

        // Without an alternate, every row gets the base name
        let plain = resolver
            .resolve(&mut workbook, &StyleDescriptor::new("Plain"))
            .unwrap();
        assert_eq!(plain.name_for_row(1), "Plain");
        assert_eq!(plain.name_for_row(2), "Plain");
    }

    #[test]
    fn test_inheritance_merges_parent_fields() {
        let mut workbook = Workbook::new();
        let mut resolver = StyleResolver::with_styles(vec![StyleDescriptor::new("Base")
            .with_fill(Color::RED)
            .with_format(ValueFormat::number(2))]);

        let child = StyleDescriptor::new("Child")
            .inherits("Base")
            .with_merge(MergeSpec {
                cells: 2,
                orientation: MergeOrientation::Horizontal,
            });
        let handle = resolver.resolve(&mut workbook, &child).unwrap();

        assert_eq!(handle.format(), &ValueFormat::number(2));
        assert_eq!(handle.merge().unwrap().cells, 2);
        assert_eq!(
            workbook.named_style("Child").unwrap().attributes.fill,
            Some(Color::RED)
        );
    }

    #[test]
    fn test_self_inheritance_is_a_cycle() {
        let mut workbook = Workbook::new();
        let mut resolver =
            StyleResolver::with_styles(vec![StyleDescriptor::new("Loop").inherits("Loop")]);

        let result = resolver.resolve_named(&mut workbook, "Loop");
        assert!(matches!(result, Err(OpError::Configuration(_))));
        assert!(workbook.named_styles().is_empty());
    }

    #[test]
    fn test_transitive_cycle_registers_nothing() {
        let mut workbook = Workbook::new();
        let mut resolver = StyleResolver::with_styles(vec![
            StyleDescriptor::new("A").inherits("B"),
            StyleDescriptor::new("B").inherits("A"),
        ]);

        let result = resolver.resolve_named(&mut workbook, "A");
        assert!(matches!(result, Err(OpError::Configuration(_))));
        assert!(workbook.named_styles().is_empty());
    }

    #[test]
    fn test_default_style_fallback() {
        let mut workbook = Workbook::new();
        let mut resolver = StyleResolver::new();

        let handle = resolver.resolve_or_default(&mut workbook, None).unwrap();
        assert_eq!(handle.name(), DEFAULT_STYLE_NAME);
        assert!(workbook.has_named_style(DEFAULT_STYLE_NAME));
    }

    #[test]
    fn test_rollback_forgets_cached_handles() {
        let mut workbook = Workbook::new();
        let mut resolver = StyleResolver::new();

        let mark = resolver.mark();
        resolver
            .resolve(&mut workbook, &StyleDescriptor::new("Header"))
            .unwrap();
        resolver.rollback(mark);

        // Resolving again registers against a fresh workbook without a
        // stale cache hit
        let mut fresh = Workbook::new();
        let handle = resolver
            .resolve(&mut fresh, &StyleDescriptor::new("Header"))
            .unwrap();
        assert_eq!(handle.name(), "Header");
        assert!(fresh.has_named_style("Header"));
    }
}
