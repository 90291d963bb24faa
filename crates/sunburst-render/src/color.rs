//! Per-node fill colors.
//!
//! Top-level categories take their color straight from the theme. Deeper nodes inherit their
//! category's color and are lightened according to where their value falls among their
//! siblings: the largest sibling stays close to the category color, the smallest is pushed
//! toward `category.brighter(theme.brighten)`.

use rustc_hash::FxHashMap;
use sunburst_core::{Hierarchy, NodeId, Rgb, Theme};

/// Linear map of `value` from `[min, max]` onto `[low_t, high_t]`, with `flat_t` when the
/// domain is degenerate.
pub fn sibling_gradient_t(value: f64, min: f64, max: f64, theme: &Theme) -> f64 {
    let span = max - min;
    if !(span.is_finite() && span > 0.0) {
        return theme.gradient_flat;
    }
    let u = ((value - min) / span).clamp(0.0, 1.0);
    theme.gradient_low + (theme.gradient_high - theme.gradient_low) * u
}

#[derive(Debug, Clone)]
pub struct ColorResolver<'a> {
    hierarchy: &'a Hierarchy,
    theme: &'a Theme,
    /// `(min, max)` of child values, keyed by parent.
    sibling_ranges: FxHashMap<NodeId, (f64, f64)>,
}

impl<'a> ColorResolver<'a> {
    pub fn new(hierarchy: &'a Hierarchy, theme: &'a Theme) -> Self {
        Self {
            hierarchy,
            theme,
            sibling_ranges: FxHashMap::default(),
        }
    }

    fn sibling_range(&mut self, parent: NodeId) -> (f64, f64) {
        let hierarchy = self.hierarchy;
        *self.sibling_ranges.entry(parent).or_insert_with(|| {
            hierarchy
                .node(parent)
                .children
                .iter()
                .map(|&c| hierarchy.node(c).value)
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                    (lo.min(v), hi.max(v))
                })
        })
    }

    pub fn category_color(&self, name: &str) -> Rgb {
        self.theme.category_color(name).unwrap_or(self.theme.fallback)
    }

    pub fn color(&mut self, id: NodeId) -> Rgb {
        let node = self.hierarchy.node(id);
        match node.depth {
            0 => self.theme.fallback,
            1 => self.category_color(&node.name),
            _ => {
                let Some(category) = self.hierarchy.category_of(id) else {
                    return self.theme.fallback;
                };
                let base = self.category_color(&self.hierarchy.node(category).name);
                let Some(parent) = node.parent else {
                    return base;
                };
                let (min, max) = self.sibling_range(parent);
                let t = sibling_gradient_t(node.value, min, max, self.theme);
                base.interpolate(base.brighter(self.theme.brighten), t)
            }
        }
    }

    /// Hex fills for every node, indexed by `NodeId`.
    pub fn resolve_all(mut self) -> Vec<String> {
        let fills = self
            .hierarchy
            .ids()
            .map(|id| self.color(id).to_hex())
            .collect::<Vec<_>>();
        tracing::debug!(
            nodes = fills.len(),
            theme = %self.theme.name,
            "resolved node colors"
        );
        fills
    }
}
