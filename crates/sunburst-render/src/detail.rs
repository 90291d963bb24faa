//! Product detail panel drawn inside the center disc when a leaf is selected.
//!
//! The panel is a product-name block followed by a `Features: …` block, both greedily wrapped
//! to `width_ratio · radius`. When the text runs taller than the disc, the layout is discarded
//! and redone once with the reduced line height; that second result is final.

use crate::config::ChartOptions;
use crate::model::{DetailLine, DetailLineKind, DetailPanel};
use crate::text::{TextMeasurer, TextStyle, wrap_words_greedy};
use sunburst_core::HierNode;

pub struct DetailPanelLayout<'a> {
    measurer: &'a dyn TextMeasurer,
    options: &'a ChartOptions,
    line_height: f64,
    link: Option<&'a str>,
    lines: Vec<DetailLine>,
}

impl<'a> DetailPanelLayout<'a> {
    pub fn new(
        measurer: &'a dyn TextMeasurer,
        options: &'a ChartOptions,
        line_height: f64,
        link: Option<&'a str>,
    ) -> Self {
        Self {
            measurer,
            options,
            line_height,
            link,
            lines: Vec::new(),
        }
    }

    pub fn max_width(&self) -> f64 {
        self.options.detail.width_ratio * self.options.radius
    }

    fn style(&self, kind: DetailLineKind) -> TextStyle {
        let d = &self.options.detail;
        let (font_size, font_style) = match kind {
            DetailLineKind::Title => (d.title_font_size, Some("italic".to_string())),
            DetailLineKind::Body => (d.body_font_size, None),
        };
        TextStyle {
            font_family: Some(self.options.font_family.clone()),
            font_size,
            font_weight: None,
            font_style,
        }
    }

    /// Wraps `text` starting at baseline `start_y` and returns the height it used
    /// (`lines × line_height`).
    pub fn wrap(&mut self, text: &str, start_y: f64, kind: DetailLineKind) -> f64 {
        let style = self.style(kind);
        let wrapped = wrap_words_greedy(text, self.measurer, &style, self.max_width());
        let href = match kind {
            DetailLineKind::Title => self.link.map(str::to_string),
            DetailLineKind::Body => None,
        };
        for (i, line) in wrapped.iter().enumerate() {
            self.lines.push(DetailLine {
                text: line.clone(),
                x: 0.0,
                y: start_y + i as f64 * self.line_height,
                kind,
                font_size: style.font_size,
                href: href.clone(),
            });
        }
        wrapped.len() as f64 * self.line_height
    }

    pub fn into_lines(self) -> Vec<DetailLine> {
        self.lines
    }
}

/// `Features: a, b, c`.
pub fn features_text(features: &[String]) -> String {
    format!("Features: {}", features.join(", "))
}

fn wrap_panel<'a>(
    node: &'a HierNode,
    measurer: &'a dyn TextMeasurer,
    options: &'a ChartOptions,
    line_height: f64,
) -> (Vec<DetailLine>, f64) {
    let start_y = options.detail.start_y_ratio * options.radius;
    let mut layout = DetailPanelLayout::new(measurer, options, line_height, node.link.as_deref());
    let mut used = layout.wrap(&node.name, start_y, DetailLineKind::Title) + options.detail.title_gap;
    used += layout.wrap(
        &features_text(&node.features),
        start_y + used,
        DetailLineKind::Body,
    );
    (layout.into_lines(), used)
}

pub fn layout_detail_panel(
    node: &HierNode,
    measurer: &dyn TextMeasurer,
    options: &ChartOptions,
) -> DetailPanel {
    let available = options.detail.available_ratio * options.radius;
    let mut line_height = options.detail.line_height;
    let (mut lines, mut used) = wrap_panel(node, measurer, options, line_height);
    let mut overflow = false;

    if used > available {
        line_height = options.detail.reduced_line_height;
        (lines, used) = wrap_panel(node, measurer, options, line_height);
        overflow = used > available;
        if overflow {
            tracing::debug!(
                node = %node.id,
                used,
                available,
                "detail panel overflows after reducing line height"
            );
        }
    }

    DetailPanel {
        node: node.id,
        lines,
        line_height,
        used_height: used,
        available_height: available,
        overflow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::DeterministicTextMeasurer;
    use sunburst_core::{Hierarchy, TreeNode};

    fn one_char_per_px() -> DeterministicTextMeasurer {
        DeterministicTextMeasurer {
            char_width_factor: 1.0 / 12.0,
            line_height_factor: 1.0,
        }
    }

    fn product(name: &str, features: &[&str]) -> Hierarchy {
        let leaf = TreeNode::leaf(name, 1.0)
            .with_features(features.iter().map(|f| f.to_string()).collect())
            .with_link("https://example.com/p");
        let tree = TreeNode::branch("Sunscreen", vec![TreeNode::branch("SPF Range", vec![leaf])]);
        Hierarchy::from_tree(&tree).expect("valid tree")
    }

    #[test]
    fn title_then_gap_then_features() {
        let h = product("Daily Fluid", &["SPF 50", "Gel"]);
        let leaf = h.leaves().next().expect("leaf").id;
        let options = ChartOptions::sized(932.0, 932.0, 155.0);
        let measurer = one_char_per_px();

        let panel = layout_detail_panel(h.node(leaf), &measurer, &options);
        assert!(!panel.overflow);
        assert_eq!(panel.line_height, 16.0);
        assert_eq!(panel.lines.len(), 2);

        let start_y = -0.5 * 155.0;
        assert_eq!(panel.lines[0].text, "Daily Fluid");
        assert_eq!(panel.lines[0].y, start_y);
        assert_eq!(panel.lines[0].kind, DetailLineKind::Title);
        assert_eq!(panel.lines[0].href.as_deref(), Some("https://example.com/p"));
        assert_eq!(panel.lines[1].text, "Features: SPF 50, Gel");
        assert_eq!(panel.lines[1].y, start_y + 16.0 + 5.0);
        assert_eq!(panel.lines[1].href, None);
        assert_eq!(panel.used_height, 16.0 + 5.0 + 16.0);
    }

    #[test]
    fn retries_once_with_reduced_line_height() {
        // An 80 px column holds one six-letter word per line.
        let words = ["wwwwww"; 10];
        let h = product("Name", &words);
        let leaf = h.leaves().next().expect("leaf").id;
        let options = ChartOptions::sized(600.0, 600.0, 100.0);
        let measurer = DeterministicTextMeasurer {
            char_width_factor: 1.0,
            line_height_factor: 1.0,
        };

        let panel = layout_detail_panel(h.node(leaf), &measurer, &options);
        assert_eq!(panel.line_height, 12.0);
        // The retry still needs more than the disc, which is accepted and flagged.
        assert!(panel.used_height > panel.available_height);
        assert!(panel.overflow);
    }
}
