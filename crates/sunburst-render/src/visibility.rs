use crate::config::ChartOptions;
use crate::model::{LabelTransform, NodeView, Wedge};
use sunburst_core::Theme;

/// Arcs are drawn only between ring 1 and `max_depth`, and only with a nonzero angle.
pub fn arc_visible(w: &Wedge, max_depth: f64) -> bool {
    w.y1 <= max_depth && w.y0 >= 1.0 && w.x1 > w.x0
}

/// Labels additionally need enough area to be readable.
pub fn label_visible(w: &Wedge, max_depth: f64, epsilon: f64) -> bool {
    w.y1 <= max_depth && w.y0 >= 1.0 && w.radial_width() * w.angular_width() > epsilon
}

fn fill_opacity(visible: bool, has_children: bool, theme: &Theme) -> f64 {
    match (visible, has_children) {
        (false, _) => 0.0,
        (true, true) => theme.branch_opacity,
        (true, false) => theme.leaf_opacity,
    }
}

/// Steady-state presentation of a node drawn at `w`.
pub fn node_view(w: Wedge, has_children: bool, options: &ChartOptions) -> NodeView {
    let visible = arc_visible(&w, options.max_depth);
    NodeView {
        wedge: w,
        arc_opacity: fill_opacity(visible, has_children, &options.theme),
        label_opacity: if label_visible(&w, options.max_depth, options.label_epsilon) {
            1.0
        } else {
            0.0
        },
        interactive: visible,
    }
}

/// Places a label at the wedge's angular and radial midpoint, turned so it reads upright on
/// both halves of the circle.
pub fn label_transform(w: &Wedge, radius: f64) -> LabelTransform {
    let x = w.mid_angle().to_degrees();
    let y = w.mid_radius() * radius;
    LabelTransform {
        rotate_deg: x - 90.0,
        translate_x: y,
        flipped: x >= 180.0,
    }
}

/// Character budget of a leaf label: arc length at mid-radius over the average glyph width.
pub fn label_char_budget(w: &Wedge, radius: f64, avg_char_width: f64) -> usize {
    if !(avg_char_width > 0.0) {
        return 0;
    }
    let arc_length = w.angular_width() * w.mid_radius() * radius;
    let budget = (arc_length / avg_char_width).floor();
    if budget.is_finite() && budget > 0.0 {
        budget as usize
    } else {
        0
    }
}

/// Cuts `text` to `max(min_chars, budget)` characters, the last of which becomes `…`.
pub fn truncate_label(text: &str, budget: usize, min_chars: usize) -> String {
    let limit = budget.max(min_chars);
    let count = text.chars().count();
    if count <= limit {
        return text.to_string();
    }
    let mut out = text.chars().take(limit.saturating_sub(1)).collect::<String>();
    out.push('…');
    out
}

/// Label text as computed once from the home layout: branches keep their full name.
pub fn label_text(name: &str, has_children: bool, home: &Wedge, options: &ChartOptions) -> String {
    if has_children {
        return name.to_string();
    }
    let budget = label_char_budget(home, options.radius, options.avg_char_width);
    truncate_label(name, budget, options.min_label_chars)
}
