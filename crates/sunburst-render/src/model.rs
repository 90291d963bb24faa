use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use sunburst_core::NodeId;

/// Angular span `[x0, x1)` (radians, clockwise from 12 o'clock) and radial band `[y0, y1)`
/// (in ring units; multiply by the chart radius for pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Wedge {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
}

impl Wedge {
    pub const fn new(x0: f64, x1: f64, y0: f64, y1: f64) -> Self {
        Self { x0, x1, y0, y1 }
    }

    pub fn angular_width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn radial_width(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn mid_angle(&self) -> f64 {
        (self.x0 + self.x1) / 2.0
    }

    pub fn mid_radius(&self) -> f64 {
        (self.y0 + self.y1) / 2.0
    }

    pub fn lerp(&self, to: &Wedge, t: f64) -> Wedge {
        let l = |a: f64, b: f64| a + (b - a) * t;
        Wedge {
            x0: l(self.x0, to.x0),
            x1: l(self.x1, to.x1),
            y0: l(self.y0, to.y0),
            y1: l(self.y1, to.y1),
        }
    }

    pub fn approx_eq(&self, other: &Wedge, eps: f64) -> bool {
        (self.x0 - other.x0).abs() <= eps
            && (self.x1 - other.x1).abs() <= eps
            && (self.y0 - other.y0).abs() <= eps
            && (self.y1 - other.y1).abs() <= eps
    }

    /// Re-expresses this wedge in the frame where `focus` fills the whole circle and sits at
    /// ring 0.
    ///
    /// A zero-width focus maps everything right of its start to `2π` and the rest to `0`, so the
    /// result is always finite.
    pub fn relative_to(&self, focus: &Wedge, focus_depth: usize) -> Wedge {
        let span = focus.angular_width();
        let rel = |x: f64| {
            let t = if span > 0.0 {
                (x - focus.x0) / span
            } else if x > focus.x0 {
                1.0
            } else {
                0.0
            };
            t.clamp(0.0, 1.0) * TAU
        };
        let d = focus_depth as f64;
        Wedge {
            x0: rel(self.x0),
            x1: rel(self.x1),
            y0: (self.y0 - d).max(0.0),
            y1: (self.y1 - d).max(0.0),
        }
    }
}

/// One hierarchy node in the canonical (root-focused) partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutNode {
    pub id: NodeId,
    pub depth: usize,
    pub value: f64,
    pub has_children: bool,
    pub wedge: Wedge,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionLayout {
    /// Indexed by `NodeId`.
    pub nodes: Vec<LayoutNode>,
    /// Children of each node in layout order (descending value, stable).
    pub sorted_children: Vec<Vec<NodeId>>,
    pub height: usize,
}

impl PartitionLayout {
    pub fn node(&self, id: NodeId) -> &LayoutNode {
        &self.nodes[id.index()]
    }

    pub fn wedge(&self, id: NodeId) -> Wedge {
        self.nodes[id.index()].wedge
    }

    pub fn sorted_children(&self, id: NodeId) -> &[NodeId] {
        &self.sorted_children[id.index()]
    }

    /// `[0, height + 1)`.
    pub fn depth_range(&self) -> f64 {
        (self.height + 1) as f64
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// What the surface shows for one node at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeView {
    pub wedge: Wedge,
    pub arc_opacity: f64,
    pub label_opacity: f64,
    /// Whether the arc receives clicks.
    pub interactive: bool,
}

impl NodeView {
    pub fn lerp(&self, to: &NodeView, t: f64) -> NodeView {
        NodeView {
            wedge: self.wedge.lerp(&to.wedge, t),
            arc_opacity: self.arc_opacity + (to.arc_opacity - self.arc_opacity) * t,
            label_opacity: self.label_opacity + (to.label_opacity - self.label_opacity) * t,
            // pointer-events switch to the target value as soon as a transition starts
            interactive: to.interactive,
        }
    }
}

/// `rotate(rotate_deg) translate(translate_x, 0) rotate(flip ? 180 : 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelTransform {
    pub rotate_deg: f64,
    pub translate_x: f64,
    pub flipped: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneArc {
    pub id: NodeId,
    pub path: String,
    pub fill: String,
    pub fill_opacity: f64,
    pub interactive: bool,
    pub selected: bool,
    /// Tooltip: `a/b/c` ancestor path and the formatted value.
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneLabel {
    pub id: NodeId,
    pub text: String,
    pub transform: LabelTransform,
    pub opacity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetailLineKind {
    Title,
    Body,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailLine {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub kind: DetailLineKind,
    pub font_size: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailPanel {
    pub node: NodeId,
    pub lines: Vec<DetailLine>,
    pub line_height: f64,
    pub used_height: f64,
    pub available_height: f64,
    /// The reduced line height was tried and the text still did not fit.
    pub overflow: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDetail {
    pub panel: DetailPanel,
    pub opacity: f64,
}

/// A fully resolved frame, ready for a drawing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub radius: f64,
    pub time_ms: f64,
    pub focus: NodeId,
    /// Node the center hit-target zooms to.
    pub center_target: NodeId,
    pub arcs: Vec<SceneArc>,
    pub labels: Vec<SceneLabel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<SceneDetail>,
}
