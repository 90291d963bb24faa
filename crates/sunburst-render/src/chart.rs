//! The chart entry point: owns the hierarchy, its home layout, resolved colors and labels, and
//! the zoom controller, and turns them into [`Scene`] frames.

use crate::arc::{ArcSpec, arc_path};
use crate::color::ColorResolver;
use crate::config::ChartOptions;
use crate::detail::layout_detail_panel;
use crate::model::{DetailPanel, PartitionLayout, Scene, SceneArc, SceneDetail, SceneLabel};
use crate::partition::partition;
use crate::svg::render_scene_svg;
use crate::text::TextMeasurer;
use crate::visibility::{label_text, label_transform};
use crate::zoom::{DetailChange, Interaction, ZoomController, ZoomState};
use crate::{Error, LayoutOptions, Result};
use std::sync::Arc;
use sunburst_core::{Hierarchy, NodeId, SunburstConfig, TreeNode};

/// `d3.format(",d")`: rounded to an integer with thousands separators.
pub fn format_value(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let rounded = v.round();
    let digits = format!("{}", rounded.abs() as u64);
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Tooltip text: `Root/Category/…/Name` followed by the formatted value on a second line.
pub fn arc_title(hierarchy: &Hierarchy, id: NodeId) -> String {
    format!(
        "{}\n{}",
        hierarchy.path_names(id).join("/"),
        format_value(hierarchy.node(id).value)
    )
}

pub struct Chart {
    hierarchy: Hierarchy,
    options: ChartOptions,
    home: PartitionLayout,
    fills: Vec<String>,
    labels: Vec<String>,
    titles: Vec<String>,
    controller: ZoomController,
    measurer: Arc<dyn TextMeasurer + Send + Sync>,
    detail_panel: Option<DetailPanel>,
}

impl std::fmt::Debug for Chart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chart")
            .field("nodes", &self.hierarchy.len())
            .field("height", &self.hierarchy.height())
            .field("focus", &self.controller.focus())
            .finish_non_exhaustive()
    }
}

impl Chart {
    pub fn new(
        tree: &TreeNode,
        config: &SunburstConfig,
        layout_options: &LayoutOptions,
    ) -> Result<Self> {
        let hierarchy = Hierarchy::from_tree(tree)?;
        let options = ChartOptions::from_config(config)?;
        Ok(Self::from_hierarchy(hierarchy, options, layout_options))
    }

    pub fn from_hierarchy(
        hierarchy: Hierarchy,
        options: ChartOptions,
        layout_options: &LayoutOptions,
    ) -> Self {
        let home = partition(&hierarchy);
        let fills = ColorResolver::new(&hierarchy, &options.theme).resolve_all();
        let labels = home
            .nodes
            .iter()
            .map(|n| label_text(&hierarchy.node(n.id).name, n.has_children, &n.wedge, &options))
            .collect();
        let titles = hierarchy.ids().map(|id| arc_title(&hierarchy, id)).collect();
        let controller = ZoomController::new(&hierarchy, &home, &options);

        Self {
            hierarchy,
            options,
            home,
            fills,
            labels,
            titles,
            controller,
            measurer: layout_options.text_measurer.clone(),
            detail_panel: None,
        }
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    /// The root-focused partition every zoom is computed from.
    pub fn home(&self) -> &PartitionLayout {
        &self.home
    }

    pub fn controller(&self) -> &ZoomController {
        &self.controller
    }

    pub fn fill(&self, id: NodeId) -> &str {
        &self.fills[id.index()]
    }

    pub fn label(&self, id: NodeId) -> &str {
        &self.labels[id.index()]
    }

    pub fn title(&self, id: NodeId) -> &str {
        &self.titles[id.index()]
    }

    pub fn detail_panel(&self) -> Option<&DetailPanel> {
        self.detail_panel.as_ref()
    }

    pub fn find(&self, names: &[&str]) -> Option<NodeId> {
        self.hierarchy.find_path(names)
    }

    pub fn state(&self, now_ms: f64) -> ZoomState {
        self.controller.state(now_ms)
    }

    pub fn select(&mut self, id: NodeId, now_ms: f64) -> Result<Interaction> {
        if !self.hierarchy.contains(id) {
            return Err(Error::UnknownNode { id });
        }
        let interaction = self.controller.select(id, now_ms);
        self.apply_detail(interaction.detail);
        Ok(interaction)
    }

    pub fn center_click(&mut self, now_ms: f64) -> Interaction {
        let interaction = self.controller.center_click(now_ms);
        self.apply_detail(interaction.detail);
        interaction
    }

    pub fn settle(&mut self, now_ms: f64) -> bool {
        self.controller.settle(now_ms)
    }

    fn apply_detail(&mut self, change: DetailChange) {
        match change {
            DetailChange::Opened { node } => {
                self.detail_panel = Some(layout_detail_panel(
                    self.hierarchy.node(node),
                    self.measurer.as_ref(),
                    &self.options,
                ));
            }
            DetailChange::Closed { .. } => self.detail_panel = None,
            DetailChange::Unchanged => {}
        }
    }

    /// The frame shown at `now_ms`. The root itself is never drawn; the center disc belongs to
    /// the zoom-out target.
    pub fn scene(&self, now_ms: f64) -> Scene {
        let views = self.controller.view(now_ms);
        let selected = self.controller.selected().map(|s| s.node);

        let mut arcs = Vec::with_capacity(views.len().saturating_sub(1));
        let mut labels = Vec::with_capacity(views.len().saturating_sub(1));
        for (i, view) in views.iter().enumerate().skip(1) {
            let id = NodeId(i);
            let spec = ArcSpec::for_wedge(
                &view.wedge,
                &self.options,
                self.controller.pop_out(id, now_ms),
            );
            arcs.push(SceneArc {
                id,
                path: arc_path(&spec),
                fill: self.fills[i].clone(),
                fill_opacity: view.arc_opacity,
                interactive: view.interactive,
                selected: selected == Some(id),
                title: self.titles[i].clone(),
            });
            labels.push(SceneLabel {
                id,
                text: self.labels[i].clone(),
                transform: label_transform(&view.wedge, self.options.radius),
                opacity: view.label_opacity,
            });
        }

        let detail = self.detail_panel.as_ref().map(|panel| SceneDetail {
            panel: panel.clone(),
            opacity: self.controller.detail_opacity(now_ms),
        });

        Scene {
            width: self.options.width,
            height: self.options.height,
            radius: self.options.radius,
            time_ms: now_ms,
            focus: self.controller.focus(),
            center_target: self.controller.center_target(),
            arcs,
            labels,
            detail,
        }
    }

    pub fn render_svg(&self, now_ms: f64) -> String {
        render_scene_svg(&self.scene(now_ms), &self.options)
    }
}
