//! Click-driven zoom, selection and detail-panel state.
//!
//! Every node's resting presentation lives in a side table indexed by `NodeId`. A zoom does not
//! mutate that table in place; it records a [`Transition`] holding the sampled start views, the
//! target views and the start time, and the displayed view at any instant is a pure function of
//! `now`. Starting a new zoom while one is in flight samples the in-flight view and uses it as
//! the next start, so interruptions never jump.

use crate::config::ChartOptions;
use crate::model::{NodeView, PartitionLayout};
use crate::visibility::node_view;
use serde::{Deserialize, Serialize};
use sunburst_core::{Hierarchy, NodeId};

/// d3's default transition easing (`easeCubicInOut`).
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

fn progress(now_ms: f64, start_ms: f64, duration_ms: f64) -> f64 {
    if !(duration_ms > 0.0) {
        return 1.0;
    }
    ((now_ms - start_ms) / duration_ms).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub focus: NodeId,
    pub start_ms: f64,
    pub duration_ms: f64,
    /// Views sampled when the transition started, indexed by `NodeId`.
    pub from: Vec<NodeView>,
    /// Resting views once the transition completes, indexed by `NodeId`.
    pub to: Vec<NodeView>,
    /// Nodes that animate; everything else already sits at its (invisible) target.
    pub participants: Vec<NodeId>,
}

impl Transition {
    pub fn progress(&self, now_ms: f64) -> f64 {
        progress(now_ms, self.start_ms, self.duration_ms)
    }

    pub fn is_finished(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }

    pub fn sample(&self, now_ms: f64) -> Vec<NodeView> {
        let p = self.progress(now_ms);
        if p >= 1.0 {
            return self.to.clone();
        }
        let t = ease_cubic_in_out(p);
        self.from
            .iter()
            .zip(&self.to)
            .map(|(from, to)| from.lerp(to, t))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ZoomState {
    Idle { focus: NodeId },
    Transitioning { focus: NodeId, progress: f64 },
}

/// The popped-out leaf.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub node: NodeId,
    pub since_ms: f64,
}

/// The leaf whose details are shown in the center disc.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpenDetail {
    pub node: NodeId,
    pub opened_at_ms: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewChange {
    pub id: NodeId,
    pub from: NodeView,
    pub to: NodeView,
}

/// What a zoom does to the participating nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryDiff {
    pub focus: NodeId,
    pub center_target: NodeId,
    pub start_ms: f64,
    pub duration_ms: f64,
    /// Whether a transition in flight was superseded.
    pub interrupted: bool,
    pub changes: Vec<ViewChange>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SelectionChange {
    Unchanged,
    Selected {
        node: NodeId,
        previous: Option<NodeId>,
    },
    Deselected {
        node: NodeId,
    },
    Cleared {
        previous: NodeId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DetailChange {
    Unchanged,
    Opened { node: NodeId },
    Closed { node: NodeId },
}

/// Result of one click.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub target: NodeId,
    pub at_ms: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<GeometryDiff>,
    pub selection: SelectionChange,
    pub detail: DetailChange,
}

#[derive(Debug, Clone)]
pub struct ZoomController {
    home: PartitionLayout,
    parents: Vec<Option<NodeId>>,
    options: ChartOptions,
    focus: NodeId,
    center_target: NodeId,
    views: Vec<NodeView>,
    transition: Option<Transition>,
    selected: Option<Selection>,
    detail: Option<OpenDetail>,
}

impl ZoomController {
    pub fn new(hierarchy: &Hierarchy, home: &PartitionLayout, options: &ChartOptions) -> Self {
        let views = home
            .nodes
            .iter()
            .map(|n| node_view(n.wedge, n.has_children, options))
            .collect();
        Self {
            home: home.clone(),
            parents: hierarchy.nodes().iter().map(|n| n.parent).collect(),
            options: options.clone(),
            focus: NodeId::ROOT,
            center_target: NodeId::ROOT,
            views,
            transition: None,
            selected: None,
            detail: None,
        }
    }

    pub fn home(&self) -> &PartitionLayout {
        &self.home
    }

    pub fn focus(&self) -> NodeId {
        self.focus
    }

    pub fn center_target(&self) -> NodeId {
        self.center_target
    }

    pub fn selected(&self) -> Option<Selection> {
        self.selected
    }

    pub fn detail(&self) -> Option<OpenDetail> {
        self.detail
    }

    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    pub fn state(&self, now_ms: f64) -> ZoomState {
        match &self.transition {
            Some(t) if !t.is_finished(now_ms) => ZoomState::Transitioning {
                focus: self.focus,
                progress: t.progress(now_ms),
            },
            _ => ZoomState::Idle { focus: self.focus },
        }
    }

    /// Every node's view at `now_ms`, indexed by `NodeId`.
    pub fn view(&self, now_ms: f64) -> Vec<NodeView> {
        match &self.transition {
            Some(t) => {
                tracing::trace!(now_ms, progress = t.progress(now_ms), "sampling zoom");
                t.sample(now_ms)
            }
            None => self.views.clone(),
        }
    }

    /// Collapses a finished transition into the resting views. Returns whether one was settled.
    pub fn settle(&mut self, now_ms: f64) -> bool {
        match self.transition.take() {
            Some(t) if t.is_finished(now_ms) => {
                self.views = t.to;
                true
            }
            other => {
                self.transition = other;
                false
            }
        }
    }

    /// Outer-radius growth of the selected arc, in `[0, 1]`.
    pub fn pop_out(&self, id: NodeId, now_ms: f64) -> f64 {
        match self.selected {
            Some(s) if s.node == id => ease_cubic_in_out(progress(
                now_ms,
                s.since_ms,
                self.options.pop_out_duration_ms,
            )),
            _ => 0.0,
        }
    }

    pub fn detail_opacity(&self, now_ms: f64) -> f64 {
        match self.detail {
            Some(d) => ease_cubic_in_out(progress(
                now_ms,
                d.opened_at_ms,
                self.options.detail.fade_ms,
            )),
            None => 0.0,
        }
    }

    /// Handles a click on node `id`: leaves toggle selection, branches zoom.
    pub fn select(&mut self, id: NodeId, now_ms: f64) -> Interaction {
        if self.home.node(id).has_children {
            let selection = self.clear_selection();
            let detail = self.close_detail();
            let zoom = self.zoom_to(id, now_ms);
            return Interaction {
                target: id,
                at_ms: now_ms,
                zoom: Some(zoom),
                selection,
                detail,
            };
        }

        if self.selected.is_some_and(|s| s.node == id) {
            self.selected = None;
            let detail = self.close_detail();
            tracing::debug!(node = %id, "deselected leaf");
            return Interaction {
                target: id,
                at_ms: now_ms,
                zoom: None,
                selection: SelectionChange::Deselected { node: id },
                detail,
            };
        }

        let previous = self.selected.map(|s| s.node);
        self.selected = Some(Selection {
            node: id,
            since_ms: now_ms,
        });
        self.detail = Some(OpenDetail {
            node: id,
            opened_at_ms: now_ms,
        });
        tracing::debug!(node = %id, previous = ?previous, "selected leaf");
        Interaction {
            target: id,
            at_ms: now_ms,
            zoom: None,
            selection: SelectionChange::Selected { node: id, previous },
            detail: DetailChange::Opened { node: id },
        }
    }

    /// Handles a click on the center disc: clears the selection and zooms out one level.
    pub fn center_click(&mut self, now_ms: f64) -> Interaction {
        let target = self.center_target;
        let selection = self.clear_selection();
        let detail = self.close_detail();
        let zoom = self.zoom_to(target, now_ms);
        Interaction {
            target,
            at_ms: now_ms,
            zoom: Some(zoom),
            selection,
            detail,
        }
    }

    fn clear_selection(&mut self) -> SelectionChange {
        match self.selected.take() {
            Some(s) => SelectionChange::Cleared { previous: s.node },
            None => SelectionChange::Unchanged,
        }
    }

    fn close_detail(&mut self) -> DetailChange {
        match self.detail.take() {
            Some(d) => DetailChange::Closed { node: d.node },
            None => DetailChange::Unchanged,
        }
    }

    /// Resting views with `focus` filling the circle.
    pub fn target_views(&self, focus: NodeId) -> Vec<NodeView> {
        let p = self.home.node(focus);
        self.home
            .nodes
            .iter()
            .map(|n| {
                let w = n.wedge.relative_to(&p.wedge, p.depth);
                node_view(w, n.has_children, &self.options)
            })
            .collect()
    }

    fn zoom_to(&mut self, focus: NodeId, now_ms: f64) -> GeometryDiff {
        let interrupted = self
            .transition
            .as_ref()
            .is_some_and(|t| !t.is_finished(now_ms));
        let current = self.view(now_ms);
        let to = self.target_views(focus);

        let mut from = Vec::with_capacity(to.len());
        let mut participants = Vec::new();
        let mut changes = Vec::new();
        for (i, (cur, target)) in current.iter().zip(&to).enumerate() {
            let id = NodeId(i);
            let animates = cur.arc_opacity != 0.0
                || target.interactive
                || cur.label_opacity != 0.0
                || target.label_opacity != 0.0;
            if animates {
                participants.push(id);
                changes.push(ViewChange {
                    id,
                    from: *cur,
                    to: *target,
                });
                from.push(*cur);
            } else {
                from.push(*target);
            }
        }

        self.focus = focus;
        self.center_target = self.parents[focus.index()].unwrap_or(NodeId::ROOT);

        tracing::debug!(
            focus = %focus,
            participants = participants.len(),
            interrupted,
            "starting zoom"
        );

        let duration_ms = self.options.zoom_duration_ms;
        self.transition = Some(Transition {
            focus,
            start_ms: now_ms,
            duration_ms,
            from,
            to,
            participants,
        });

        GeometryDiff {
            focus,
            center_target: self.center_target,
            start_ms: now_ms,
            duration_ms,
            interrupted,
            changes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_hits_its_endpoints() {
        assert_eq!(ease_cubic_in_out(0.0), 0.0);
        assert_eq!(ease_cubic_in_out(1.0), 1.0);
        assert_eq!(ease_cubic_in_out(0.5), 0.5);
        assert!(ease_cubic_in_out(0.25) < 0.25);
    }

    #[test]
    fn zero_duration_is_immediately_complete() {
        assert_eq!(progress(10.0, 10.0, 0.0), 1.0);
        assert_eq!(progress(5.0, 10.0, 100.0), 0.0);
    }
}
