//! Radial partition (`d3.partition().size([2π, height + 1])` over a value-sorted hierarchy).

use crate::model::{LayoutNode, PartitionLayout, Wedge};
use std::f64::consts::TAU;
use sunburst_core::{Hierarchy, NodeId};

fn sort_children_by_value(hierarchy: &Hierarchy, id: NodeId) -> Vec<NodeId> {
    let mut items = hierarchy
        .node(id)
        .children
        .iter()
        .copied()
        .enumerate()
        .map(|(pos, child)| (child, pos))
        .collect::<Vec<_>>();
    items.sort_by(|(a, a_pos), (b, b_pos)| {
        let av = hierarchy.node(*a).value;
        let bv = hierarchy.node(*b).value;
        bv.partial_cmp(&av)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a_pos.cmp(b_pos))
    });
    items.into_iter().map(|(child, _pos)| child).collect()
}

fn each_before(sorted_children: &[Vec<NodeId>], root: NodeId) -> Vec<NodeId> {
    let mut out = Vec::with_capacity(sorted_children.len());
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        out.push(id);
        for &c in sorted_children[id.index()].iter().rev() {
            stack.push(c);
        }
    }
    out
}

/// Lays `children` side by side across `[x0, x1)` in proportion to their values.
///
/// With `parent_value == 0` every child collapses onto `x0`.
fn dice(nodes: &mut [LayoutNode], children: &[NodeId], parent_value: f64, x0: f64, x1: f64) {
    let mut x = x0;
    let k = if parent_value != 0.0 {
        (x1 - x0) / parent_value
    } else {
        0.0
    };
    for &child in children {
        let n = &mut nodes[child.index()];
        n.wedge.x0 = x;
        x += n.value * k;
        n.wedge.x1 = x;
    }
}

/// Computes the home layout: one [`LayoutNode`] per hierarchy node, indexed by `NodeId`.
pub fn partition(hierarchy: &Hierarchy) -> PartitionLayout {
    let sorted_children = hierarchy
        .ids()
        .map(|id| sort_children_by_value(hierarchy, id))
        .collect::<Vec<_>>();

    let mut nodes = hierarchy
        .nodes()
        .iter()
        .map(|n| LayoutNode {
            id: n.id,
            depth: n.depth,
            value: n.value,
            has_children: !n.children.is_empty(),
            wedge: Wedge::new(0.0, 0.0, n.depth as f64, (n.depth + 1) as f64),
        })
        .collect::<Vec<_>>();

    let root = NodeId::ROOT;
    nodes[root.index()].wedge.x0 = 0.0;
    nodes[root.index()].wedge.x1 = TAU;

    for id in each_before(&sorted_children, root) {
        let children = &sorted_children[id.index()];
        if children.is_empty() {
            continue;
        }
        let Wedge { x0, x1, .. } = nodes[id.index()].wedge;
        let value = nodes[id.index()].value;
        dice(&mut nodes, children, value, x0, x1);
    }

    // Accumulated float drift can push the last child a hair past its parent.
    for id in hierarchy.ids() {
        if let Some(parent) = hierarchy.node(id).parent {
            let p = nodes[parent.index()].wedge;
            let w = &mut nodes[id.index()].wedge;
            w.x0 = w.x0.clamp(p.x0, p.x1);
            w.x1 = w.x1.clamp(w.x0, p.x1);
        }
    }

    tracing::debug!(
        nodes = nodes.len(),
        height = hierarchy.height(),
        "computed partition layout"
    );

    PartitionLayout {
        nodes,
        sorted_children,
        height: hierarchy.height(),
    }
}
