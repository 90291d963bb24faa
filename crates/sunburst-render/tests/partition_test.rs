use proptest::prelude::*;
use std::f64::consts::TAU;
use sunburst_core::{Hierarchy, NodeId, TreeNode};
use sunburst_render::partition;

fn skin_concern() -> TreeNode {
    TreeNode::branch(
        "Sunscreen",
        vec![TreeNode::branch(
            "Skin Concern",
            vec![TreeNode::branch(
                "Moisturizing",
                vec![TreeNode::leaf("A", 1.0), TreeNode::leaf("B", 3.0)],
            )],
        )],
    )
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn leaves_split_their_parent_by_value() {
    let h = Hierarchy::from_tree(&skin_concern()).unwrap();
    let layout = partition(&h);

    let a = h.find_path(&["Skin Concern", "Moisturizing", "A"]).unwrap();
    let b = h.find_path(&["Skin Concern", "Moisturizing", "B"]).unwrap();
    let m = h.find_path(&["Skin Concern", "Moisturizing"]).unwrap();

    assert_eq!(layout.node(m).value, 4.0);
    assert!(approx(layout.wedge(m).angular_width(), TAU));
    assert!(approx(layout.wedge(a).angular_width(), TAU * 0.25));
    assert!(approx(layout.wedge(b).angular_width(), TAU * 0.75));

    // Larger value first.
    assert_eq!(layout.sorted_children(m), &[b, a]);
    assert!(approx(layout.wedge(b).x0, 0.0));
    assert!(approx(layout.wedge(a).x0, TAU * 0.75));

    let wa = layout.wedge(a);
    assert_eq!((wa.y0, wa.y1), (3.0, 4.0));
    assert_eq!(layout.depth_range(), 4.0);
}

#[test]
fn root_spans_the_full_circle_in_ring_zero() {
    let h = Hierarchy::from_tree(&skin_concern()).unwrap();
    let root = partition(&h).wedge(NodeId::ROOT);
    assert_eq!(root.x0, 0.0);
    assert_eq!(root.x1, TAU);
    assert_eq!((root.y0, root.y1), (0.0, 1.0));
}

#[test]
fn equal_values_keep_input_order() {
    let tree = TreeNode::branch(
        "root",
        vec![
            TreeNode::leaf("first", 2.0),
            TreeNode::leaf("second", 2.0),
            TreeNode::leaf("big", 5.0),
        ],
    );
    let h = Hierarchy::from_tree(&tree).unwrap();
    let layout = partition(&h);
    let names = layout
        .sorted_children(NodeId::ROOT)
        .iter()
        .map(|&id| h.node(id).name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["big", "first", "second"]);
}

#[test]
fn zero_value_branch_collapses_without_nan() {
    let tree = TreeNode::branch(
        "root",
        vec![
            TreeNode::branch("empty", vec![TreeNode::leaf("z", 0.0)]),
            TreeNode::leaf("one", 1.0),
        ],
    );
    let h = Hierarchy::from_tree(&tree).unwrap();
    let layout = partition(&h);
    let empty = h.find_path(&["empty"]).unwrap();
    let z = h.find_path(&["empty", "z"]).unwrap();
    assert_eq!(layout.wedge(empty).angular_width(), 0.0);
    assert_eq!(layout.wedge(z).angular_width(), 0.0);
    assert_eq!(layout.wedge(z).x0, layout.wedge(empty).x0);
    for n in &layout.nodes {
        let w = n.wedge;
        assert!(w.x0.is_finite() && w.x1.is_finite());
    }
}

fn arb_tree() -> impl Strategy<Value = TreeNode> {
    let leaf = (0u32..20).prop_map(|v| TreeNode::leaf("leaf", v as f64));
    leaf.prop_recursive(4, 48, 5, |inner| {
        prop::collection::vec(inner, 1..5).prop_map(|children| TreeNode::branch("branch", children))
    })
}

proptest! {
    #[test]
    fn prop_children_tile_their_parent(tree in arb_tree()) {
        let h = Hierarchy::from_tree(&tree).unwrap();
        let layout = partition(&h);
        for n in &layout.nodes {
            let children = layout.sorted_children(n.id);
            let w = n.wedge;
            prop_assert_eq!(w.y0, n.depth as f64);
            prop_assert_eq!(w.y1, (n.depth + 1) as f64);
            if children.is_empty() || n.value == 0.0 {
                continue;
            }
            let widths: f64 = children.iter().map(|&c| layout.wedge(c).angular_width()).sum();
            prop_assert!((widths - w.angular_width()).abs() < 1e-9);
            prop_assert!((layout.wedge(children[0]).x0 - w.x0).abs() < 1e-9);
            for pair in children.windows(2) {
                prop_assert!((layout.wedge(pair[0]).x1 - layout.wedge(pair[1]).x0).abs() < 1e-9);
            }
        }
    }
}
