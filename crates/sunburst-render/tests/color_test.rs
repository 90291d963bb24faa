use sunburst_core::{Hierarchy, Rgb, Theme, TreeNode};
use sunburst_render::color::{ColorResolver, sibling_gradient_t};

fn tree() -> TreeNode {
    TreeNode::branch(
        "Sunscreen",
        vec![
            TreeNode::branch(
                "Skin Type",
                vec![
                    TreeNode::branch("Dry", vec![TreeNode::leaf("a", 5.0)]),
                    TreeNode::branch("Oily", vec![TreeNode::leaf("b", 5.0)]),
                ],
            ),
            TreeNode::branch(
                "SPF Range",
                vec![
                    TreeNode::leaf("low", 1.0),
                    TreeNode::leaf("mid", 2.0),
                    TreeNode::leaf("high", 9.0),
                ],
            ),
            TreeNode::branch("Mystery", vec![TreeNode::leaf("m", 1.0)]),
        ],
    )
}

#[test]
fn top_level_categories_use_the_palette() {
    let h = Hierarchy::from_tree(&tree()).unwrap();
    let theme = Theme::default();
    let fills = ColorResolver::new(&h, &theme).resolve_all();

    let skin = h.find_path(&["Skin Type"]).unwrap();
    assert_eq!(fills[skin.index()], "#946dde");
    let mystery = h.find_path(&["Mystery"]).unwrap();
    assert_eq!(fills[mystery.index()], "#cccccc");
}

#[test]
fn equal_siblings_sit_halfway_without_nan() {
    let h = Hierarchy::from_tree(&tree()).unwrap();
    let theme = Theme::default();
    let mut resolver = ColorResolver::new(&h, &theme);

    let dry = h.find_path(&["Skin Type", "Dry"]).unwrap();
    let oily = h.find_path(&["Skin Type", "Oily"]).unwrap();
    let a = resolver.color(dry);
    let b = resolver.color(oily);
    assert!(a.is_finite() && b.is_finite());
    assert_eq!(a.to_hex(), b.to_hex());

    let base = Rgb::parse("#946dde").unwrap();
    let expected = base.interpolate(base.brighter(1.5), 0.5);
    assert_eq!(a.to_hex(), expected.to_hex());
    assert_eq!(sibling_gradient_t(5.0, 5.0, 5.0, &theme), 0.5);
}

#[test]
fn largest_sibling_stays_closest_to_the_category_color() {
    let h = Hierarchy::from_tree(&tree()).unwrap();
    let theme = Theme::default();
    let mut resolver = ColorResolver::new(&h, &theme);

    let base = Rgb::parse("#f08554").unwrap();
    let light = base.brighter(1.5);
    let high = h.find_path(&["SPF Range", "high"]).unwrap();
    let low = h.find_path(&["SPF Range", "low"]).unwrap();

    assert_eq!(resolver.color(high).to_hex(), base.interpolate(light, 0.2).to_hex());
    assert_eq!(resolver.color(low).to_hex(), base.interpolate(light, 0.8).to_hex());
    assert!((sibling_gradient_t(2.0, 1.0, 9.0, &theme) - 0.725).abs() < 1e-12);
}

#[test]
fn warm_theme_swaps_the_palette() {
    let h = Hierarchy::from_tree(&tree()).unwrap();
    let theme = Theme::warm();
    let mut resolver = ColorResolver::new(&h, &theme);
    let skin = h.find_path(&["Skin Type"]).unwrap();
    assert_eq!(resolver.color(skin).to_hex(), "#e35c36");
}
