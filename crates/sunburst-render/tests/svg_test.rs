use sunburst_core::{SunburstConfig, TreeNode};
use sunburst_render::{Chart, LayoutOptions};

fn tree() -> TreeNode {
    TreeNode::branch(
        "Sunscreen",
        vec![
            TreeNode::branch(
                "Formulation Type",
                vec![TreeNode::branch(
                    "Stick",
                    vec![
                        TreeNode::leaf("Kids Stick <SPF 50>", 1.0)
                            .with_features(vec!["Stick".into(), "Water Resistant".into()])
                            .with_link("https://example.com/kids?a=1&b=2"),
                    ],
                )],
            ),
            TreeNode::branch("UVA Rating", vec![TreeNode::leaf("PA++++", 1_500.0)]),
        ],
    )
}

#[test]
fn renders_a_standalone_document() {
    let chart = Chart::new(&tree(), &SunburstConfig::default(), &LayoutOptions::default()).unwrap();
    let svg = chart.render_svg(0.0);

    assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg""#));
    assert!(svg.contains(r#"viewBox="-466 -466 932 932""#));
    assert!(svg.ends_with("</svg>"));
    // One path and one label per non-root node.
    assert_eq!(svg.matches("<path ").count(), 5);
    assert_eq!(svg.matches("<text data-id").count(), 5);
    assert!(svg.contains("<title>Sunscreen/UVA Rating/PA++++\n1,500</title>"));
    assert!(svg.contains("Kids Stick &lt;SPF 50&gt;"));
    assert!(svg.contains(r#"<circle class="center""#));
    assert!(!svg.contains("NaN"));
}

#[test]
fn selected_leaf_brings_in_the_detail_group() {
    let mut chart =
        Chart::new(&tree(), &SunburstConfig::default(), &LayoutOptions::default()).unwrap();
    let leaf = chart.find(&["Formulation Type", "Stick", "Kids Stick <SPF 50>"]).unwrap();
    chart.select(leaf, 0.0).unwrap();

    let svg = chart.render_svg(650.0);
    assert!(svg.contains(r##"<g class="detail" fill="#ffeccf""##));
    assert!(svg.contains(r#"href="https://example.com/kids?a=1&amp;b=2""#));
    assert!(svg.contains(r#"font-style="italic""#));
    assert!(svg.contains("Features: Stick,"));
    assert!(svg.contains(r#"class="selected""#));
}

#[test]
fn config_controls_size_and_theme() {
    let cfg = SunburstConfig::from_json_str(
        r##"{"sunburst":{"width":600,"height":400,"theme":"warm","labelFill":"#222222"}}"##,
    )
    .unwrap();
    let chart = Chart::new(&tree(), &cfg, &LayoutOptions::default()).unwrap();
    assert_eq!(chart.options().radius, 400.0 / 6.0);

    let svg = chart.render_svg(0.0);
    assert!(svg.contains(r#"viewBox="-300 -200 600 600""#));
    assert!(svg.contains(r##"fill="#222222""##));
    let scene = chart.scene(0.0);
    let uva = chart.find(&["UVA Rating"]).unwrap();
    let arc = scene.arcs.iter().find(|a| a.id == uva).unwrap();
    assert_eq!(arc.fill, "#fc5e3a");
    assert_eq!(arc.fill_opacity, 0.8);
}

#[test]
fn scene_serializes_to_json() {
    let chart = Chart::new(&tree(), &SunburstConfig::default(), &LayoutOptions::default()).unwrap();
    let value = serde_json::to_value(chart.scene(0.0)).unwrap();
    assert_eq!(value["width"], 932.0);
    assert_eq!(value["arcs"].as_array().map(Vec::len), Some(5));
    assert!(value.get("detail").is_none());
}
