use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;
use sunburst_core::{Hierarchy, TreeNode};
use sunburst_render::{Chart, ChartOptions, LayoutOptions, partition};

/// `categories × labels × products` leaves under a three-level tree.
fn build_tree(categories: usize, labels: usize, products: usize) -> TreeNode {
    let children = (0..categories)
        .map(|c| {
            let labels = (0..labels)
                .map(|l| {
                    let leaves = (0..products)
                        .map(|p| TreeNode::leaf(format!("product {c}-{l}-{p}"), (p % 7 + 1) as f64))
                        .collect();
                    TreeNode::branch(format!("label {c}-{l}"), leaves)
                })
                .collect();
            TreeNode::branch(format!("category {c}"), labels)
        })
        .collect();
    TreeNode::branch("Sunscreen", children)
}

fn bench_partition(c: &mut Criterion) {
    let mut group = c.benchmark_group("partition");
    group.measurement_time(Duration::from_secs(5));

    for &(categories, labels, products) in &[(5, 4, 10), (5, 10, 50), (10, 20, 100)] {
        let tree = build_tree(categories, labels, products);
        let hierarchy = Hierarchy::from_tree(&tree).expect("valid tree");
        let leaves = categories * labels * products;

        group.bench_with_input(BenchmarkId::new("layout", leaves), &hierarchy, |b, h| {
            b.iter(|| black_box(partition(black_box(h))));
        });

        group.bench_with_input(BenchmarkId::new("zoom_frame", leaves), &hierarchy, |b, h| {
            b.iter_batched(
                || {
                    Chart::from_hierarchy(
                        h.clone(),
                        ChartOptions::default(),
                        &LayoutOptions::default(),
                    )
                },
                |mut chart| {
                    let target = chart.find(&["category 0"]).expect("category");
                    chart.select(target, 0.0).expect("select");
                    black_box(chart.scene(375.0));
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_partition);
criterion_main!(benches);
