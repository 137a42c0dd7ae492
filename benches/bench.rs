use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};

use bstree::Tree;

/// Pushes a midpoint-first insertion order for `range` so the built
/// tree is height-balanced even though nothing rebalances it.
fn balanced_order(range: std::ops::Range<i32>, out: &mut Vec<i32>) {
    if range.is_empty() {
        return;
    }
    let mid = range.start + (range.end - range.start) / 2;
    out.push(mid);
    balanced_order(range.start..mid, out);
    balanced_order(mid + 1..range.end, out);
}

fn build_tree(num_nodes: i32) -> Tree<i32> {
    let mut order = Vec::with_capacity(num_nodes as usize);
    balanced_order(0..num_nodes, &mut order);

    let mut tree = Tree::new();
    for x in order {
        tree.insert(x);
    }
    tree
}

/// Helper to bench a function on the tree.
/// It creates a group for the given name and closure and runs it for
/// various tree sizes before finishing the group.
fn bench_helper(c: &mut Criterion, name: &str, f: impl Fn(&mut Tree<i32>, i32)) {
    let mut group = c.benchmark_group(name);

    for num_levels in [3u32, 7, 11, 15] {
        let num_nodes = 2i32.pow(num_levels) - 1;
        let largest_element_in_tree = num_nodes - 1;
        let tree = build_tree(num_nodes);

        group.bench_with_input(
            BenchmarkId::from_parameter(num_levels),
            &largest_element_in_tree,
            |b, &largest| {
                b.iter_batched(
                    || tree.copy().unwrap(),
                    |mut tree| f(&mut tree, black_box(largest)),
                    BatchSize::SmallInput,
                )
            },
        );
    }

    group.finish();
}

fn bench_contains(c: &mut Criterion) {
    bench_helper(c, "contains", |tree, largest| {
        black_box(tree.contains(&largest));
    });
}

fn bench_insert(c: &mut Criterion) {
    bench_helper(c, "insert", |tree, largest| tree.insert(largest + 1));
}

fn bench_remove(c: &mut Criterion) {
    bench_helper(c, "remove", |tree, largest| tree.remove(&largest));
}

criterion_group!(benches, bench_contains, bench_insert, bench_remove);
criterion_main!(benches);
