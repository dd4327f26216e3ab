use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::StatefulWidget;
use tui_tree_control::{Item, LinkedTree, Selection, Tree, TreeProps, TreeState};

fn example_items() -> Vec<Item> {
    let mut items = Vec::new();
    for (value, label, parent) in [
        ("a", "Alfa", None),
        ("b", "Bravo", None),
        ("c", "Charlie", Some("b")),
        ("d", "Delta", Some("b")),
        ("e", "Echo", Some("d")),
        ("f", "Foxtrot", Some("d")),
        ("g", "Golf", Some("b")),
        ("h", "Hotel", None),
        ("i", "India", None),
        ("j", "Juliett", Some("i")),
        ("k", "Kilo", Some("i")),
        ("l", "Lima", Some("i")),
        ("m", "Mike", Some("i")),
        ("n", "November", Some("i")),
        ("o", "Oscar", None),
        ("p", "Papa", None),
        ("q", "Quebec", Some("p")),
        ("r", "Romeo", Some("p")),
        ("s", "Sierra", Some("p")),
        ("t", "Tango", Some("p")),
        ("u", "Uniform", Some("p")),
        ("v", "Victor", Some("p")),
        ("w", "Whiskey", Some("v")),
        ("x", "Xray", Some("v")),
        ("y", "Yankee", Some("v")),
        ("z", "Zulu", None),
    ] {
        let item = Item::new(value, label);
        items.push(match parent {
            Some(parent) => item.with_parent(parent),
            None => item,
        });
    }
    items
}

/// Every item gets `width` children until `depth` is reached.
fn wide_items(width: usize, depth: usize) -> Vec<Item> {
    fn add(items: &mut Vec<Item>, parent: Option<&str>, width: usize, depth: usize) {
        if depth == 0 {
            return;
        }
        for index in 0..width {
            let value = parent.map_or_else(|| index.to_string(), |parent| format!("{parent}.{index}"));
            let item = Item::new(value.clone(), format!("Item {value}"));
            items.push(match parent {
                Some(parent) => item.with_parent(parent),
                None => item,
            });
            add(items, Some(value.as_str()), width, depth - 1);
        }
    }
    let mut items = Vec::new();
    add(&mut items, None, width, depth);
    items
}

fn init(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("init");
    group.throughput(Throughput::Elements(1));

    group.bench_function("empty", |bencher| {
        bencher.iter(|| {
            black_box(LinkedTree::from_items(black_box(vec![])).unwrap());
        });
    });

    group.bench_function("example-items", |bencher| {
        bencher.iter_batched(
            example_items,
            |items| black_box(LinkedTree::from_items(black_box(items)).unwrap()),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("wide-items", |bencher| {
        bencher.iter_batched(
            || wide_items(8, 4),
            |items| black_box(LinkedTree::from_items(black_box(items)).unwrap()),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn cascade(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("cascade");
    group.throughput(Throughput::Elements(1));

    let tree = LinkedTree::from_items(wide_items(8, 4)).unwrap();
    let all = Selection::Multiple(tree.flatten().into_iter().cloned().collect());
    let leaf = tree.find("3.3.3.3").unwrap();
    let branch = tree.find("3").unwrap();

    group.bench_function("select-leaf", |bencher| {
        bencher.iter(|| black_box(tui_tree_control::cascade_select(black_box(leaf), true)));
    });
    group.bench_function("select-branch", |bencher| {
        bencher.iter(|| black_box(tui_tree_control::cascade_select(black_box(branch), true)));
    });
    group.bench_function("remove-leaf", |bencher| {
        bencher.iter(|| {
            black_box(tui_tree_control::cascade_remove(
                black_box(leaf),
                Some(&all),
                true,
            ))
        });
    });

    group.finish();
}

fn renders(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("render");
    group.throughput(Throughput::Elements(1)); // Frames per second

    let buffer_size = Rect::new(0, 0, 100, 100);

    let empty = LinkedTree::default();
    let tree = Tree::new(TreeProps::new(empty.roots()));
    group.bench_function("empty", |bencher| {
        bencher.iter_batched(
            || (tree.clone(), TreeState::default()),
            |(tree, mut state)| {
                let mut buffer = Buffer::empty(buffer_size);
                black_box(tree).render(buffer_size, black_box(&mut buffer), &mut state);
            },
            BatchSize::SmallInput,
        );
    });

    let example = LinkedTree::from_items(example_items()).unwrap();
    let tree = Tree::new(TreeProps::new(example.roots()).multiple(true));
    group.bench_function("example-items", |bencher| {
        bencher.iter_batched(
            || (tree.clone(), TreeState::default()),
            |(tree, mut state)| {
                let mut buffer = Buffer::empty(buffer_size);
                black_box(tree).render(buffer_size, black_box(&mut buffer), &mut state);
            },
            BatchSize::SmallInput,
        );
    });

    let wide = LinkedTree::from_items(wide_items(8, 4)).unwrap();
    let tree = Tree::new(
        TreeProps::new(wide.roots())
            .multiple(true)
            .is_item_expanded(|node| node.depth() < 2),
    );
    group.bench_function("wide-items", |bencher| {
        bencher.iter_batched(
            || {
                let mut state = TreeState::default();
                state.focus(Some("7.7".to_owned()));
                (tree.clone(), state)
            },
            |(tree, mut state)| {
                let mut buffer = Buffer::empty(buffer_size);
                black_box(tree).render(buffer_size, black_box(&mut buffer), &mut state);
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

/// Create flamegraphs with `cargo bench --bench bench -- --profile-time=5`
#[cfg(unix)]
fn profiled() -> Criterion {
    use pprof::criterion::{Output, PProfProfiler};
    Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)))
}
#[cfg(not(unix))]
fn profiled() -> Criterion {
    Criterion::default()
}

criterion_group! {
    name = benches;
    config = profiled();
    targets = init, cascade, renders
}
criterion_main!(benches);
